// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Which stored register dates are selected in the left panel
    pub selected_dates: Vec<String>,

    /// Register page -> category chip (None = all)
    pub category: Option<String>,
    /// Register page -> free-text search over docket / carrier info
    pub search: String,

    /// Date picked in the "available dates" combo
    pub picked_date: Option<String>,

    /// Carrier page -> raw input and lookup key
    pub carrier_input: String,
    pub carrier_by_mc: bool,

    /// Active tab index into router::PAGES
    pub current_page_index: usize,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            selected_dates: Vec::new(),
            category: None,
            search: s!(),
            picked_date: None,
            carrier_input: s!(),
            carrier_by_mc: false,
            current_page_index: 0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
