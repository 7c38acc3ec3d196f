// src/gui/pages/mod.rs
use eframe::egui;

use crate::config::options::PageKind;
use crate::gui::app::App;

pub mod carrier;
pub mod register;

pub trait Page: Send + Sync + 'static {
    fn title(&self) -> &'static str;
    fn kind(&self) -> PageKind;

    /// Optional: per-page column widths (in px-ish)
    fn preferred_column_widths(&self) -> Option<&'static [f32]> { None }

    /// Lay out every panel below the tab bar.
    fn draw(&self, ctx: &egui::Context, app: &mut App);
}
