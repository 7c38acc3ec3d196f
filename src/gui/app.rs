// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex},
    time::Duration,
};

use eframe::egui;

use crate::{
    config::{
        consts::SETTINGS_FILE,
        options::PageKind,
        settings::{self, Settings},
        state::AppState,
    },
    data::{RawData, Selection, SelectionView},
    gui::jobs::{JobResult, JobRx},
    model::{CarrierProfile, CarrierQuery, DateItem},
    store::RecordStore,
};

use super::{
    pages::Page,
    router,
};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    let mut state = AppState::default();
    settings::load(SETTINGS_FILE).apply(&mut state);
    eframe::run_native(
        "FMCSA Register",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(state, RecordStore::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,
    pub store: RecordStore,

    // stored dates panel
    pub last_clicked: Option<usize>,

    // upstream dates for the picker
    pub available: Vec<DateItem>,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // canonical records + current view
    pub raw: RawData,
    pub row_ix: Vec<usize>,

    // carrier tab
    pub carrier: Option<(CarrierQuery, CarrierProfile)>,

    // status/progress (workers write here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    pub jobs: Option<JobRx>,
}

impl App {
    pub fn new(mut state: AppState, store: RecordStore) -> Self {
        let mut status = s!("Idle");

        let raw = match RawData::load(&store) {
            Ok(raw) => {
                logf!("Store: Loaded {} records from {}", raw.records().len(), store.root().display());
                if !raw.records().is_empty() {
                    status = s!("Loaded local data");
                }
                raw
            }
            Err(e) => {
                loge!("Store: Load failed: {}", e);
                status = format!("Could not read local store: {e}");
                RawData::default()
            }
        };

        // Keep only persisted selections that still have data; default to newest.
        let dates = raw.dates();
        state.gui.selected_dates.retain(|d| dates.contains(d));
        if state.gui.selected_dates.is_empty() {
            state.gui.selected_dates.extend(dates.first().cloned());
        }

        let out_path_text = state.options.export.out_path().to_string_lossy().into();

        logf!("Init: stored dates={}, selected={:?}", dates.len(), state.gui.selected_dates);

        let mut app = Self {
            state,
            store,
            last_clicked: None,
            available: Vec::new(),
            out_path_text,
            out_path_dirty: false,
            raw,
            row_ix: Vec::new(),
            carrier: None,
            status: Arc::new(Mutex::new(status)),
            running: false,
            jobs: None,
        };
        app.rebuild_view();
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn current_index(&self) -> usize { self.state.gui.current_page_index }

    #[inline]
    pub fn set_current_index(&mut self, idx: usize) { self.state.gui.current_page_index = idx; }

    #[inline]
    pub fn current_page_kind(&self) -> PageKind { self.current_page().kind() }

    #[inline]
    pub fn current_page(&self) -> &'static dyn Page {
        let pages = router::all_pages();
        pages.get(self.current_index()).copied().unwrap_or(pages[0])
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    #[inline]
    pub fn set_selection_message(&self) {
        let n = self.state.gui.selected_dates.len();
        self.status(format!("Selection: {} date(s), {} row(s)", n, self.row_ix.len()));
    }

    pub fn selection(&self) -> Selection<'_> {
        let gui = &self.state.gui;
        Selection {
            dates: &gui.selected_dates,
            category: gui.category.as_deref(),
            search: &gui.search,
        }
    }

    /// Recompute the visible rows from raw data + selection.
    pub fn rebuild_view(&mut self) {
        // Drop a category chip that no longer exists for the chosen dates.
        if let Some(cat) = &self.state.gui.category {
            if !self.raw.categories_for(&self.state.gui.selected_dates).contains(cat) {
                self.state.gui.category = None;
            }
        }
        self.row_ix = SelectionView::from_raw(&self.raw, self.selection()).row_ix;
    }

    /// Current view over the raw records (no re-filtering).
    pub fn view(&self) -> SelectionView<'_> {
        SelectionView::from_indices(&self.raw, self.row_ix.clone())
    }

    /// Best-effort: persist the bits of state that survive restarts.
    pub fn save_settings(&self) {
        match settings::save(SETTINGS_FILE, &Settings::capture(&self.state)) {
            Ok(()) => logd!("Settings: Saved → {}", SETTINGS_FILE),
            Err(e) => loge!("Settings: Save failed: {}", e),
        }
    }

    pub fn start_job(&mut self, rx: JobRx) {
        self.jobs = Some(rx);
        self.running = true;
    }

    /// Drain finished background work.
    pub fn poll_jobs(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.jobs else { return };
        match rx.try_recv() {
            Ok(result) => {
                self.jobs = None;
                self.running = false;
                self.on_job_result(result);
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                loge!("Jobs: Worker ended without a result");
                self.jobs = None;
                self.running = false;
                self.status("Background task stopped unexpectedly");
            }
        }
    }

    fn on_job_result(&mut self, result: JobResult) {
        match result {
            JobResult::Dates(Ok(dates)) => {
                logf!("UI: {} upstream dates", dates.len());
                if self.state.gui.picked_date.is_none() {
                    self.state.gui.picked_date = dates.first().map(|d| d.fmcsa_date.clone());
                }
                self.status(format!("{} register dates available", dates.len()));
                self.available = dates;
            }
            JobResult::Dates(Err(e)) => {
                loge!("UI: Fetch dates failed: {}", e);
                self.status(format!("Could not fetch dates: {e}"));
            }
            JobResult::Scraped(results) => super::actions::finish_scrape(self, results),
            JobResult::Carrier(query, profile) => {
                if profile.is_empty() {
                    self.status(format!("No data found for {query}"));
                } else {
                    self.status(format!("Loaded {query}"));
                }
                self.carrier = Some((query, profile));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_jobs(ctx);

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            crate::gui::components::tabs::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.running {
                    ui.spinner();
                }
                ui.label(self.status_text());
            });
        });

        let page = self.current_page();
        page.draw(ctx, self);
    }
}
