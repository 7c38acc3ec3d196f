// src/gui/actions/copy.rs
use eframe::egui;
use crate::{csv::to_export_string, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    if app.row_ix.is_empty() {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but there's nothing to copy");
        return;
    }

    let export = &app.state.options.export;
    let ds = app.view().to_dataset();
    logf!("Copy: rows={}, format={:?}", ds.row_count(), export.format);

    let txt = to_export_string(&ds.headers, &ds.rows, export.include_headers, export.format);
    ui_ctx.copy_text(txt);
    app.status(format!("Copied {} row(s) to clipboard", ds.row_count()));
}
