// src/gui/actions/export.rs
use std::{error::Error, path::PathBuf};

use crate::{
    config::options::ExportType,
    file::{write_export_per_category, write_export_single},
    gui::app::App,
    model::StoredRecord,
};

pub fn export(app: &mut App) {
    // normalize out_path first (mutates app) before any &app borrows
    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        logf!(
            "Export: Out path set → {}",
            app.state.options.export.out_path().display()
        );
        app.out_path_text = app.state.options.export.out_path().to_string_lossy().into_owned();
        app.out_path_dirty = false;
    }

    if app.row_ix.is_empty() {
        logd!("Export: Clicked, but there's nothing to export");
        app.status("Nothing to export");
        return;
    }

    let result: Result<Vec<PathBuf>, Box<dyn Error>> = {
        let export = &app.state.options.export;
        let ds = app.view().to_dataset();
        logf!(
            "Export: Begin rows={}, format={:?}, type={:?}",
            ds.row_count(),
            export.format,
            export.export_type
        );
        match export.export_type {
            ExportType::SingleFile => {
                write_export_single(export, &ds.headers, &ds.rows).map(|p| vec![p])
            }
            ExportType::PerCategory => {
                write_export_per_category(export, &ds.headers, &ds.rows, StoredRecord::CATEGORY_COL)
            }
        }
    };

    let status_msg = match result {
        Ok(paths) => match paths.last() {
            Some(last) => {
                logf!("Export: OK count={} last={}", paths.len(), last.display());
                format!("Exported {} file(s). Last: {}", paths.len(), last.display())
            }
            None => s!("Nothing to export"),
        },
        Err(e) => {
            loge!("Export: Error: {}", e);
            format!("Export error: {e}")
        }
    };
    app.status(status_msg);
    app.save_settings();
}
