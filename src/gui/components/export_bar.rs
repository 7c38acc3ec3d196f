// src/gui/components/export_bar.rs

use eframe::egui;
use crate::{
    gui::{actions, app::App},
    config::options::{
        ExportFormat,
        ExportType::{PerCategory, SingleFile},
    },
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let export = &mut app.state.options.export;

        // --- Format + Include headers ---
        let prev_fmt = export.format;
        ui.label("Format:");
        ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
        ui.selectable_value(&mut export.format, ExportFormat::Tsv, "TSV");
        ui.selectable_value(&mut export.format, ExportFormat::Json, "JSON");
        if export.format != prev_fmt {
            logf!("UI: Export format → {:?}", export.format);
            if !app.out_path_dirty {
                app.out_path_text = export.out_path().to_string_lossy().into_owned();
            }
        }

        let before_headers = export.include_headers;
        ui.add_enabled(
            export.format != ExportFormat::Json,
            egui::Checkbox::new(&mut export.include_headers, "Include headers"),
        );
        if export.include_headers != before_headers {
            logf!("UI: Include_headers → {}", export.include_headers);
        }
    });

    // --- Per-category toggle + Output field ---
    ui.horizontal(|ui| {
        let export = &mut app.state.options.export;
        let mut single = matches!(export.export_type, SingleFile);
        if ui.checkbox(&mut single, "All categories in one file").changed() {
            if app.out_path_dirty {
                export.set_path(&app.out_path_text);
                app.out_path_dirty = false;
            }
            export.export_type = if single { SingleFile } else { PerCategory };
            app.out_path_text = export.out_path().to_string_lossy().into_owned();
            logf!("UI: export_type → {:?}", export.export_type);
        }

        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text)
                .font(egui::TextStyle::Monospace)
                .desired_width(320.0))
            .changed()
        {
            app.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.out_path_text);
        }

        // --- Actions (Copy / Export) ---
        let has_rows = !app.row_ix.is_empty();
        if ui.add_enabled(has_rows, egui::Button::new("Copy")).clicked() {
            actions::copy(app, ui.ctx());
        }
        if ui.add_enabled(has_rows, egui::Button::new("Export")).clicked() {
            actions::export(app);
        }
    });
}
