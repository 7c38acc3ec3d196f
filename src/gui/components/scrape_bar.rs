// src/gui/components/scrape_bar.rs
//
// Upstream date picker plus the Fetch dates / Scrape buttons.

use eframe::egui;
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        if ui.add_enabled(!app.running, egui::Button::new("Fetch dates")).clicked() {
            actions::fetch_dates(app);
        }

        let picked = app.state.gui.picked_date.clone();
        let shown = picked
            .as_deref()
            .and_then(|d| app.available.iter().find(|i| i.fmcsa_date == d))
            .map(|i| format!("{}  {}", i.fmcsa_date, i.label))
            .or(picked.clone())
            .unwrap_or_else(|| s!("(no date)"));

        egui::ComboBox::from_id_salt("available_dates")
            .selected_text(shown)
            .width(280.0)
            .show_ui(ui, |ui| {
                for item in &app.available {
                    let text = format!("{}  {}", item.fmcsa_date, item.label);
                    ui.selectable_value(&mut app.state.gui.picked_date, Some(item.fmcsa_date.clone()), text);
                }
            });

        let can_scrape = !app.running && app.state.gui.picked_date.is_some();
        if ui.add_enabled(can_scrape, egui::Button::new("Scrape")).clicked() {
            if let Some(date) = app.state.gui.picked_date.clone() {
                actions::scrape(app, vec![date]);
            }
        }

        let n = app.state.gui.selected_dates.len();
        let refresh = egui::Button::new(format!("Re-scrape selected ({n})"));
        if ui.add_enabled(!app.running && n > 0, refresh).clicked() {
            let dates = app.state.gui.selected_dates.clone();
            actions::scrape(app, dates);
        }

        ui.separator();

        let scrape = &mut app.state.options.scrape;
        if ui.checkbox(&mut scrape.use_proxies, "Use proxies").changed() {
            logf!("UI: use_proxies → {}", scrape.use_proxies);
            app.save_settings();
        }
    });
}
