// src/gui/components/carrier_card.rs
//
// SAFER snapshot card: labeled fields, checked lists and the safety tables.

use eframe::egui::{self, RichText};

use crate::model::{CarrierProfile, CarrierQuery, CrashCounts, InspectionRow};

pub fn draw(ui: &mut egui::Ui, query: &CarrierQuery, profile: &CarrierProfile) {
    if profile.is_empty() {
        ui.label(format!("Nothing found for {query}. The snapshot may be unavailable, or every fetch path failed (see .store/debug.log)."));
        return;
    }

    let title = profile.legal_name.as_deref().unwrap_or("(no legal name)");
    ui.heading(title);
    if let Some(status) = &profile.operating_status {
        ui.label(RichText::new(status).strong());
    }
    ui.add_space(6.0);

    egui::Grid::new("carrier_fields")
        .num_columns(2)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for (label, value) in profile.fields() {
                ui.label(RichText::new(label).weak());
                match value {
                    Some(v) => { ui.label(v); }
                    None => { ui.weak("-"); }
                }
                ui.end_row();
            }
            for (label, items) in [
                ("Operation Classification", &profile.operation_classification),
                ("Carrier Operation", &profile.carrier_operation),
                ("Cargo Carried", &profile.cargo_carried),
            ] {
                ui.label(RichText::new(label).weak());
                if items.is_empty() { ui.weak("-"); } else { ui.label(items.join(", ")); }
                ui.end_row();
            }
        });

    let safety = &profile.safety;
    if !safety.inspections.is_empty() {
        ui.add_space(10.0);
        ui.strong("Inspections / Out-of-Service (US, 24 months)");
        egui::Grid::new("carrier_inspections").striped(true).show(ui, |ui| {
            for h in InspectionRow::HEADERS {
                ui.strong(h);
            }
            ui.end_row();
            for row in &safety.inspections {
                for cell in row.cells() {
                    ui.label(cell);
                }
                ui.end_row();
            }
        });
    }

    if let Some(crashes) = &safety.crashes {
        ui.add_space(10.0);
        ui.strong("Crashes (US, 24 months)");
        egui::Grid::new("carrier_crashes").striped(true).show(ui, |ui| {
            for h in CrashCounts::HEADERS {
                ui.strong(h);
            }
            ui.end_row();
            for cell in crashes.cells() {
                ui.label(cell);
            }
            ui.end_row();
        });
    }
}
