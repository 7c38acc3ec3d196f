// src/gui/pages/carrier.rs
use eframe::egui;

use crate::config::options::PageKind;
use crate::gui::{actions, app::App, components};
use super::Page;

pub struct CarrierPage;
pub static PAGE: CarrierPage = CarrierPage;

impl Page for CarrierPage {
    fn title(&self) -> &'static str { "Carrier" }
    fn kind(&self) -> PageKind { PageKind::Carrier }

    fn draw(&self, ctx: &egui::Context, app: &mut App) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let gui = &mut app.state.gui;
                ui.selectable_value(&mut gui.carrier_by_mc, false, "USDOT");
                ui.selectable_value(&mut gui.carrier_by_mc, true, "MC");

                let resp = ui.add(
                    egui::TextEdit::singleline(&mut gui.carrier_input)
                        .hint_text("e.g. 1234567 or MC-123456")
                        .desired_width(220.0),
                );
                let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let lookup = ui.add_enabled(!app.running, egui::Button::new("Lookup"));
                if (lookup.clicked() || enter) && !app.running {
                    actions::lookup(app);
                }
            });

            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("carrier_scroll")
                .show(ui, |ui| match &app.carrier {
                    Some((query, profile)) => components::carrier_card::draw(ui, query, profile),
                    None => {
                        ui.weak("Enter a USDOT or MC number to load the SAFER snapshot.");
                    }
                });
        });
    }
}
