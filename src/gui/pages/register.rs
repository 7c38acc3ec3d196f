// src/gui/pages/register.rs
use eframe::egui;

use crate::config::options::PageKind;
use crate::gui::{app::App, components};
use super::Page;

pub struct RegisterPage;
pub static PAGE: RegisterPage = RegisterPage;

impl Page for RegisterPage {
    fn title(&self) -> &'static str { "Register" }
    fn kind(&self) -> PageKind { PageKind::Register }

    // id, docket, carrier info, published, category, scraped, register date
    fn preferred_column_widths(&self) -> Option<&'static [f32]> {
        Some(&[50.0, 100.0, 420.0, 90.0, 220.0, 160.0, 90.0])
    }

    fn draw(&self, ctx: &egui::Context, app: &mut App) {
        egui::SidePanel::left("dates")
            .resizable(false)
            .default_width(170.0)
            .show(ctx, |ui| {
                components::date_panel::draw(ui, app);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::scrape_bar::draw(ui, app);
            ui.separator();
            components::filter_bar::draw(ui, app);
            ui.separator();
            components::export_bar::draw(ui, app);
            ui.separator();
            components::data_table::draw(ui, app, self);
        });
    }
}
