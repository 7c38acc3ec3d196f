// src/gui/components/data_table.rs
//
// Draws the live register table from the current view. Purely a view.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::gui::{app::App, pages::Page};
use crate::model::StoredRecord;
use super::filter_bar::category_color;

pub fn draw(ui: &mut egui::Ui, app: &App, page: &dyn Page) {
    let headers = StoredRecord::HEADERS;
    let widths = page.preferred_column_widths().unwrap_or(&[]);
    let view = app.view();

    if view.is_empty() {
        ui.add_space(12.0);
        ui.weak(if app.state.gui.selected_dates.is_empty() {
            "Select one or more stored dates on the left."
        } else {
            "No records match the current filters."
        });
        return;
    }

    // Ensure scroll bars allocate space (not floating over content), and tune size
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.bar_inner_margin = 7.0;
        s.bar_outer_margin = 0.0;
        s.handle_min_length = 48.0;
        s.foreground_color = true;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    let avail_h = ui.available_height();
    egui::ScrollArea::horizontal()
        .id_salt("inner_table_hscroll")
        .max_height(avail_h)
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .striped(true)
                .min_scrolled_height(0.0)
                .max_scroll_height(avail_h)
                .id_salt("register_table");
            for ci in 0..headers.len() {
                let w = widths.get(ci).copied().unwrap_or(100.0);
                table = table.column(Column::initial(w).resizable(true).clip(true).at_least(30.0));
            }

            table
                .header(24.0, |mut header| {
                    for h in headers {
                        header.col(|ui| {
                            ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                                ui.add(egui::Label::new(RichText::new(h).strong()).selectable(false));
                            });
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, view.len(), |mut row| {
                        let Some(rec) = view.record(row.index()) else { return };
                        for (ci, cell) in rec.to_row().into_iter().enumerate() {
                            row.col(|ui| {
                                if ci == StoredRecord::CATEGORY_COL {
                                    ui.label(RichText::new(&cell).color(category_color(&cell)));
                                } else {
                                    ui.label(cell);
                                }
                            });
                        }
                    });
                });
        });
}
