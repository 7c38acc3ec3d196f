// src/gui/components/filter_bar.rs
//
// Category chips and the search box. Chips are tinted from a fixed map of the
// usual register sections; anything else gets a stable colour from its name.

use eframe::egui::{self, Color32, RichText};
use crate::gui::app::App;

const CATEGORY_COLORS: &[(&str, Color32)] = &[
    ("NAME CHANGES", Color32::from_rgb(0x3b, 0x82, 0xf6)),
    ("CERTIFICATES, PERMITS AND LICENSES", Color32::from_rgb(0x22, 0xc5, 0x5e)),
    ("CERTIFICATES OF REGISTRATION", Color32::from_rgb(0x10, 0xb9, 0x81)),
    ("DISMISSALS", Color32::from_rgb(0xf5, 0x9e, 0x0b)),
    ("WITHDRAWAL OF APPLICATION", Color32::from_rgb(0xf9, 0x73, 0x16)),
    ("REVOCATIONS", Color32::from_rgb(0xef, 0x44, 0x44)),
    ("TRANSFERS", Color32::from_rgb(0xa8, 0x55, 0xf7)),
    ("UNCATEGORIZED", Color32::from_rgb(0x9c, 0xa3, 0xaf)),
];

const FALLBACK: &[Color32] = &[
    Color32::from_rgb(0x06, 0xb6, 0xd4),
    Color32::from_rgb(0xec, 0x48, 0x99),
    Color32::from_rgb(0x84, 0xcc, 0x16),
    Color32::from_rgb(0x63, 0x66, 0xf1),
    Color32::from_rgb(0xd9, 0x77, 0x06),
    Color32::from_rgb(0x14, 0xb8, 0xa6),
];

pub fn category_color(category: &str) -> Color32 {
    if let Some((_, c)) = CATEGORY_COLORS.iter().find(|(name, _)| *name == category) {
        return *c;
    }
    // FNV-1a, stable across runs
    let h = category.bytes().fold(0x811c_9dc5u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193));
    FALLBACK[h as usize % FALLBACK.len()]
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let categories = app.raw.categories_for(&app.state.gui.selected_dates);
    let mut changed = false;

    ui.horizontal_wrapped(|ui| {
        ui.label("Category:");
        let gui = &mut app.state.gui;
        if ui.selectable_label(gui.category.is_none(), "All").clicked() && gui.category.is_some() {
            gui.category = None;
            changed = true;
        }
        for cat in &categories {
            let selected = gui.category.as_deref() == Some(cat.as_str());
            let text = RichText::new(cat).color(category_color(cat));
            if ui.selectable_label(selected, text).clicked() {
                gui.category = if selected { None } else { Some(cat.clone()) };
                changed = true;
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label("Search:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.search)
                .hint_text("docket or carrier")
                .desired_width(260.0),
        );
        if resp.changed() {
            changed = true;
        }
        if !app.state.gui.search.is_empty() && ui.small_button("✕").clicked() {
            app.state.gui.search.clear();
            changed = true;
        }
        ui.label(format!("{} row(s)", app.row_ix.len()));
    });

    if changed {
        app.rebuild_view();
        logd!(
            "UI: Filter category={:?} search={:?} rows={}",
            app.state.gui.category,
            app.state.gui.search,
            app.row_ix.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_categories_are_stable() {
        assert_eq!(category_color("REVOCATIONS"), Color32::from_rgb(0xef, 0x44, 0x44));
        assert_eq!(category_color("SOMETHING NEW"), category_color("SOMETHING NEW"));
    }
}
