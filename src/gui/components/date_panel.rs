// src/gui/components/date_panel.rs
//
// Renders the stored-dates list and applies selection changes directly to `app`.
// Handles ctrl/shift range behavior and rebuilds the table.

use eframe::egui;
use crate::gui::app::App;

/// Click semantics shared by the list: plain click selects one, ctrl toggles,
/// shift selects a range from the anchor, ctrl+shift extends with a range.
pub fn apply_click(
    sel: &mut Vec<String>,
    dates: &[String],
    idx: usize,
    anchor: Option<usize>,
    ctrl: bool,
    shift: bool,
) {
    let date = &dates[idx];
    let toggle = |sel: &mut Vec<String>| {
        if sel.contains(date) { sel.retain(|d| d != date); } else { sel.push(date.clone()); }
    };

    match (ctrl, shift, anchor) {
        (true, true, Some(last)) => {
            let (lo, hi) = if last <= idx { (last, idx) } else { (idx, last) };
            for d in &dates[lo..=hi.min(dates.len() - 1)] {
                if !sel.contains(d) { sel.push(d.clone()); }
            }
        }
        (true, _, _) => toggle(sel),
        (false, true, Some(last)) => {
            let (lo, hi) = if last <= idx { (last, idx) } else { (idx, last) };
            sel.clear();
            sel.extend(dates[lo..=hi.min(dates.len() - 1)].iter().cloned());
        }
        _ => {
            sel.clear();
            sel.push(date.clone());
        }
    }
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Stored dates");

    let dates = app.raw.dates();

    // Apply current selection → rebuild table, set status.
    let apply_selection_change = |app: &mut App| {
        app.rebuild_view();

        // Don't overwrite progress messages with selection info
        if !app.running {
            app.set_selection_message();
        }
    };

    ui.horizontal(|ui| {
        if ui.button("All").clicked() {
            app.state.gui.selected_dates = dates.clone();
            apply_selection_change(app);
        }
        if ui.button("None").clicked() {
            app.state.gui.selected_dates.clear();
            apply_selection_change(app);
        }
    });

    ui.separator();

    // Match the scroll bar aesthetics used in the main table
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.bar_inner_margin = 0.0;
        s.bar_outer_margin = -6.0;
        s.handle_min_length = 48.0;
        s.foreground_color = true;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    if dates.is_empty() {
        ui.weak("Nothing stored yet.\nPick a date above and Scrape.");
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("dates_panel_scroll")
        .show(ui, |ui| {
            let w = ui.available_width();
            ui.set_min_width(w);
            ui.set_width(w);
            let mut changed = false;

            for (idx, date) in dates.iter().enumerate() {
                let is_selected = app.state.gui.selected_dates.contains(date);
                let label = format!("{date}  ({})", app.raw.count_for(date));
                let resp = ui.selectable_label(is_selected, label);

                if resp.clicked() && !app.running {
                    let (ctrl, shift) = ui.input(|i| (i.modifiers.command, i.modifiers.shift));
                    apply_click(&mut app.state.gui.selected_dates, &dates, idx, app.last_clicked, ctrl, shift);
                    app.last_clicked = Some(idx);
                    changed = true;
                }
            }

            if changed {
                apply_selection_change(app);
                logf!(
                    "UI: Selection changed ({} dates) {:?}",
                    app.state.gui.selected_dates.len(),
                    &app.state.gui.selected_dates
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::apply_click;

    fn dates() -> Vec<String> {
        ["20-FEB-26", "19-FEB-26", "18-FEB-26", "17-FEB-26"].iter().map(|d| s!(*d)).collect()
    }

    #[test]
    fn plain_click_selects_one() {
        let ds = dates();
        let mut sel = vec![s!("17-FEB-26")];
        apply_click(&mut sel, &ds, 1, None, false, false);
        assert_eq!(sel, vec![s!("19-FEB-26")]);
    }

    #[test]
    fn ctrl_toggles_and_shift_ranges() {
        let ds = dates();
        let mut sel = vec![s!("20-FEB-26")];
        apply_click(&mut sel, &ds, 2, Some(0), true, false);
        assert_eq!(sel.len(), 2);
        apply_click(&mut sel, &ds, 2, Some(2), true, false);
        assert_eq!(sel, vec![s!("20-FEB-26")]);

        apply_click(&mut sel, &ds, 3, Some(1), false, true);
        assert_eq!(sel, vec![s!("19-FEB-26"), s!("18-FEB-26"), s!("17-FEB-26")]);
    }
}
