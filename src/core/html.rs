// src/core/html.rs
//
// DOM helpers over `scraper`. Government pages nest tables inside tables and
// wrap labels in <a>/<b>/<font>, so lookups work on normalised cell text
// rather than on fixed paths.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::{non_empty, normalize_entities, normalize_ws};

/// Elements under `root` matching `css`, in document order.
/// An invalid selector yields nothing.
pub fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(sel) => root.select(&sel).collect(),
        Err(_) => {
            loge!("Html: invalid selector '{css}'");
            Vec::new()
        }
    }
}

/// Visible text, entities and whitespace normalised.
pub fn element_text(el: ElementRef<'_>) -> String {
    let joined = el.text().collect::<Vec<_>>().join(" ");
    normalize_ws(&normalize_entities(&joined))
}

/// Lower-cased label with a trailing ':' removed.
pub fn label_key(s: &str) -> String {
    normalize_ws(s).trim_end_matches(':').trim().to_ascii_lowercase()
}

fn is_cell(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "td" | "th")
}

/// Direct `td`/`th` children of a row.
pub fn row_cells<'a>(tr: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    tr.children().filter_map(ElementRef::wrap).filter(is_cell).collect()
}

/// Text of each direct cell of each row in `table`.
pub fn table_rows(table: ElementRef<'_>) -> Vec<Vec<String>> {
    select_all(table, "tr")
        .into_iter()
        .map(|tr| row_cells(tr).into_iter().map(element_text).collect::<Vec<_>>())
        .filter(|r| !r.is_empty())
        .collect()
}

/// Every `td`/`th` of the document as normalised text, in document order.
/// Outer cells that wrap nested tables appear before their inner cells.
pub struct CellStream {
    cells: Vec<String>,
}

impl CellStream {
    pub fn new(doc: &Html) -> Self {
        let cells = select_all(doc.root_element(), "td, th")
            .into_iter()
            .map(element_text)
            .collect();
        Self { cells }
    }

    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    /// Index of the first cell whose text is exactly `label` (case-insensitive,
    /// trailing ':' optional).
    pub fn find_label(&self, label: &str) -> Option<usize> {
        let want = label_key(label);
        self.cells.iter().position(|c| label_key(c) == want)
    }

    /// Text of the cell right after the label cell; blank → `None`.
    pub fn value_after(&self, label: &str) -> Option<String> {
        let i = self.find_label(label)?;
        let v = self.cells.get(i + 1)?;
        // Next cell being another label means the value cell was empty.
        if v.ends_with(':') { None } else { non_empty(v) }
    }

    /// Checkbox-style lists: after `label`, every cell reading "X" marks the
    /// following cell as a checked item. Stops at the next `...:` label.
    pub fn checked_after(&self, label: &str) -> Vec<String> {
        let Some(start) = self.find_label(label) else { return Vec::new() };
        let mut out = Vec::new();
        let mut i = start + 1;
        while i < self.cells.len() {
            let c = &self.cells[i];
            if c.ends_with(':') && c.len() < 60 {
                break;
            }
            if c.eq_ignore_ascii_case("x") {
                if let Some(item) = self.cells.get(i + 1).filter(|s| !s.is_empty()) {
                    if !out.contains(item) {
                        out.push(item.clone());
                    }
                }
                i += 2;
                continue;
            }
            i += 1;
        }
        out
    }
}

/// One-shot label lookup over the whole document.
pub fn labeled_value(doc: &Html, label: &str) -> Option<String> {
    CellStream::new(doc).value_after(label)
}

/// Lower-cased visible text of the whole document.
pub fn document_text_lc(doc: &Html) -> String {
    element_text(doc.root_element()).to_ascii_lowercase()
}
