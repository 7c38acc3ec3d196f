// src/specs/register.rs
//! Scraping *spec* for one FMCSA Register date.
//!
//! Page layout (li-public `prc_reg_detail`): one or more tables; each section
//! starts with a heading (a single-cell row, or an `h2`-`h4`/`caption` element)
//! such as `NAME CHANGES` or `REVOCATIONS`, followed by a column-header row and
//! then one row per docket:
//!
//! ```text
//! <tr><th>MC-123456</th><td>ACME TRUCKING LLC - DALLAS, TX</td><td>02/19/2026</td></tr>
//! ```
//!
//! Output rows keep page order. Rows seen before any heading are filed under
//! `UNCATEGORIZED`.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::config::consts::{REGISTER_DETAIL_URL, UNCATEGORIZED};
use crate::core::html::{element_text, row_cells, select_all};
use crate::model::RegisterEntry;

static DOCKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(MC|FF|MX)\s*-?\s*(\d+)").expect("docket regex is valid")
});
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("published date regex is valid"));

/// Column titles that look like headings but are not.
const NOT_HEADINGS: &[&str] = &[
    "NUMBER", "TITLE", "DECIDED", "PUBLISHED", "DOCKET", "DOCKET NUMBER", "DATE",
    "APPLICANT", "CARRIER", "NAME",
];

pub fn detail_url(register_date: &str) -> String {
    REGISTER_DETAIL_URL.replace("{date}", register_date)
}

/// `MC 0123` / `mc-0123` → `MC-0123`. `None` if `cell` does not start with a docket.
pub fn normalize_docket(cell: &str) -> Option<String> {
    let caps = DOCKET_RE.captures(cell.trim())?;
    Some(format!("{}-{}", caps[1].to_ascii_uppercase(), &caps[2]))
}

fn is_published_date(cell: &str) -> bool {
    DATE_RE.is_match(cell.trim())
}

/// Section headings are upper-case prose without a docket.
fn as_heading(text: &str) -> Option<String> {
    let t = text.trim();
    let letters = t.chars().filter(|c| c.is_alphabetic()).count();
    if letters < 4 || t.chars().any(|c| c.is_lowercase()) {
        return None;
    }
    if normalize_docket(t).is_some() || NOT_HEADINGS.contains(&t) {
        return None;
    }
    if t.starts_with("FMCSA REGISTER") {
        return None;
    }
    Some(s!(t))
}

/// Build an entry from one row's cell texts, if the row carries a docket.
fn entry_from_cells(cells: &[String], category: &str) -> Option<RegisterEntry> {
    let first = cells.iter().position(|c| !c.is_empty())?;
    let docket_number = normalize_docket(&cells[first])?;

    let rest = &cells[first + 1..];
    let published_date = rest.iter().find(|c| is_published_date(c)).cloned();
    let carrier_info = rest
        .iter()
        .find(|c| !c.is_empty() && !is_published_date(c))
        .cloned()
        .unwrap_or_default();

    Some(RegisterEntry {
        docket_number,
        carrier_info,
        published_date,
        category: s!(category),
    })
}

/// Parse a register detail page.
pub fn parse(html: &str) -> Vec<RegisterEntry> {
    let doc = Html::parse_document(html);
    let mut category = s!(UNCATEGORIZED);
    let mut out = Vec::new();

    // Headings and rows interleave in document order.
    for el in select_all(doc.root_element(), "h2, h3, h4, caption, tr") {
        if el.value().name() != "tr" {
            if let Some(h) = as_heading(&element_text(el)) {
                category = h;
            }
            continue;
        }

        let cell_els = row_cells(el);
        // Layout rows wrapping a nested table; their inner rows come next.
        if cell_els.iter().any(|c| !select_all(*c, "table").is_empty()) {
            continue;
        }
        let cells: Vec<String> = cell_els.into_iter().map(element_text).collect();
        if cells.is_empty() {
            continue;
        }

        if let Some(entry) = entry_from_cells(&cells, &category) {
            out.push(entry);
            continue;
        }

        // Heading row: exactly one non-empty cell.
        let mut non_empty = cells.iter().filter(|c| !c.is_empty());
        if let (Some(only), None) = (non_empty.next(), non_empty.next()) {
            if let Some(h) = as_heading(only) {
                category = h;
            }
        }
    }

    logd!("Register: parsed {} entries", out.len());
    out
}

/// Distinct categories in first-seen order.
pub fn categories(entries: &[RegisterEntry]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for e in entries {
        if !out.contains(&e.category) {
            out.push(e.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dockets() {
        assert_eq!(normalize_docket("MC-123456").as_deref(), Some("MC-123456"));
        assert_eq!(normalize_docket("mc 0042 ").as_deref(), Some("MC-0042"));
        assert_eq!(normalize_docket("FF123").as_deref(), Some("FF-123"));
        assert_eq!(normalize_docket("MCX-1"), None);
        assert_eq!(normalize_docket("MC-123456789").as_deref(), Some("MC-123456789"));
        assert_eq!(normalize_docket("MC-1234A").as_deref(), Some("MC-1234"));
        assert_eq!(normalize_docket("NAME CHANGES"), None);
    }

    #[test]
    fn headings() {
        assert_eq!(as_heading("REVOCATIONS").as_deref(), Some("REVOCATIONS"));
        assert_eq!(as_heading("CERTIFICATES, PERMITS AND LICENSES").as_deref(),
            Some("CERTIFICATES, PERMITS AND LICENSES"));
        assert_eq!(as_heading("Number"), None);
        assert_eq!(as_heading("NUMBER"), None);
        assert_eq!(as_heading("MC-1"), None);
        assert_eq!(as_heading("02/19/2026"), None);
    }

    #[test]
    fn row_without_date_or_info() {
        let cells = vec![s!(""), s!("MC-9"), s!("")];
        let e = entry_from_cells(&cells, "DISMISSALS").unwrap();
        assert_eq!(e.docket_number, "MC-9");
        assert_eq!(e.carrier_info, "");
        assert_eq!(e.published_date, None);
        assert_eq!(e.category, "DISMISSALS");
    }

    #[test]
    fn detail_url_carries_date() {
        assert!(detail_url("20-FEB-26").contains("pd_date=20-FEB-26"));
    }
}
