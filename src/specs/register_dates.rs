// src/specs/register_dates.rs
//! Scraping *spec* for the register list page.
//!
//! Dates show up as `<option value="20-FEB-26">` in the date picker and as
//! `pd_date=20-FEB-26` in links to the detail pages. Both are collected.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::core::dates::{human_label, parse_register_date, format_register_date};
use crate::core::html::select_all;
use crate::model::DateItem;

static PD_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)pd_date=(\d{2}-[a-z]{3}-\d{2})").expect("pd_date regex is valid")
});

pub fn parse(html: &str) -> Vec<DateItem> {
    let doc = Html::parse_document(html);
    let mut raw: Vec<String> = Vec::new();

    for opt in select_all(doc.root_element(), "option[value]") {
        if let Some(v) = opt.value().attr("value") {
            raw.push(s!(v));
        }
    }
    for a in select_all(doc.root_element(), "a[href]") {
        if let Some(href) = a.value().attr("href") {
            if let Some(caps) = PD_DATE_RE.captures(href) {
                raw.push(s!(&caps[1]));
            }
        }
    }

    let mut dates: Vec<_> = raw.iter().filter_map(|s| parse_register_date(s)).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    dates
        .into_iter()
        .map(|d| DateItem { fmcsa_date: format_register_date(d), label: human_label(d) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_and_links_merge_newest_first() {
        let html = r#"
            <select name="pd_date">
              <option value="18-feb-26">18-FEB-26</option>
              <option value="">-- pick --</option>
              <option value="20-FEB-26">20-FEB-26</option>
            </select>
            <a href="PKG_register.prc_reg_detail?pd_date=19-FEB-26&pv_vpath=LIVIEW">19</a>
            <a href="PKG_register.prc_reg_detail?pd_date=20-FEB-26&pv_vpath=LIVIEW">20</a>
            <a href="/elsewhere">x</a>"#;
        let got = parse(html);
        let codes: Vec<&str> = got.iter().map(|d| d.fmcsa_date.as_str()).collect();
        assert_eq!(codes, vec!["20-FEB-26", "19-FEB-26", "18-FEB-26"]);
        assert_eq!(got[0].label, "Friday, February 20, 2026");
    }

    #[test]
    fn nothing_to_find() {
        assert!(parse("<html><body>Maintenance</body></html>").is_empty());
    }
}
