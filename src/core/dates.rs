// src/core/dates.rs
//
// Register dates travel as `DD-MON-YY` (e.g. `20-FEB-26`).

use chrono::NaiveDate;

const REGISTER_FMT: &str = "%d-%b-%y";

/// Parse a register date; month names are matched case-insensitively.
pub fn parse_register_date(s: &str) -> Option<NaiveDate> {
    let t = s.trim();
    // "%d-%b-%y" would also accept "1-FEB-26"; the register always pads.
    let b = t.as_bytes();
    if b.len() != 9 || b[2] != b'-' || b[6] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(t, REGISTER_FMT).ok()
}

pub fn format_register_date(d: NaiveDate) -> String {
    d.format(REGISTER_FMT).to_string().to_ascii_uppercase()
}

/// Canonical upper-case form, or `None` if `s` is not a register date.
pub fn normalize_register_date(s: &str) -> Option<String> {
    parse_register_date(s).map(format_register_date)
}

/// "Friday, February 20, 2026"
pub fn human_label(d: NaiveDate) -> String {
    d.format("%A, %B %-d, %Y").to_string()
}

/// Newest first; unparseable dates sink to the end in string order.
pub fn sort_newest_first(dates: &mut [String]) {
    dates.sort_by(|a, b| {
        match (parse_register_date(a), parse_register_date(b)) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });
}
