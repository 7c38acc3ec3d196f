// tests/register_parse.rs
//
// Register list/detail parsing against saved pages.

use fmcsa_scrape::specs::{register, register_dates};

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"))
}

#[test]
fn detail_page_entries_in_page_order() {
    let entries = register::parse(&fixture("register_20-FEB-26.html"));
    let dockets: Vec<&str> = entries.iter().map(|e| e.docket_number.as_str()).collect();
    assert_eq!(dockets, vec!["MC-123456", "MC-0042", "FF-9001", "MX-77", "MC-555"]);

    let first = &entries[0];
    assert_eq!(first.carrier_info, "ACME TRUCKING LLC - DALLAS, TX");
    assert_eq!(first.published_date.as_deref(), Some("02/20/2026"));
    assert_eq!(first.category, "NAME CHANGES");

    // &nbsp; inside carrier info collapses to plain spaces
    assert_eq!(entries[1].carrier_info, "BLUE RIDGE FREIGHT INC - ASHEVILLE, NC");
}

#[test]
fn sections_switch_category() {
    let entries = register::parse(&fixture("register_20-FEB-26.html"));
    let revocations: Vec<&str> = entries
        .iter()
        .filter(|e| e.category == "REVOCATIONS")
        .map(|e| e.docket_number.as_str())
        .collect();
    assert_eq!(revocations, vec!["FF-9001", "MX-77", "MC-555"]);
    assert_eq!(register::categories(&entries), vec!["NAME CHANGES", "REVOCATIONS"]);
}

#[test]
fn blank_published_cell_is_none() {
    let entries = register::parse(&fixture("register_20-FEB-26.html"));
    let mx = entries.iter().find(|e| e.docket_number == "MX-77").unwrap();
    assert_eq!(mx.published_date, None);
    assert_eq!(mx.carrier_info, "TRANSPORTES DEL NORTE SA DE CV - MONTERREY, NL");
}

#[test]
fn rows_before_any_heading_are_uncategorized() {
    let html = "<table>\
        <tr><td>MC-1</td><td>EARLY BIRD LLC</td><td>02/20/2026</td></tr>\
        <tr><td colspan=3>DISMISSALS</td></tr>\
        <tr><td>MC-2</td><td>LATE LLC</td></tr></table>";
    let entries = register::parse(html);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].category, "UNCATEGORIZED");
    assert_eq!(entries[1].category, "DISMISSALS");
    assert_eq!(entries[1].published_date, None);
}

#[test]
fn unpublished_page_yields_nothing() {
    assert!(register::parse(&fixture("register_empty.html")).is_empty());
}

#[test]
fn list_page_dates_newest_first() {
    let dates = register_dates::parse(&fixture("register_list.html"));
    let codes: Vec<&str> = dates.iter().map(|d| d.fmcsa_date.as_str()).collect();
    assert_eq!(codes, vec!["20-FEB-26", "19-FEB-26", "18-FEB-26", "31-DEC-25"]);
    assert_eq!(dates[0].label, "Friday, February 20, 2026");
    assert_eq!(dates[3].label, "Wednesday, December 31, 2025");
}
