// tests/selection_view.rs
//
// RawData + Selection → SelectionView without any UI.
//
use fmcsa_scrape::data::{RawData, Selection, SelectionView};
use fmcsa_scrape::model::StoredRecord;

fn rec(id: u64, date: &str, docket: &str, info: &str, cat: &str) -> StoredRecord {
    StoredRecord {
        id,
        docket_number: docket.into(),
        carrier_info: info.into(),
        published_date: None,
        category: cat.into(),
        scrape_date: None,
        register_date: Some(date.into()),
    }
}

fn raw() -> RawData {
    RawData::new(vec![
        rec(4, "20-FEB-26", "MC-4", "DELTA LINES", "REVOCATIONS"),
        rec(1, "19-FEB-26", "MC-1", "ALPHA FREIGHT", "NAME CHANGES"),
        rec(2, "19-FEB-26", "MC-2", "BRAVO HAUL", "REVOCATIONS"),
        rec(3, "20-FEB-26", "FF-3", "alpha forwarding", "DISMISSALS"),
    ])
}

fn dates(ds: &[&str]) -> Vec<String> {
    ds.iter().map(|d| d.to_string()).collect()
}

#[test]
fn none_all_partial() {
    let raw = raw();

    // None
    let sel = Selection { dates: &[], category: None, search: "" };
    assert!(SelectionView::from_raw(&raw, sel).is_empty());

    // All dates
    let all = raw.dates();
    assert_eq!(all, dates(&["20-FEB-26", "19-FEB-26"]));
    let view = SelectionView::from_raw(&raw, Selection { dates: &all, category: None, search: "" });
    assert_eq!(view.len(), 4);
    // Ordered by id regardless of load order
    let ids: Vec<u64> = (0..view.len()).filter_map(|i| view.record(i)).map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    // One date
    let one = dates(&["20-FEB-26"]);
    let view = SelectionView::from_raw(&raw, Selection { dates: &one, category: None, search: "" });
    assert_eq!(view.row_ix, vec![2, 3]);
}

#[test]
fn category_and_search_narrow() {
    let raw = raw();
    let all = raw.dates();

    let sel = Selection { dates: &all, category: Some("REVOCATIONS"), search: "" };
    let view = SelectionView::from_raw(&raw, sel);
    let dockets: Vec<&str> = (0..view.len()).filter_map(|i| view.record(i)).map(|r| r.docket_number.as_str()).collect();
    assert_eq!(dockets, vec!["MC-2", "MC-4"]);

    let sel = Selection { dates: &all, category: None, search: "  ALPHA " };
    let view = SelectionView::from_raw(&raw, sel);
    assert_eq!(view.len(), 2);

    let ds = view.to_dataset();
    assert_eq!(ds.header_count(), StoredRecord::HEADERS.len());
    assert_eq!(ds.rows[0][1], "MC-1");
}

#[test]
fn categories_follow_selected_dates() {
    let raw = raw();
    assert_eq!(raw.categories_for(&dates(&["19-FEB-26"])), vec!["NAME CHANGES", "REVOCATIONS"]);
    assert_eq!(raw.categories_for(&dates(&["20-FEB-26"])), vec!["DISMISSALS", "REVOCATIONS"]);
    assert!(raw.categories_for(&[]).is_empty());
}

#[test]
fn scrape_merge_replaces_one_date() {
    let mut raw = raw();
    raw.merge_from_scrape("19-FEB-26", vec![rec(9, "19-FEB-26", "MC-9", "ECHO", "TRANSFERS")]);
    assert_eq!(raw.count_for("19-FEB-26"), 1);
    assert_eq!(raw.count_for("20-FEB-26"), 2);
    assert_eq!(raw.records().last().map(|r| r.id), Some(9));
}
