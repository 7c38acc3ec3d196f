// tests/store_query.rs
//
// RecordStore refresh + query semantics on a temp directory.

use fmcsa_scrape::model::RegisterEntry;
use fmcsa_scrape::store::{QueryError, RecordQuery, RecordStore, StoreError};
use tempfile::TempDir;

fn entry(docket: &str, info: &str, category: &str) -> RegisterEntry {
    RegisterEntry {
        docket_number: docket.into(),
        carrier_info: info.into(),
        published_date: Some("02/20/2026".into()),
        category: category.into(),
    }
}

fn seeded() -> (TempDir, RecordStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = RecordStore::new(dir.path());
    store
        .replace_date("19-FEB-26", &[
            entry("MC-1", "ALPHA FREIGHT LLC - AUSTIN, TX", "NAME CHANGES"),
            entry("MC-2", "BRAVO LINES INC - BOISE, ID", "REVOCATIONS"),
        ])
        .expect("seed 19");
    store
        .replace_date("20-FEB-26", &[
            entry("MC-3", "CHARLIE CARTAGE - CHICAGO, IL", "DISMISSALS"),
            entry("FF-4", "Alpha Forwarding - Miami, FL", "REVOCATIONS"),
            entry("MX-5", "DELTA TRANSPORTES - MONTERREY, NL", "REVOCATIONS"),
        ])
        .expect("seed 20");
    (dir, store)
}

#[test]
fn ids_are_unique_across_dates() {
    let (_dir, store) = seeded();
    let all = store.load_all().unwrap();
    let ids: Vec<u64> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(all.iter().all(|r| r.scrape_date.as_deref().is_some_and(|s| s.ends_with('Z'))));
    assert_eq!(all[0].register_date.as_deref(), Some("19-FEB-26"));
}

#[test]
fn replace_swaps_rows_for_one_date_only() {
    let (_dir, store) = seeded();
    let n = store
        .replace_date("19-FEB-26", &[entry("MC-9", "ECHO EXPRESS", "TRANSFERS")])
        .unwrap();
    assert_eq!(n, 1);

    let nineteenth = store.load_date("19-FEB-26").unwrap();
    assert_eq!(nineteenth.len(), 1);
    assert_eq!(nineteenth[0].docket_number, "MC-9");
    assert_eq!(nineteenth[0].id, 6);
    assert_eq!(store.load_date("20-FEB-26").unwrap().len(), 3);
}

#[test]
fn stored_dates_newest_first_by_calendar() {
    let (_dir, store) = seeded();
    store.replace_date("31-DEC-25", &[entry("MC-7", "OLD YEAR LLC", "NAME CHANGES")]).unwrap();
    assert_eq!(store.stored_dates().unwrap(), vec!["20-FEB-26", "19-FEB-26", "31-DEC-25"]);

    // Emptying a date removes it.
    store.replace_date("31-DEC-25", &[]).unwrap();
    assert_eq!(store.stored_dates().unwrap(), vec!["20-FEB-26", "19-FEB-26"]);
}

#[test]
fn empty_store_is_fine() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path().join("nothing-here"));
    assert!(store.stored_dates().unwrap().is_empty());
    let page = store.query(&RecordQuery::default()).unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[test]
fn query_filters_and_categories() {
    let (_dir, store) = seeded();

    let q = RecordQuery { register_date: Some("20-FEB-26".into()), ..Default::default() };
    let page = store.query(&q).unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.categories, vec!["DISMISSALS", "REVOCATIONS"]);

    // Category narrows items but not the category list.
    let q = RecordQuery { category: Some("REVOCATIONS".into()), ..q };
    let page = store.query(&q).unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.categories, vec!["DISMISSALS", "REVOCATIONS"]);

    // Search is case-insensitive over docket and carrier info, across dates.
    let q = RecordQuery { search: Some("alpha".into()), ..Default::default() };
    let page = store.query(&q).unwrap();
    let dockets: Vec<&str> = page.items.iter().map(|r| r.docket_number.as_str()).collect();
    assert_eq!(dockets, vec!["MC-1", "FF-4"]);
    assert_eq!(page.categories, vec!["DISMISSALS", "NAME CHANGES", "REVOCATIONS"]);

    let q = RecordQuery { search: Some("mx-".into()), ..Default::default() };
    assert_eq!(store.query(&q).unwrap().total, 1);

    // Blank filters are ignored.
    let q = RecordQuery { category: Some(" ".into()), search: Some(String::new()), ..Default::default() };
    assert_eq!(store.query(&q).unwrap().total, 5);
}

#[test]
fn skip_and_limit_page_by_id() {
    let (_dir, store) = seeded();
    let q = RecordQuery { skip: 1, limit: 2, ..Default::default() };
    let page = store.query(&q).unwrap();
    let ids: Vec<u64> = page.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(page.total, 5);

    let q = RecordQuery { skip: 10, ..Default::default() };
    assert!(store.query(&q).unwrap().items.is_empty());
}

#[test]
fn limit_out_of_range_is_rejected() {
    let (_dir, store) = seeded();
    for limit in [0, 2001] {
        let q = RecordQuery { limit, ..Default::default() };
        assert!(matches!(store.query(&q), Err(StoreError::Query(QueryError::Limit(l))) if l == limit));
    }
    let q = RecordQuery { limit: 2000, ..Default::default() };
    assert!(store.query(&q).is_ok());
}

#[test]
fn bad_date_never_touches_disk() {
    let (dir, store) = seeded();
    assert!(matches!(store.replace_date("../escape", &[]), Err(StoreError::BadDate(_))));
    assert!(!dir.path().join("escape.csv").exists());
}

#[test]
fn commas_and_quotes_survive_the_csv() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    store
        .replace_date("20-FEB-26", &[entry("MC-1", "SMITH, \"BIG\" JOHN - TULSA, OK", "NAME CHANGES")])
        .unwrap();
    let back = store.load_date("20-FEB-26").unwrap();
    assert_eq!(back[0].carrier_info, "SMITH, \"BIG\" JOHN - TULSA, OK");
}

#[test]
fn failed_refresh_keeps_previous_rows() {
    let (dir, store) = seeded();
    // A directory where the temp file should go makes the write fail.
    std::fs::create_dir(dir.path().join("register").join("20-FEB-26.csv.tmp")).unwrap();

    let res = store.replace_date("20-FEB-26", &[entry("MC-8", "FOXTROT FREIGHT", "TRANSFERS")]);
    assert!(matches!(res, Err(StoreError::Io(_))));

    let kept: Vec<String> = store
        .load_date("20-FEB-26")
        .unwrap()
        .into_iter()
        .map(|r| r.docket_number)
        .collect();
    assert_eq!(kept, vec!["MC-3", "FF-4", "MX-5"]);
}

#[test]
fn refreshing_the_newest_date_never_reuses_ids() {
    let (_dir, store) = seeded();
    let before = store.load_all().unwrap().iter().map(|r| r.id).max().unwrap();

    store.replace_date("20-FEB-26", &[entry("MC-8", "FOXTROT FREIGHT", "TRANSFERS")]).unwrap();
    let first = store.load_date("20-FEB-26").unwrap();
    assert!(first.iter().all(|r| r.id > before), "{first:?}");

    // Same again after the date was emptied out entirely.
    store.replace_date("20-FEB-26", &[]).unwrap();
    store.replace_date("20-FEB-26", &[entry("MC-9", "GOLF LINES", "TRANSFERS")]).unwrap();
    let second = store.load_date("20-FEB-26").unwrap();
    assert!(second[0].id > first[0].id, "{second:?}");
}
