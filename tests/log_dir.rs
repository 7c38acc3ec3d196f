// tests/log_dir.rs
//
// Log lines follow the store root picked at startup.

use fmcsa_scrape::{log, logf};
use tempfile::TempDir;

#[test]
fn log_lines_land_under_the_chosen_root() {
    let dir = TempDir::new().unwrap();
    log::set_log_dir(dir.path());

    logf!("Store: opened {}", "custom-root");

    let text = std::fs::read_to_string(dir.path().join("debug.log")).unwrap();
    assert!(text.contains("[INFO] Store: opened custom-root"), "{text}");
}
