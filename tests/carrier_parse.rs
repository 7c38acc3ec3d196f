// tests/carrier_parse.rs
//
// SAFER snapshot parsing against saved pages.

use fmcsa_scrape::model::{CrashCounts, InspectionRow};
use fmcsa_scrape::specs::carrier;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"))
}

#[test]
fn labeled_fields() {
    let p = carrier::parse(&fixture("carrier_snapshot.html")).expect("profile");
    assert_eq!(p.legal_name.as_deref(), Some("ACME TRUCKING LLC"));
    assert_eq!(p.dba_name, None);
    assert_eq!(p.entity_type.as_deref(), Some("CARRIER"));
    assert_eq!(p.operating_status.as_deref(), Some("ACTIVE"));
    assert_eq!(p.out_of_service_date, None);
    assert_eq!(p.physical_address.as_deref(), Some("100 MAIN ST DALLAS, TX 75201"));
    assert_eq!(p.mailing_address.as_deref(), Some("PO BOX 9 DALLAS, TX 75202"));
    assert_eq!(p.phone.as_deref(), Some("(214) 555-0100"));
    assert_eq!(p.usdot_number.as_deref(), Some("1234567"));
    assert_eq!(p.mc_number.as_deref(), Some("MC-123456"));
    assert_eq!(p.power_units.as_deref(), Some("12"));
    assert_eq!(p.drivers.as_deref(), Some("14"));
    assert_eq!(p.mcs150_date.as_deref(), Some("01/15/2026"));
    assert_eq!(p.mcs150_mileage.as_deref(), Some("250,000 (2025)"));
}

#[test]
fn protected_email_is_decoded() {
    let p = carrier::parse(&fixture("carrier_snapshot.html")).expect("profile");
    assert_eq!(p.email.as_deref(), Some("dispatch@acmetrucking.com"));
}

#[test]
fn checked_lists() {
    let p = carrier::parse(&fixture("carrier_snapshot.html")).expect("profile");
    assert_eq!(p.operation_classification, vec!["Auth. For Hire", "U.S. Mail"]);
    assert_eq!(p.carrier_operation, vec!["Interstate"]);
    assert_eq!(p.cargo_carried, vec!["General Freight", "Building Materials"]);
}

#[test]
fn us_safety_tables() {
    let p = carrier::parse(&fixture("carrier_snapshot.html")).expect("profile");
    let kinds: Vec<&str> = p.safety.inspections.iter().map(|r| r.kind.as_str()).collect();
    assert_eq!(kinds, vec!["Vehicle", "Driver", "Hazmat", "Iep"]);
    assert_eq!(
        p.safety.inspections[0],
        InspectionRow {
            kind: "Vehicle".into(),
            inspections: Some(10),
            out_of_service: Some(2),
            oos_percent: Some("20%".into()),
            national_average: Some("22.26%".into()),
        }
    );
    assert_eq!(p.safety.inspections[3].national_average.as_deref(), Some("N/A"));
    assert_eq!(
        p.safety.crashes,
        Some(CrashCounts { fatal: Some(0), injury: Some(1), tow: Some(2), total: Some(3) })
    );
}

#[test]
fn not_found_page_is_none() {
    assert_eq!(carrier::parse(&fixture("carrier_not_found.html")), None);
}
