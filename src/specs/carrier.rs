// src/specs/carrier.rs
//! Scraping *spec* for the SAFER company snapshot.
//!
//! The snapshot is a stack of nested tables with `th` labels ("Legal Name:")
//! and `td` values, checkbox grids for operation/cargo, and two summary tables
//! for inspections and crashes. Labels are looked up on the flattened cell
//! stream (see `core::html::CellStream`), which survives the nesting.
//!
//! The email, when present, is Cloudflare-protected and decoded here.

use scraper::{ElementRef, Html};

use crate::config::consts::SNAPSHOT_URL;
use crate::core::cfemail;
use crate::core::html::{document_text_lc, select_all, table_rows, CellStream};
use crate::core::sanitize::parse_count;
use crate::model::{CarrierProfile, CarrierQuery, CrashCounts, InspectionRow, SafetySummary};

const NOT_FOUND_MARKERS: &[&str] = &["record not found", "no records matching", "record inactive"];

pub fn snapshot_url(query: &CarrierQuery) -> String {
    SNAPSHOT_URL
        .replace("{param}", query.param())
        .replace("{value}", query.value())
}

/// Parse a snapshot page. `None` when SAFER reports no such carrier or the
/// page carries none of the expected fields.
pub fn parse(html: &str) -> Option<CarrierProfile> {
    let doc = Html::parse_document(html);

    let text = document_text_lc(&doc);
    if NOT_FOUND_MARKERS.iter().any(|m| text.contains(m)) {
        logd!("Carrier: snapshot reports no record");
        return None;
    }

    let cells = CellStream::new(&doc);
    let get = |label: &str| cells.value_after(label);

    let profile = CarrierProfile {
        legal_name: get("Legal Name"),
        dba_name: get("DBA Name"),
        entity_type: get("Entity Type"),
        operating_status: get("USDOT Status").or_else(|| get("Operating Status")),
        out_of_service_date: get("Out of Service Date").filter(|v| !v.eq_ignore_ascii_case("none")),
        physical_address: get("Physical Address"),
        mailing_address: get("Mailing Address"),
        phone: get("Phone"),
        email: cfemail::find_protected_email(&doc).or_else(|| get("Email").filter(|v| v.contains('@'))),
        usdot_number: get("USDOT Number"),
        mc_number: get("MC/MX/FF Number(s)"),
        power_units: get("Power Units"),
        drivers: get("Drivers"),
        mcs150_date: get("MCS-150 Form Date"),
        mcs150_mileage: get("MCS-150 Mileage (Year)"),
        operation_classification: cells.checked_after("Operation Classification"),
        carrier_operation: cells.checked_after("Carrier Operation"),
        cargo_carried: cells.checked_after("Cargo Carried"),
        safety: parse_safety(&doc),
    };

    if profile.is_empty() {
        logd!("Carrier: no snapshot fields found ({} cells)", cells.len());
        None
    } else {
        Some(profile)
    }
}

/* ---------- safety tables ---------- */

fn parse_safety(doc: &Html) -> SafetySummary {
    let tables = select_all(doc.root_element(), "table");
    SafetySummary {
        inspections: tables.iter().find_map(|t| inspection_table(*t)).unwrap_or_default(),
        crashes: tables.iter().find_map(|t| crash_table(*t)),
    }
}

/// Header row `Inspection Type | Vehicle | Driver | Hazmat | Iep`, then one
/// row each for counts, OOS, OOS % and national average.
/// The first matching table is the US one; Canada follows it.
fn inspection_table(table: ElementRef<'_>) -> Option<Vec<InspectionRow>> {
    let rows = table_rows(table);
    let header = rows.first()?;
    if !header.first()?.to_ascii_lowercase().contains("inspection type") {
        return None;
    }
    // Nested wrappers also contain the header text; insist on a tight table.
    if header.len() < 2 || rows.len() > 8 {
        return None;
    }

    let counts = row_starting(&rows, |c| c.starts_with("inspections"));
    let oos = row_starting(&rows, |c| c.starts_with("out of service") && !c.contains('%'));
    let pct = row_starting(&rows, |c| c.starts_with("out of service") && c.contains('%'));
    let avg = row_starting(&rows, |c| c.starts_with("nat"));

    let cell = |row: Option<&Vec<String>>, i: usize| row.and_then(|r| r.get(i)).cloned();
    let out: Vec<InspectionRow> = header
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, kind)| InspectionRow {
            kind: kind.clone(),
            inspections: cell(counts, i).and_then(|v| parse_count(&v)),
            out_of_service: cell(oos, i).and_then(|v| parse_count(&v)),
            oos_percent: cell(pct, i).filter(|v| !v.is_empty()),
            national_average: cell(avg, i).filter(|v| !v.is_empty()),
        })
        .collect();
    Some(out)
}

/// First body row whose lower-cased row label satisfies `pred`.
fn row_starting(rows: &[Vec<String>], pred: impl Fn(&str) -> bool) -> Option<&Vec<String>> {
    rows.iter()
        .skip(1)
        .find(|r| r.first().map(|c| pred(&c.to_ascii_lowercase())).unwrap_or(false))
}

/// Header row `Type | Fatal | Injury | Tow | Total`, then `Crashes | …`.
fn crash_table(table: ElementRef<'_>) -> Option<CrashCounts> {
    let rows = table_rows(table);
    if rows.len() > 4 {
        return None;
    }
    let header: Vec<String> = rows.first()?.iter().map(|h| h.to_ascii_lowercase()).collect();
    if !header.iter().any(|h| h == "fatal") {
        return None;
    }
    let data = rows
        .iter()
        .skip(1)
        .find(|r| r.first().map(|c| c.eq_ignore_ascii_case("crashes")).unwrap_or(false))?;

    let col = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .and_then(|i| data.get(i))
            .and_then(|v| parse_count(v))
    };
    Some(CrashCounts {
        fatal: col("fatal"),
        injury: col("injury"),
        tow: col("tow"),
        total: col("total"),
    })
}
