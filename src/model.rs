// src/model.rs
//
// Flat record shapes shared by specs, store, GUI and CLI.
// Optional fields default to empty; nothing here enforces lifecycle.

use serde::{Deserialize, Serialize};

/* ---------------- Register ---------------- */

/// One register line as read off the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEntry {
    pub docket_number: String,
    pub carrier_info: String,
    pub published_date: Option<String>,
    pub category: String,
}

/// A register line after it went through the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: u64,
    pub docket_number: String,
    pub carrier_info: String,
    pub published_date: Option<String>,
    pub category: String,
    pub scrape_date: Option<String>,
    pub register_date: Option<String>,
}

impl StoredRecord {
    pub const HEADERS: [&'static str; 7] = [
        "id",
        "docket_number",
        "carrier_info",
        "published_date",
        "category",
        "scrape_date",
        "register_date",
    ];

    pub const CATEGORY_COL: usize = 4;

    pub fn headers() -> Vec<String> {
        Self::HEADERS.iter().map(|h| s!(*h)).collect()
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.docket_number.clone(),
            self.carrier_info.clone(),
            self.published_date.clone().unwrap_or_default(),
            self.category.clone(),
            self.scrape_date.clone().unwrap_or_default(),
            self.register_date.clone().unwrap_or_default(),
        ]
    }

    /// Inverse of `to_row`. Short rows or a bad id yield `None`.
    pub fn from_row(row: &[String]) -> Option<Self> {
        if row.len() < Self::HEADERS.len() {
            return None;
        }
        let opt = |s: &String| if s.is_empty() { None } else { Some(s.clone()) };
        Some(Self {
            id: row[0].trim().parse().ok()?,
            docket_number: row[1].clone(),
            carrier_info: row[2].clone(),
            published_date: opt(&row[3]),
            category: row[4].clone(),
            scrape_date: opt(&row[5]),
            register_date: opt(&row[6]),
        })
    }
}

/// A register date offered upstream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateItem {
    /// `DD-MON-YY`, as the register URL expects it.
    pub fmcsa_date: String,
    pub label: String,
}

/* ---------------- Carrier ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CarrierQuery {
    UsDot(String),
    Mc(String),
}

impl CarrierQuery {
    /// Accepts digits with an optional `MC`, `MX`, `USDOT` or `DOT` prefix.
    /// MX dockets share SAFER's `MC_MX` lookup.
    pub fn parse(input: &str, default_mc: bool) -> Option<Self> {
        let up = input.trim().to_ascii_uppercase();
        let (is_mc, rest) = if let Some(r) = up.strip_prefix("MC").or_else(|| up.strip_prefix("MX")) {
            (true, r)
        } else if let Some(r) = up.strip_prefix("USDOT") {
            (false, r)
        } else if let Some(r) = up.strip_prefix("DOT") {
            (false, r)
        } else {
            (default_mc, up.as_str())
        };
        let digits = rest.trim_start_matches([' ', '-', '#', ':']).trim();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let digits = digits.trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };
        Some(if is_mc { CarrierQuery::Mc(s!(digits)) } else { CarrierQuery::UsDot(s!(digits)) })
    }

    /// `query_param` value for the SAFER snapshot URL.
    pub fn param(&self) -> &'static str {
        match self {
            CarrierQuery::UsDot(_) => "USDOT",
            CarrierQuery::Mc(_) => "MC_MX",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            CarrierQuery::UsDot(v) | CarrierQuery::Mc(v) => v,
        }
    }
}

impl std::fmt::Display for CarrierQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CarrierQuery::UsDot(v) => write!(f, "USDOT {v}"),
            CarrierQuery::Mc(v) => write!(f, "MC-{v}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierProfile {
    pub legal_name: Option<String>,
    pub dba_name: Option<String>,
    pub entity_type: Option<String>,
    pub operating_status: Option<String>,
    pub out_of_service_date: Option<String>,
    pub physical_address: Option<String>,
    pub mailing_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub usdot_number: Option<String>,
    pub mc_number: Option<String>,
    pub power_units: Option<String>,
    pub drivers: Option<String>,
    pub mcs150_date: Option<String>,
    pub mcs150_mileage: Option<String>,
    pub operation_classification: Vec<String>,
    pub carrier_operation: Vec<String>,
    pub cargo_carried: Vec<String>,
    pub safety: SafetySummary,
}

impl CarrierProfile {
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_none())
            && self.operation_classification.is_empty()
            && self.carrier_operation.is_empty()
            && self.cargo_carried.is_empty()
            && self.safety.is_empty()
    }

    /// Scalar fields with display labels, in snapshot order.
    pub fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Legal Name", self.legal_name.as_deref()),
            ("DBA Name", self.dba_name.as_deref()),
            ("Entity Type", self.entity_type.as_deref()),
            ("Operating Status", self.operating_status.as_deref()),
            ("Out of Service Date", self.out_of_service_date.as_deref()),
            ("Physical Address", self.physical_address.as_deref()),
            ("Mailing Address", self.mailing_address.as_deref()),
            ("Phone", self.phone.as_deref()),
            ("Email", self.email.as_deref()),
            ("USDOT Number", self.usdot_number.as_deref()),
            ("MC/MX/FF Number(s)", self.mc_number.as_deref()),
            ("Power Units", self.power_units.as_deref()),
            ("Drivers", self.drivers.as_deref()),
            ("MCS-150 Form Date", self.mcs150_date.as_deref()),
            ("MCS-150 Mileage (Year)", self.mcs150_mileage.as_deref()),
        ]
    }
}

/// Inspection / out-of-service counts and crash totals from the snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySummary {
    pub inspections: Vec<InspectionRow>,
    pub crashes: Option<CrashCounts>,
}

impl SafetySummary {
    pub fn is_empty(&self) -> bool {
        self.inspections.is_empty() && self.crashes.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRow {
    /// "Vehicle", "Driver", "Hazmat" or "IEP".
    pub kind: String,
    pub inspections: Option<u32>,
    pub out_of_service: Option<u32>,
    pub oos_percent: Option<String>,
    pub national_average: Option<String>,
}

fn cell_u32(v: Option<u32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| s!("-"))
}

fn cell_str(v: &Option<String>) -> String {
    v.clone().unwrap_or_else(|| s!("-"))
}

impl InspectionRow {
    pub const HEADERS: [&'static str; 5] = ["Type", "Inspections", "Out of Service", "OOS %", "Nat'l Average %"];

    /// Display cells, `-` for blanks.
    pub fn cells(&self) -> [String; 5] {
        [
            self.kind.clone(),
            cell_u32(self.inspections),
            cell_u32(self.out_of_service),
            cell_str(&self.oos_percent),
            cell_str(&self.national_average),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashCounts {
    pub fatal: Option<u32>,
    pub injury: Option<u32>,
    pub tow: Option<u32>,
    pub total: Option<u32>,
}

impl CrashCounts {
    pub const HEADERS: [&'static str; 4] = ["Fatal", "Injury", "Tow", "Total"];

    pub fn cells(&self) -> [String; 4] {
        [cell_u32(self.fatal), cell_u32(self.injury), cell_u32(self.tow), cell_u32(self.total)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_query_prefixes() {
        assert_eq!(CarrierQuery::parse("MC-012345", false), Some(CarrierQuery::Mc(s!("12345"))));
        assert_eq!(CarrierQuery::parse("usdot 99", true), Some(CarrierQuery::UsDot(s!("99"))));
        assert_eq!(CarrierQuery::parse("  77 ", true), Some(CarrierQuery::Mc(s!("77"))));
        assert_eq!(CarrierQuery::parse("77a", false), None);
        assert_eq!(CarrierQuery::parse("MC", false), None);
        assert_eq!(CarrierQuery::parse("MX-00777", false), Some(CarrierQuery::Mc(s!("777"))));
        assert_eq!(CarrierQuery::parse("mx 42", false).map(|q| q.param()), Some("MC_MX"));
    }

    #[test]
    fn stored_record_row_shape() {
        let rec = StoredRecord {
            id: 9,
            docket_number: s!("MC-1"),
            carrier_info: s!("ACME, DALLAS, TX"),
            published_date: None,
            category: s!("REVOCATIONS"),
            scrape_date: Some(s!("2026-02-20T10:00:00Z")),
            register_date: Some(s!("20-FEB-26")),
        };
        let row = rec.to_row();
        assert_eq!(row.len(), StoredRecord::HEADERS.len());
        assert_eq!(row[3], "");
        assert_eq!(StoredRecord::from_row(&row), Some(rec));
        assert_eq!(StoredRecord::from_row(&row[..3]), None);
    }

    #[test]
    fn empty_profile_is_empty() {
        assert!(CarrierProfile::default().is_empty());
        let p = CarrierProfile { phone: Some(s!("(555) 555-0100")), ..Default::default() };
        assert!(!p.is_empty());
    }
}
