// src/data.rs
//
// Light wrappers around canonical and view-layer register data.
//
// - RawData: canonical records (loaded from the store at startup).
//            Only SCRAPE is allowed to mutate it, via an explicit method.
// - SelectionView: derived (view) data produced from RawData by applying
//                 the date/category/search selection for on-screen display.

use std::collections::BTreeSet;

use crate::core::dates::sort_newest_first;
use crate::model::StoredRecord;
use crate::store::{DataSet, RecordStore, StoreError};

/// Authoritative, canonical register records, ordered by id.
#[derive(Clone, Debug, Default)]
pub struct RawData {
    records: Vec<StoredRecord>,
}

impl RawData {
    pub fn new(mut records: Vec<StoredRecord>) -> Self {
        records.sort_by_key(|r| r.id);
        Self { records }
    }

    pub fn load(store: &RecordStore) -> Result<Self, StoreError> {
        Ok(Self::new(store.load_all()?))
    }

    /// Read-only view of the records.
    pub fn records(&self) -> &[StoredRecord] { &self.records }

    /// Swap in freshly scraped rows for one date.
    /// This is the *only* mutator; keeps the rest of the app read-only.
    pub fn merge_from_scrape(&mut self, date: &str, fresh: Vec<StoredRecord>) {
        self.records.retain(|r| r.register_date.as_deref() != Some(date));
        self.records.extend(fresh);
        self.records.sort_by_key(|r| r.id);
    }

    /// Distinct register dates, newest first.
    pub fn dates(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().filter_map(|r| r.register_date.as_deref()).collect();
        let mut out: Vec<String> = set.into_iter().map(String::from).collect();
        sort_newest_first(&mut out);
        out
    }

    pub fn count_for(&self, date: &str) -> usize {
        self.records.iter().filter(|r| r.register_date.as_deref() == Some(date)).count()
    }

    /// Sorted categories across the given dates.
    pub fn categories_for(&self, dates: &[String]) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .filter(|r| r.register_date.as_ref().is_some_and(|d| dates.contains(d)))
            .map(|r| r.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        set.into_iter().map(String::from).collect()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Selection<'a> {
    pub dates: &'a [String],
    pub category: Option<&'a str>,
    pub search: &'a str,
}

impl<'a> Selection<'a> {
    #[inline] pub fn is_none(&self) -> bool { self.dates.is_empty() }

    pub fn matches(&self, r: &StoredRecord) -> bool {
        let Some(date) = r.register_date.as_ref() else { return false };
        if !self.dates.contains(date) {
            return false;
        }
        if let Some(cat) = self.category {
            if r.category != cat {
                return false;
            }
        }
        let needle = self.search.trim();
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        r.docket_number.to_lowercase().contains(&needle) || r.carrier_info.to_lowercase().contains(&needle)
    }
}

/// Zero-copy filtered view for display.
/// Holds list of record indexes into RawData.
#[derive(Clone, Debug)]
pub struct SelectionView<'a> {
    /// Positions of kept records in the raw data
    pub row_ix: Vec<usize>,
    raw: &'a RawData,
}

impl<'a> SelectionView<'a> {
    pub fn from_raw(raw: &'a RawData, sel: Selection<'_>) -> Self {
        if sel.is_none() {
            return Self { row_ix: vec![], raw };
        }
        let row_ix = raw
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| sel.matches(r))
            .map(|(i, _)| i)
            .collect();
        Self { row_ix, raw }
    }

    /// Number of rows in the projection.
    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    /// Borrow a single record by projected index (no cloning).
    pub fn record(&self, i: usize) -> Option<&'a StoredRecord> {
        self.row_ix.get(i).and_then(|&ix| self.raw.records.get(ix))
    }

    /// Materialize owned rows (for UI/export boundaries).
    pub fn to_owned_rows(&self) -> Vec<Vec<String>> {
        self.row_ix.iter().map(|&ix| self.raw.records[ix].to_row()).collect()
    }

    /// Build a view directly from precomputed indices.
    pub fn from_indices(raw: &'a RawData, row_ix: Vec<usize>) -> Self {
        Self { row_ix, raw }
    }

    pub fn to_dataset(&self) -> DataSet {
        DataSet { headers: Some(StoredRecord::headers()), rows: self.to_owned_rows() }
    }
}
