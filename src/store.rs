// src/store.rs
//
// Local record store. One CSV per register date under `<root>/register/`,
// header row first. Ids are unique across the whole store.

use std::{
    collections::BTreeSet,
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{SecondsFormat, Utc};
use thiserror::Error;

use crate::config::consts::{DEFAULT_LIMIT, ID_MARK_FILE, MAX_LIMIT, REGISTER_SUBDIR, STORE_DIR, STORE_SEP};
use crate::core::dates::{parse_register_date, sort_newest_first};
use crate::csv::{parse_rows, write_row};
use crate::model::{RegisterEntry, StoredRecord};

/// Serialises id allocation + file replacement inside this process.
static WRITE_LOCK: Mutex<()> = Mutex::new(());

/// Headers + rows, the shape the GUI table and exports work on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn row_count(&self) -> usize { self.rows.len() }
    pub fn header_count(&self) -> usize { self.headers.as_ref().map(|h| h.len()).unwrap_or(0) }

    pub fn from_records(records: &[StoredRecord]) -> Self {
        Self {
            headers: Some(StoredRecord::headers()),
            rows: records.iter().map(StoredRecord::to_row).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("limit must be between 1 and {max}, got {0}", max = MAX_LIMIT)]
    Limit(usize),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("not a register date: {0}")]
    BadDate(String),
}

/// Record filters. Empty strings behave like `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordQuery {
    pub register_date: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub skip: usize,
    pub limit: usize,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self { register_date: None, category: None, search: None, skip: 0, limit: DEFAULT_LIMIT }
    }
}

fn filled(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl RecordQuery {
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(QueryError::Limit(self.limit));
        }
        Ok(())
    }

    fn matches_date(&self, r: &StoredRecord) -> bool {
        match filled(&self.register_date) {
            Some(d) => r.register_date.as_deref() == Some(d),
            None => true,
        }
    }

    /// Date, category and search filters together.
    pub fn matches(&self, r: &StoredRecord) -> bool {
        if !self.matches_date(r) {
            return false;
        }
        if let Some(c) = filled(&self.category) {
            if r.category != c {
                return false;
            }
        }
        if let Some(needle) = filled(&self.search) {
            let needle = needle.to_lowercase();
            return r.docket_number.to_lowercase().contains(&needle)
                || r.carrier_info.to_lowercase().contains(&needle);
        }
        true
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordPage {
    pub items: Vec<StoredRecord>,
    /// Matches before skip/limit.
    pub total: usize,
    /// Sorted categories for the date filter alone.
    pub categories: Vec<String>,
}

/// Apply a query to records already in memory.
pub fn query_records(records: &[StoredRecord], q: &RecordQuery) -> Result<RecordPage, QueryError> {
    q.validate()?;

    let mut matched: Vec<&StoredRecord> = records.iter().filter(|r| q.matches(r)).collect();
    matched.sort_by_key(|r| r.id);
    let total = matched.len();

    let categories: BTreeSet<&str> = records
        .iter()
        .filter(|r| q.matches_date(r))
        .map(|r| r.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();

    let items = matched.into_iter().skip(q.skip).take(q.limit).cloned().collect();

    Ok(RecordPage {
        items,
        total,
        categories: categories.into_iter().map(String::from).collect(),
    })
}

#[derive(Clone, Debug)]
pub struct RecordStore {
    root: PathBuf,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(STORE_DIR)
    }
}

impl RecordStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path { &self.root }

    fn register_dir(&self) -> PathBuf {
        self.root.join(REGISTER_SUBDIR)
    }

    fn date_path(&self, date: &str) -> Result<PathBuf, StoreError> {
        // Dates double as file names; only the validated shape gets through.
        if parse_register_date(date).is_none() {
            return Err(StoreError::BadDate(s!(date)));
        }
        Ok(self.register_dir().join(format!("{date}.csv")))
    }

    fn read_file(path: &Path) -> io::Result<Vec<StoredRecord>> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut rows = parse_rows(&text, STORE_SEP);
        if rows.first().map(|r| r.first().map(String::as_str) == Some("id")).unwrap_or(false) {
            rows.remove(0);
        }
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            match StoredRecord::from_row(&row) {
                Some(r) => out.push(r),
                None => loge!("Store: skipping malformed row in {}: {:?}", path.display(), row),
            }
        }
        Ok(out)
    }

    fn write_file(path: &Path, records: &[StoredRecord]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("csv.tmp");
        {
            let mut out = BufWriter::new(fs::File::create(&tmp)?);
            write_row(&mut out, &StoredRecord::headers(), STORE_SEP)?;
            for r in records {
                write_row(&mut out, &r.to_row(), STORE_SEP)?;
            }
            out.flush()?;
        }
        fs::rename(&tmp, path)
    }

    fn date_files(&self) -> io::Result<Vec<(String, PathBuf)>> {
        let dir = self.register_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file() { continue; }
            if path.extension().and_then(|s| s.to_str()) != Some("csv") { continue; }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            if parse_register_date(stem).is_none() { continue; }
            out.push((s!(stem), path));
        }
        Ok(out)
    }

    pub fn load_date(&self, date: &str) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(Self::read_file(&self.date_path(date)?)?)
    }

    /// Every stored record, ordered by id.
    pub fn load_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let mut all = Vec::new();
        for (_, path) in self.date_files()? {
            all.extend(Self::read_file(&path)?);
        }
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    /// Dates that currently hold records, newest first.
    pub fn stored_dates(&self) -> Result<Vec<String>, StoreError> {
        let mut dates = Vec::new();
        for (date, path) in self.date_files()? {
            if !Self::read_file(&path)?.is_empty() {
                dates.push(date);
            }
        }
        sort_newest_first(&mut dates);
        Ok(dates)
    }

    fn id_mark_path(&self) -> PathBuf {
        self.register_dir().join(ID_MARK_FILE)
    }

    /// Next free id: past every stored id and past every id ever handed out.
    fn next_id(&self) -> Result<u64, StoreError> {
        let stored = self.load_all()?.iter().map(|r| r.id).max().map(|m| m + 1).unwrap_or(1);
        let mark = match fs::read_to_string(self.id_mark_path()) {
            Ok(t) => t.trim().parse::<u64>().unwrap_or_else(|_| {
                loge!("Store: ignoring unreadable id mark {:?}", t.trim());
                1
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 1,
            Err(e) => return Err(e.into()),
        };
        Ok(stored.max(mark))
    }

    fn save_id_mark(&self, next: u64) -> io::Result<()> {
        let path = self.id_mark_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, format!("{next}\n"))?;
        fs::rename(&tmp, &path)
    }

    /// Remove every record of `date`. Returns how many were removed.
    pub fn delete_date(&self, date: &str) -> Result<usize, StoreError> {
        let path = self.date_path(date)?;
        let existing = Self::read_file(&path)?.len();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(existing)
    }

    /// Refresh one date. The new file replaces the old one by rename, so a
    /// failed write leaves the previous rows in place. Returns the saved count.
    pub fn replace_date(&self, date: &str, entries: &[RegisterEntry]) -> Result<usize, StoreError> {
        let _guard = WRITE_LOCK.lock().unwrap_or_else(|p| p.into_inner());

        let path = self.date_path(date)?;
        if entries.is_empty() {
            let removed = self.delete_date(date)?;
            if removed > 0 {
                logf!("Store: deleted {removed} existing records for {date}");
            }
            return Ok(0);
        }

        let existing = Self::read_file(&path)?.len();
        let first_id = self.next_id()?;
        let scraped_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let records: Vec<StoredRecord> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| StoredRecord {
                id: first_id + i as u64,
                docket_number: e.docket_number.clone(),
                carrier_info: e.carrier_info.clone(),
                published_date: e.published_date.clone(),
                category: e.category.clone(),
                scrape_date: Some(scraped_at.clone()),
                register_date: Some(s!(date)),
            })
            .collect();

        // Claim the ids before the rows land; a crash may skip ids, never reuse them.
        self.save_id_mark(first_id + records.len() as u64)?;
        Self::write_file(&path, &records)?;
        if existing > 0 {
            logf!("Store: replaced {existing} existing records for {date}");
        }
        logf!("Store: saved {} records for {date} → {}", records.len(), path.display());
        Ok(records.len())
    }

    pub fn query(&self, q: &RecordQuery) -> Result<RecordPage, StoreError> {
        q.validate()?;
        let records = match filled(&q.register_date) {
            Some(d) if parse_register_date(d).is_some() => {
                // Categories only depend on the date, so one file is enough.
                self.load_date(d)?
            }
            _ => self.load_all()?,
        };
        Ok(query_records(&records, q)?)
    }
}
