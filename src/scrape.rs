// src/scrape.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }}
};

use serde::Serialize;
use thiserror::Error;

use crate::{
    config::consts::{ WORKERS, REQUEST_PAUSE_MS, JITTER_MS, REGISTER_LIST_URL },
    core::{ Fetch, FetchError, dates::normalize_register_date },
    model::{ CarrierProfile, CarrierQuery, DateItem, RegisterEntry },
    progress::Progress,
    specs,
    store::{ RecordStore, StoreError },
};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid register date {0:?}, expected DD-MON-YY (e.g. 20-FEB-26)")]
    InvalidDate(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no carrier found for {0}")]
    CarrierNotFound(String),
}

/// Outcome of one register scrape, as reported to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScrapeSummary {
    pub message: String,
    pub records_count: usize,
    pub date: String,
}

impl ScrapeSummary {
    fn empty(date: &str) -> Self {
        Self {
            message: format!(
                "No records found for date {date}. The register may not be published yet for this date."
            ),
            records_count: 0,
            date: s!(date),
        }
    }

    fn saved(date: &str, n: usize) -> Self {
        Self {
            message: format!("Successfully scraped and saved {n} records for {date}"),
            records_count: n,
            date: s!(date),
        }
    }
}

/* ---------------- Register ---------------- */

/// Dates offered on the register list page, newest first.
pub fn fetch_available_dates(net: &dyn Fetch) -> Result<Vec<DateItem>, FetchError> {
    let page = net.fetch(REGISTER_LIST_URL)?;
    let dates = specs::register_dates::parse(&page.body);
    logf!("Scrape: {} register dates available (via {:?})", dates.len(), page.via);
    Ok(dates)
}

fn validate_date(date: &str) -> Result<String, ScrapeError> {
    normalize_register_date(date).ok_or_else(|| ScrapeError::InvalidDate(s!(date.trim())))
}

fn fetch_entries(date: &str, net: &dyn Fetch) -> Result<Vec<RegisterEntry>, FetchError> {
    let page = net.fetch(&specs::register::detail_url(date))?;
    let entries = specs::register::parse(&page.body);
    logd!("Scrape: {date} sections [{}]", specs::register::categories(&entries).join(", "));
    Ok(entries)
}

/// Empty results leave stored rows alone; otherwise the date is refreshed.
fn save_entries(
    date: &str,
    entries: &[RegisterEntry],
    store: &RecordStore,
) -> Result<ScrapeSummary, ScrapeError> {
    if entries.is_empty() {
        logf!("Scrape: {date} returned no entries; keeping stored rows");
        return Ok(ScrapeSummary::empty(date));
    }
    let n = store.replace_date(date, entries)?;
    Ok(ScrapeSummary::saved(date, n))
}

/// Fetch, parse and store one register date.
pub fn scrape_register(
    date: &str,
    net: &dyn Fetch,
    store: &RecordStore,
) -> Result<ScrapeSummary, ScrapeError> {
    let date = validate_date(date)?;
    logf!("Scrape: register {date}");
    let entries = fetch_entries(&date, net)?;
    save_entries(&date, &entries, store)
}

/// Scrape several dates on a small worker pool. Saving happens on the
/// calling thread. Results keep the input order.
pub fn scrape_many(
    dates: &[String],
    net: Arc<dyn Fetch>,
    store: &RecordStore,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<(String, Result<ScrapeSummary, ScrapeError>)> {
    let mut results: Vec<Option<Result<ScrapeSummary, ScrapeError>>> =
        (0..dates.len()).map(|_| None).collect();

    // Bad dates never reach the network.
    let mut jobs: Vec<(usize, String)> = Vec::with_capacity(dates.len());
    for (i, d) in dates.iter().enumerate() {
        match validate_date(d) {
            Ok(norm) => jobs.push((i, norm)),
            Err(e) => results[i] = Some(Err(e)),
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(dates.len());
        p.log("Scraping register dates…");
    }
    for (i, d) in dates.iter().enumerate() {
        if let Some(Err(e)) = &results[i] {
            loge!("Scrape: {e}");
            if let Some(p) = progress.as_deref_mut() { p.item_failed(d); }
        }
    }

    // Concurrency
    type FetchOk = (usize, String, Vec<RegisterEntry>);
    type FetchErr = (usize, FetchError);

    let jobs_arc = Arc::new(jobs);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Result<FetchOk, FetchErr>>();

    let workers = WORKERS.min(jobs_arc.len()).max(1);

    for _ in 0..workers {
        let jobs = Arc::clone(&jobs_arc);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();
        let net = Arc::clone(&net);

        thread::spawn(
            move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= jobs.len() {
                        break;
                    }
                    let (slot, date) = &jobs[i];
                    let result = match fetch_entries(date, net.as_ref()) {
                        Ok(entries) => Ok((*slot, date.clone(), entries)),
                        Err(e) => Err((*slot, e)),
                    };
                    if tx.send(result).is_err() {
                        break;
                    }
                    let jitter = (*slot as u64 * 37) % JITTER_MS.max(1);
                    thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
                }
            }
        );
    }
    drop(res_tx); // main thread is sole receiver now

    // Aggregate results
    for _ in 0..jobs_arc.len() {
        let (slot, outcome) = match res_rx.recv() {
            Ok(Ok((slot, date, entries))) => (slot, save_entries(&date, &entries, store)),
            Ok(Err((slot, e))) => (slot, Err(ScrapeError::Fetch(e))),
            Err(_) => break, // workers ended early; bail gracefully
        };
        let label = dates[slot].as_str();
        if let Some(p) = progress.as_deref_mut() {
            match &outcome {
                Ok(summary) => {
                    p.log(&summary.message);
                    p.item_done(label);
                }
                Err(e) => {
                    loge!("Scrape: {label}: {e}");
                    p.log(&format!("{label}: {e}"));
                    p.item_failed(label);
                }
            }
        }
        results[slot] = Some(outcome);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    dates
        .iter()
        .cloned()
        .zip(results)
        .map(|(d, r)| {
            let r = r.unwrap_or_else(|| {
                Err(ScrapeError::Fetch(FetchError::Exhausted { attempts: vec![s!("worker stopped")] }))
            });
            (d, r)
        })
        .collect()
}

/* ---------------- Carrier ---------------- */

/// Snapshot lookup. `Ok(None)` when SAFER has no such carrier.
pub fn fetch_carrier(query: &CarrierQuery, net: &dyn Fetch) -> Result<Option<CarrierProfile>, FetchError> {
    let page = net.fetch(&specs::carrier::snapshot_url(query))?;
    let profile = specs::carrier::parse(&page.body);
    match &profile {
        Some(p) => logf!("Carrier: {query} → {}", p.legal_name.as_deref().unwrap_or("?")),
        None => logf!("Carrier: {query} not found"),
    }
    Ok(profile)
}

/// Best-effort lookup: every failure is logged and yields an empty profile.
pub fn lookup_carrier(query: &CarrierQuery, net: &dyn Fetch) -> CarrierProfile {
    match fetch_carrier(query, net) {
        Ok(Some(p)) => p,
        Ok(None) => CarrierProfile::default(),
        Err(e) => {
            loge!("Carrier: lookup {query} failed: {e}");
            CarrierProfile::default()
        }
    }
}

/// Like [`fetch_carrier`], but "not found" is an error too.
pub fn require_carrier(query: &CarrierQuery, net: &dyn Fetch) -> Result<CarrierProfile, ScrapeError> {
    fetch_carrier(query, net)?.ok_or_else(|| ScrapeError::CarrierNotFound(query.to_string()))
}
