// src/gui/jobs.rs
//
// Background work for the GUI. Each job runs on its own thread and reports
// back through one channel; `App::poll_jobs` drains it every frame.

use std::{
    sync::{mpsc, Arc, Mutex},
    thread,
};

use crate::{
    config::options::ScrapeOptions,
    core::{Fetch, ProxyChain},
    gui::progress::GuiProgress,
    model::{CarrierProfile, CarrierQuery, DateItem},
    scrape::{self, ScrapeSummary},
    store::RecordStore,
};

pub enum JobResult {
    Dates(Result<Vec<DateItem>, String>),
    Scraped(Vec<(String, Result<ScrapeSummary, String>)>),
    Carrier(CarrierQuery, CarrierProfile),
}

pub type JobRx = mpsc::Receiver<JobResult>;

fn spawn<F>(work: F) -> JobRx
where
    F: FnOnce() -> JobResult + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(work());
    });
    rx
}

pub fn fetch_dates(opts: ScrapeOptions) -> JobRx {
    spawn(move || {
        let res = ProxyChain::from_options(&opts)
            .and_then(|net| scrape::fetch_available_dates(&net))
            .map_err(|e| e.to_string());
        JobResult::Dates(res)
    })
}

pub fn scrape_dates(
    opts: ScrapeOptions,
    store: RecordStore,
    status: Arc<Mutex<String>>,
) -> JobRx {
    spawn(move || {
        let net: Arc<dyn Fetch> = match ProxyChain::from_options(&opts) {
            Ok(n) => Arc::new(n),
            Err(e) => {
                let msg = e.to_string();
                return JobResult::Scraped(opts.dates.iter().map(|d| (d.clone(), Err(msg.clone()))).collect());
            }
        };
        let mut prog = GuiProgress::new(status);
        let results = scrape::scrape_many(&opts.dates, net, &store, Some(&mut prog))
            .into_iter()
            .map(|(d, r)| (d, r.map_err(|e| e.to_string())))
            .collect();
        JobResult::Scraped(results)
    })
}

pub fn lookup_carrier(opts: ScrapeOptions, query: CarrierQuery) -> JobRx {
    spawn(move || {
        let profile = match ProxyChain::from_options(&opts) {
            Ok(net) => scrape::lookup_carrier(&query, &net),
            Err(e) => {
                loge!("Carrier: {e}");
                CarrierProfile::default()
            }
        };
        JobResult::Carrier(query, profile)
    })
}
