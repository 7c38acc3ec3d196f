// src/gui/actions/scrape.rs
use crate::{
    gui::{app::App, jobs},
    model::CarrierQuery,
    scrape::ScrapeSummary,
};

pub fn fetch_dates(app: &mut App) {
    logf!("UI: Fetch dates (proxies={})", app.state.options.scrape.use_proxies);
    app.status("Fetching register dates…");
    let rx = jobs::fetch_dates(app.state.options.scrape.clone());
    app.start_job(rx);
}

pub fn scrape(app: &mut App, dates: Vec<String>) {
    logf!("Scrape: Begin dates={:?}", dates);
    app.state.options.scrape.dates = dates;
    app.status("Scraping…");
    let rx = jobs::scrape_dates(
        app.state.options.scrape.clone(),
        app.store.clone(),
        app.status.clone(),
    );
    app.start_job(rx);
}

/// Merge what the worker saved back into RAW and refresh the table.
pub fn finish_scrape(app: &mut App, results: Vec<(String, Result<ScrapeSummary, String>)>) {
    let mut messages = Vec::with_capacity(results.len());

    for (date, res) in results {
        match res {
            Ok(summary) => {
                if summary.records_count > 0 {
                    match app.store.load_date(&summary.date) {
                        Ok(fresh) => app.raw.merge_from_scrape(&summary.date, fresh),
                        Err(e) => loge!("Store: Reload {} failed: {}", summary.date, e),
                    }
                    if !app.state.gui.selected_dates.contains(&summary.date) {
                        app.state.gui.selected_dates.push(summary.date.clone());
                    }
                }
                messages.push(summary.message);
            }
            Err(e) => {
                loge!("Scrape: Error date={}: {}", date, e);
                messages.push(format!("{date}: {e}"));
            }
        }
    }

    app.rebuild_view();
    app.status(messages.join(" | "));
    app.save_settings();
}

pub fn lookup(app: &mut App) {
    let gui = &app.state.gui;
    let Some(query) = CarrierQuery::parse(&gui.carrier_input, gui.carrier_by_mc) else {
        app.status("Enter digits, optionally prefixed with MC or USDOT");
        return;
    };
    logf!("Carrier: Lookup {}", query);
    app.status(format!("Looking up {query}…"));
    let rx = jobs::lookup_carrier(app.state.options.scrape.clone(), query);
    app.start_job(rx);
}
