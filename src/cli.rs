// src/cli.rs
use std::{error::Error, path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand};

use crate::{
    config::{
        consts::{DEFAULT_LIMIT, SETTINGS_FILE},
        options::{ExportFormat, ExportType},
        settings,
        state::AppState,
    },
    core::{Fetch, ProxyChain},
    csv::to_export_string,
    file::{write_export_per_category, write_export_single},
    model::{CarrierProfile, CarrierQuery, CrashCounts, InspectionRow, StoredRecord},
    progress::Progress,
    scrape,
    store::{DataSet, RecordQuery, RecordStore},
};

#[derive(Parser, Debug)]
#[command(
    name = "fmcsa-cli",
    about = "Scrape the FMCSA Register and look up SAFER carrier snapshots",
    version
)]
pub struct Cli {
    /// Mirror log lines to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Local store directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Only try the direct request, never the public proxies.
    #[arg(long, global = true)]
    pub no_proxies: bool,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List register dates published upstream.
    Dates {
        #[arg(long)]
        json: bool,
    },

    /// Scrape one or more register dates (DD-MON-YY) into the store.
    Scrape {
        #[arg(value_name = "DATE", required_unless_present = "latest")]
        dates: Vec<String>,

        /// Scrape the newest published date.
        #[arg(long, conflicts_with = "dates")]
        latest: bool,
    },

    /// Register dates with stored records, newest first.
    StoredDates,

    /// Query stored records.
    Records(RecordsArgs),

    /// Look up a carrier snapshot by USDOT or MC number.
    Carrier {
        #[command(flatten)]
        id: CarrierArgs,

        /// Print the whole profile as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct RecordsArgs {
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Case-insensitive match on docket number or carrier info.
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub skip: usize,
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
    /// csv | tsv | json
    #[arg(long, default_value = "csv", value_parser = parse_format)]
    pub format: ExportFormat,
    #[arg(long)]
    pub no_headers: bool,
    /// Write to a file (or a directory with --per-category) instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    #[arg(long, requires = "out")]
    pub per_category: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct CarrierArgs {
    #[arg(long, value_name = "USDOT")]
    pub dot: Option<String>,
    #[arg(long, value_name = "MC")]
    pub mc: Option<String>,
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    ExportFormat::parse(s).ok_or_else(|| format!("unknown format: {s} (csv, tsv, json)"))
}

/// Prints one line per finished date.
struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn log(&mut self, msg: &str) { eprintln!("{msg}"); }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {label} done", self.done, self.total);
    }
    fn item_failed(&mut self, label: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {label} failed", self.done, self.total);
    }
}

pub fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    crate::log::set_echo(cli.verbose);
    if let Some(dir) = &cli.store {
        crate::log::set_log_dir(dir);
    }

    let mut state = AppState::default();
    settings::load(SETTINGS_FILE).apply(&mut state);
    let scrape_opts = &mut state.options.scrape;
    if cli.no_proxies {
        scrape_opts.use_proxies = false;
    }
    if let Some(t) = cli.timeout {
        scrape_opts.timeout_secs = t;
    }

    let store = cli.store.as_ref().map(RecordStore::new).unwrap_or_default();
    let net = || ProxyChain::from_options(&state.options.scrape);

    match cli.command {
        Command::Dates { json } => {
            let dates = scrape::fetch_available_dates(&net()?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&dates)?);
            } else {
                for d in dates {
                    println!("{}\t{}", d.fmcsa_date, d.label);
                }
            }
        }

        Command::Scrape { dates, latest } => {
            let net: Arc<dyn Fetch> = Arc::new(net()?);
            let dates = if latest {
                let newest = scrape::fetch_available_dates(net.as_ref())?
                    .into_iter()
                    .next()
                    .ok_or("no register dates published")?;
                vec![newest.fmcsa_date]
            } else {
                dates
            };

            let mut progress = CliProgress { total: 0, done: 0 };
            let results = scrape::scrape_many(&dates, net, &store, Some(&mut progress));
            let mut failed = 0;
            for (date, r) in results {
                match r {
                    Ok(summary) => println!("{}", summary.message),
                    Err(e) => {
                        failed += 1;
                        eprintln!("{date}: {e}");
                    }
                }
            }
            if failed > 0 {
                return Err(format!("{failed} date(s) failed").into());
            }
        }

        Command::StoredDates => {
            for d in store.stored_dates()? {
                println!("{d}");
            }
        }

        Command::Records(args) => records(&store, args)?,

        Command::Carrier { id, json } => {
            let query = match (&id.dot, &id.mc) {
                (Some(dot), _) => CarrierQuery::parse(dot, false),
                (_, Some(mc)) => CarrierQuery::parse(mc, true),
                _ => None,
            }
            .ok_or("carrier number must be digits (optionally prefixed MC / USDOT)")?;

            let profile = scrape::require_carrier(&query, &net()?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print_profile(&profile);
            }
        }
    }
    Ok(())
}

fn records(store: &RecordStore, args: RecordsArgs) -> Result<(), Box<dyn Error>> {
    let query = RecordQuery {
        register_date: args.date,
        category: args.category,
        search: args.search,
        skip: args.skip,
        limit: args.limit,
    };
    let page = store.query(&query)?;
    eprintln!(
        "{} of {} records; categories: {}",
        page.items.len(),
        page.total,
        page.categories.join(", ")
    );

    let ds = DataSet::from_records(&page.items);
    let Some(out) = args.out else {
        print!("{}", to_export_string(&ds.headers, &ds.rows, !args.no_headers, args.format));
        return Ok(());
    };

    let mut export = AppState::default().options.export;
    export.format = args.format;
    export.include_headers = !args.no_headers;
    if args.per_category {
        export.export_type = ExportType::PerCategory;
        export.set_path(&out.to_string_lossy());
        for p in write_export_per_category(&export, &ds.headers, &ds.rows, StoredRecord::CATEGORY_COL)? {
            println!("{}", p.display());
        }
    } else {
        export.set_path(&out.to_string_lossy());
        println!("{}", write_export_single(&export, &ds.headers, &ds.rows)?.display());
    }
    Ok(())
}

fn print_profile(profile: &CarrierProfile) {
    for (label, value) in profile.fields() {
        println!("{label:<24}{}", value.unwrap_or("-"));
    }
    let safety = &profile.safety;
    if !safety.inspections.is_empty() {
        println!();
        println!("{}", InspectionRow::HEADERS.join("\t"));
        for row in &safety.inspections {
            println!("{}", row.cells().join("\t"));
        }
    }
    if let Some(c) = &safety.crashes {
        println!();
        println!("Crashes\t{}", CrashCounts::HEADERS.join("\t"));
        println!("US\t{}", c.cells().join("\t"));
    }
}
