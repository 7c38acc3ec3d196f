// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::eyre;

use fmcsa_scrape::cli::{self, Cli};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    cli::run(args).map_err(|e| eyre!("{e}"))
}
