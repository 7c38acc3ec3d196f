// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific parsing for the FMCSA sites. Each spec takes the HTML of one
//! page and knows *where the ground truth lives* in it.
//!
//! ## What lives here
//! - **Pure HTML parsing** (`&str` in, records out). No networking, so every
//!   spec is testable offline against saved fixtures.
//! - **URL building** for the page the spec reads.
//! - **Tolerant extraction**: label lookups over normalised cell text, section
//!   headings tracked while walking rows, checkbox lists read as "X" + item.
//!
//! ## What does **not** live here
//! - Fetching and proxy fallback (`core::net`).
//! - Persistence (`store`), refresh policy and worker pools (`scrape`).
//! - GUI filtering or export formatting.
//!
//! ## Typical call chain
//! ```text
//! GUI / CLI → scrape::* → core::net (direct, then proxies)
//!                       ↘ specs::<page>::parse(html)
//!                         store::RecordStore (outside of specs)
//! ```
//!
//! ## Current specs
//! - `register_dates` – dates offered on the register list page.
//! - `register` – entries of one register date, grouped by section heading.
//! - `carrier` – SAFER company snapshot, including the protected email and
//!   the inspection / crash tables.
pub mod carrier;
pub mod register;
pub mod register_dates;
