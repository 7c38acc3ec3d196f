// src/core/mod.rs

pub mod cfemail;
pub mod dates;
pub mod html;
pub mod net;
pub mod sanitize;

pub use net::{Fetch, FetchError, Fetched, HttpClient, ProxyChain, Via};
