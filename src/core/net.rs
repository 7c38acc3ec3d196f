// src/core/net.rs
//
// Blocking HTTPS GET with a direct-then-proxies fallback chain.
// Every attempt is logged; the first non-empty body wins.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use thiserror::Error;

use crate::config::consts::{MAX_REDIRECTS, USER_AGENT};
use crate::config::options::ScrapeOptions;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("empty response body from {url}")]
    Empty { url: String },

    #[error("all {} fetch attempts failed: {}", .attempts.len(), .attempts.join("; "))]
    Exhausted { attempts: Vec<String> },
}

/// Which path a page came through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Via {
    Direct,
    Proxy(String),
}

#[derive(Clone, Debug)]
pub struct Fetched {
    pub body: String,
    pub via: Via,
}

/// Anything that can turn a URL into a page body.
/// The scrape layer only talks to this, so tests can feed fixtures.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Fetched, FetchError>;
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// Single GET. Non-2xx and whitespace-only bodies are errors.
    pub fn get(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request { url: s!(url), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }

        let body = resp
            .text()
            .map_err(|source| FetchError::Request { url: s!(url), source })?;
        if body.trim().is_empty() {
            return Err(FetchError::Empty { url: s!(url) });
        }
        Ok(body)
    }

    /// Direct request first, then each proxy template in order.
    pub fn get_via_chain(&self, url: &str, proxies: &[String]) -> Result<Fetched, FetchError> {
        let mut attempts = Vec::with_capacity(1 + proxies.len());

        match self.get(url) {
            Ok(body) => {
                logd!("Net: direct OK {url} ({} bytes)", body.len());
                return Ok(Fetched { body, via: Via::Direct });
            }
            Err(e) => {
                logd!("Net: direct failed {url}: {e}");
                attempts.push(format!("direct: {e}"));
            }
        }

        for template in proxies {
            let proxied = proxied_url(template, url);
            match self.get(&proxied) {
                Ok(body) => {
                    logf!("Net: proxy OK {} ({} bytes)", template, body.len());
                    return Ok(Fetched { body, via: Via::Proxy(template.clone()) });
                }
                Err(e) => {
                    logd!("Net: proxy failed {template}: {e}");
                    attempts.push(format!("{template}: {e}"));
                }
            }
        }

        loge!("Net: every path failed for {url}");
        Err(FetchError::Exhausted { attempts })
    }
}

/// Substitute the percent-encoded `target` into a proxy template.
/// Templates without `{url}` get the target appended.
pub fn proxied_url(template: &str, target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    if template.contains("{url}") {
        template.replace("{url}", &encoded)
    } else {
        join!(template, &encoded)
    }
}

/// The production fetcher: one client plus the configured proxy chain.
#[derive(Clone)]
pub struct ProxyChain {
    client: HttpClient,
    proxies: Vec<String>,
}

impl ProxyChain {
    pub fn new(client: HttpClient, proxies: Vec<String>) -> Self {
        Self { client, proxies }
    }

    pub fn from_options(opts: &ScrapeOptions) -> Result<Self, FetchError> {
        let client = HttpClient::new(opts.timeout_secs)?;
        Ok(Self::new(client, opts.active_proxies().to_vec()))
    }
}

impl Fetch for ProxyChain {
    fn fetch(&self, url: &str) -> Result<Fetched, FetchError> {
        self.client.get_via_chain(url, &self.proxies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_template_encodes_target() {
        let out = proxied_url(
            "https://api.allorigins.win/raw?url={url}",
            "https://safer.fmcsa.dot.gov/query.asp?a=1&b=2",
        );
        assert_eq!(
            out,
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fsafer.fmcsa.dot.gov%2Fquery.asp%3Fa%3D1%26b%3D2"
        );
    }

    #[test]
    fn proxy_template_without_placeholder_appends() {
        let out = proxied_url("https://corsproxy.io/?", "https://x.gov/a b");
        assert_eq!(out, "https://corsproxy.io/?https%3A%2F%2Fx.gov%2Fa+b");
    }

    #[test]
    fn exhausted_lists_every_attempt() {
        let e = FetchError::Exhausted { attempts: vec![s!("direct: boom"), s!("p1: HTTP 503")] };
        let msg = e.to_string();
        assert!(msg.starts_with("all 2 fetch attempts failed"));
        assert!(msg.contains("p1: HTTP 503"));
    }
}
