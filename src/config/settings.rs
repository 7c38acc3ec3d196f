// src/config/settings.rs
//
// Persisted user settings as a flat `key=value` file.
// Unknown keys are ignored; a missing or unreadable file yields defaults.

use std::{fs, io, path::Path};

use super::options::{AppOptions, ExportFormat};
use super::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub use_proxies: bool,
    pub proxies: Vec<String>,
    pub timeout_secs: u64,
    pub format: ExportFormat,
    pub include_headers: bool,
    pub out_path: String,
    pub selected_dates: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let opts = AppOptions::default();
        Self {
            use_proxies: opts.scrape.use_proxies,
            proxies: opts.scrape.proxies,
            timeout_secs: opts.scrape.timeout_secs,
            format: opts.export.format,
            include_headers: opts.export.include_headers,
            out_path: s!(),
            selected_dates: Vec::new(),
        }
    }
}

fn parse_bool(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn split_list(val: &str, sep: char) -> Vec<String> {
    val.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn parse(text: &str) -> Settings {
    let mut cfg = Settings::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let Some((key, val)) = line.split_once('=') else { continue };
        let (key, val) = (key.trim(), val.trim());
        match key {
            "use_proxies" => cfg.use_proxies = parse_bool(val),
            // Proxy templates may contain ',' in query strings; use whitespace.
            "proxies" => cfg.proxies = val.split_whitespace().map(String::from).collect(),
            "timeout_secs" => {
                if let Ok(v) = val.parse::<u64>() {
                    if v > 0 { cfg.timeout_secs = v; }
                }
            }
            "format" => {
                if let Some(f) = ExportFormat::parse(val) { cfg.format = f; }
            }
            "include_headers" => cfg.include_headers = parse_bool(val),
            "out_path" => cfg.out_path = val.to_string(),
            "dates" => cfg.selected_dates = split_list(val, ','),
            _ => logd!("Settings: ignoring unknown key '{key}'"),
        }
    }
    cfg
}

pub fn load<P: AsRef<Path>>(path: P) -> Settings {
    match fs::read_to_string(path.as_ref()) {
        Ok(text) => parse(&text),
        Err(_) => Settings::default(),
    }
}

pub fn render(cfg: &Settings) -> String {
    let mut s = s!();
    s.push_str(&format!("use_proxies={}\n", if cfg.use_proxies { 1 } else { 0 }));
    s.push_str(&format!("proxies={}\n", cfg.proxies.join(" ")));
    s.push_str(&format!("timeout_secs={}\n", cfg.timeout_secs));
    s.push_str(&format!("format={}\n", cfg.format.ext()));
    s.push_str(&format!("include_headers={}\n", if cfg.include_headers { 1 } else { 0 }));
    if !cfg.out_path.is_empty() {
        s.push_str(&format!("out_path={}\n", cfg.out_path));
    }
    if !cfg.selected_dates.is_empty() {
        s.push_str(&format!("dates={}\n", cfg.selected_dates.join(",")));
    }
    s
}

pub fn save<P: AsRef<Path>>(path: P, cfg: &Settings) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, render(cfg))
}

impl Settings {
    /// Push persisted values into a fresh state.
    pub fn apply(&self, state: &mut AppState) {
        let scrape = &mut state.options.scrape;
        scrape.use_proxies = self.use_proxies;
        if !self.proxies.is_empty() {
            scrape.proxies = self.proxies.clone();
        }
        scrape.timeout_secs = self.timeout_secs;

        let export = &mut state.options.export;
        export.format = self.format;
        export.include_headers = self.include_headers;
        if !self.out_path.is_empty() {
            export.set_path(&self.out_path);
        }

        state.gui.selected_dates = self.selected_dates.clone();
    }

    /// Snapshot the current state for saving.
    pub fn capture(state: &AppState) -> Self {
        let scrape = &state.options.scrape;
        let export = &state.options.export;
        Self {
            use_proxies: scrape.use_proxies,
            proxies: scrape.proxies.clone(),
            timeout_secs: scrape.timeout_secs,
            format: export.format,
            include_headers: export.include_headers,
            out_path: if export.is_fully_default() {
                s!()
            } else {
                export.out_path().to_string_lossy().into_owned()
            },
            selected_dates: state.gui.selected_dates.clone(),
        }
    }
}
