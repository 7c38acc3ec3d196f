// src/config/consts.rs

// Net config
pub const REGISTER_LIST_URL: &str =
    "https://li-public.fmcsa.dot.gov/LIVIEW/PKG_REGISTER.prc_reg_list";
pub const REGISTER_DETAIL_URL: &str =
    "https://li-public.fmcsa.dot.gov/LIVIEW/PKG_register.prc_reg_detail?pd_date={date}&pv_vpath=LIVIEW";
pub const SNAPSHOT_URL: &str =
    "https://safer.fmcsa.dot.gov/query.asp?searchtype=ANY&query_type=queryCarrierSnapshot&query_param={param}&query_string={value}";

/// Public CORS proxies, tried in order after the direct request.
/// `{url}` receives the percent-encoded target.
pub const DEFAULT_PROXIES: &[&str] = &[
    "https://api.allorigins.win/raw?url={url}",
    "https://corsproxy.io/?{url}",
    "https://api.codetabs.com/v1/proxy?quest={url}",
];

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
pub const TIMEOUT_SECS: u64 = 20;
pub const MAX_REDIRECTS: usize = 5;

// Local store
pub const STORE_DIR: &str = ".store";
pub const REGISTER_SUBDIR: &str = "register";
/// High-water mark of handed-out record ids, inside the register dir.
pub const ID_MARK_FILE: &str = ".next_id";
pub const STORE_SEP: char = ',';
pub const SETTINGS_FILE: &str = ".store/settings.ini";
pub const LOG_FILE_NAME: &str = "debug.log";
pub const LOG_FILE: &str = ".store/debug.log";

// Register
pub const UNCATEGORIZED: &str = "UNCATEGORIZED";

// Query
pub const DEFAULT_LIMIT: usize = 500;
pub const MAX_LIMIT: usize = 2000;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_REGISTER_SUBDIR: &str = "register";
pub const DEFAULT_FILE: &str = "register";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 250; // be polite
pub const JITTER_MS: u64 = 100; // extra 0..100 ms
