use std::path::PathBuf;

/// Run-wide settings, built once at startup and passed by reference into the
/// engine and extraction plug-ins.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Search form endpoint; pagination links are appended to it verbatim.
    pub base_url: String,
    pub log_level: String,
    pub search_path: PathBuf,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Upper bound (seconds) of the pacing jitter before each submission.
    pub search_sleep_secs: f64,
    /// Upper bound (seconds) of the jitter between pagination fetches.
    pub pagination_sleep_secs: f64,
    /// Base of the retry backoff: the wait after attempt `n` is drawn from
    /// `[1, backoff_base^n)` seconds.
    pub backoff_base: f64,
    pub max_attempts: u32,
    pub max_workers: usize,
}

impl AppConfig {
    /// Lower bound (seconds) shared by the pacing and pagination jitters.
    pub const MIN_SLEEP_SECS: f64 = 0.5;
    /// Upper bound (seconds) accepted for either jitter.
    pub const MAX_SLEEP_SECS: f64 = 3600.0;
}
