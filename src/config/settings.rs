#[derive(Clone)]
pub struct StatusSettings {
    pub api_base_url: &'static str,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.mcsrvstat.us/2",
            user_agent: "Tierboard/1.0",
            timeout_secs: 10,
            rate_limit_ms: 1000, // 1 req/sec, the status API is a shared service
        }
    }
}

#[derive(Clone)]
pub struct WatchSettings {
    pub revision_poll_ms: u64,
    pub status_refresh_secs: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            revision_poll_ms: 500,
            status_refresh_secs: 60,
        }
    }
}

#[derive(Clone, Default)]
pub struct AppConfig {
    pub status: StatusSettings,
    pub watch: WatchSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Path of the board store, overridable for tests and deployments.
pub fn database_path() -> String {
    std::env::var("TIERBOARD_DB").unwrap_or_else(|_| "tierboard.db".to_string())
}

/// Game server the status widget polls when no host is given on the
/// command line.
pub fn default_status_host() -> String {
    std::env::var("TIERBOARD_HOST").unwrap_or_else(|_| "localhost".to_string())
}
