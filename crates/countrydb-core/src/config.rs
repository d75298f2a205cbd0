// crates/countrydb-core/src/config.rs
use std::time::Duration;

/// Base URL of the public REST Countries API.
pub const DEFAULT_FEED_URL: &str = "https://restcountries.com/v3.1";

/// Request timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fields requested from the bulk endpoint (the API caps this list at ten).
pub const BULK_FIELDS: &str =
    "name,cca3,region,subregion,capital,population,area,languages,flags,borders";

pub const ENV_FEED_URL: &str = "COUNTRYDB_FEED_URL";
pub const ENV_TIMEOUT_SECS: &str = "COUNTRYDB_TIMEOUT_SECS";

/// Where and how to reach the country feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Base URL without trailing slash, e.g. `https://restcountries.com/v3.1`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEED_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FeedConfig {
    /// Defaults overridden by `COUNTRYDB_FEED_URL` and
    /// `COUNTRYDB_TIMEOUT_SECS`. Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_FEED_URL).filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(url);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => tracing::warn!(value = %secs, "ignoring invalid {ENV_TIMEOUT_SECS}"),
            }
        }
        config
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bulk endpoint returning every country.
    pub fn all_url(&self) -> String {
        format!("{}/all?fields={BULK_FIELDS}", self.base_url)
    }
}
