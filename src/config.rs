//! Application configuration

use std::path::PathBuf;
use std::time::Duration;

/// Search API base; the search term is appended verbatim after encoding.
pub const API_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search?tags=story&query=";

/// Storage key of the persisted search term
pub const SEARCH_KEY: &str = "search";

/// Search term used when nothing has been persisted yet
pub const INITIAL_TERM: &str = "React";

/// Environment variable overriding [`API_ENDPOINT`]
pub const ENDPOINT_ENV: &str = "HACKER_STORIES_ENDPOINT";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL the encoded search term is appended to
    pub endpoint: String,
    /// Key the search term is stored under
    pub storage_key: String,
    /// Term used on first start
    pub initial_term: String,
    /// JSON file backing the key-value store
    pub store_path: PathBuf,
    /// Upper bound for a whole request, connect included
    pub request_timeout: Duration,
    /// Focus the search input on start
    pub auto_focus: bool,
    /// Start from the bundled demo stories instead of fetching on start
    pub demo: bool,
    /// Log file (the terminal belongs to the UI)
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = data_dir();
        Self {
            endpoint: std::env::var(ENDPOINT_ENV)
                .ok()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| API_ENDPOINT.to_string()),
            storage_key: SEARCH_KEY.to_string(),
            initial_term: INITIAL_TERM.to_string(),
            store_path: data_dir.join("storage.json"),
            request_timeout: Duration::from_secs(5),
            auto_focus: true,
            demo: false,
            log_path: data_dir.join("hacker-stories.log"),
        }
    }
}

/// Per-user data directory, or the working directory when the platform has none.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("hacker-stories"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_search_key_and_initial_term() {
        let config = AppConfig::default();
        assert_eq!(config.storage_key, "search");
        assert_eq!(config.initial_term, "React");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.auto_focus);
        assert!(config.store_path.ends_with("storage.json"));
    }

    #[test]
    fn default_endpoint_only_returns_stories() {
        assert!(API_ENDPOINT.starts_with("https://hn.algolia.com/api/v1/search?"));
        assert!(API_ENDPOINT.contains("tags=story"));
        assert!(API_ENDPOINT.ends_with("query="));
    }
}
