use stitch_client::StoreConfig;

/// Order desk configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | STORE_URL | http://localhost:54321 | Hosted store base URL |
/// | STORE_API_KEY | (empty) | API key sent as `apikey` and bearer token |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout (milliseconds) |
/// | ACTIVITY_VIEW | order_activities_detailed | View holding the activity log |
/// | LOG_LEVEL | info | Log filter (`debug`, `info,stitch_client=debug`, ...) |
/// | LOG_JSON | false | Emit logs as JSON lines |
/// | LOG_DIR | (unset) | Write logs to a daily rolling file in this directory |
///
/// A `.env` file in the working directory is loaded first (see `main`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub store_url: String,
    pub store_api_key: String,
    pub request_timeout_ms: u64,
    pub activity_view: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable values use the defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            store_url: non_blank("STORE_URL").unwrap_or_else(|| "http://localhost:54321".into()),
            store_api_key: non_blank("STORE_API_KEY").unwrap_or_default(),
            request_timeout_ms: non_blank("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            activity_view: non_blank("ACTIVITY_VIEW")
                .unwrap_or_else(|| "order_activities_detailed".into()),
            log_level: non_blank("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: non_blank("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: non_blank("LOG_DIR"),
        }
    }

    /// Store connection settings
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.store_url, &self.store_api_key)
            .with_timeout_ms(self.request_timeout_ms)
            .with_activity_view(&self.activity_view)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store_url, "http://localhost:54321");
        assert_eq!(config.store_api_key, "");
        assert_eq!(config.request_timeout_ms, 30000);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("STORE_URL", "https://erp.example.co"),
            ("STORE_API_KEY", " anon "),
            ("REQUEST_TIMEOUT_MS", "soon"),
            ("LOG_JSON", "true"),
            ("LOG_DIR", "  "),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.store_url, "https://erp.example.co");
        assert_eq!(config.store_api_key, "anon");
        assert_eq!(config.request_timeout_ms, 30000);
        assert!(config.log_json);
        assert_eq!(config.log_dir, None);

        let store = config.store_config();
        assert_eq!(store.base_url, "https://erp.example.co");
        assert_eq!(store.timeout_ms, 30000);
        assert_eq!(store.activity_view, "order_activities_detailed");
    }
}
