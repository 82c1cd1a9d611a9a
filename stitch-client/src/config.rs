//! Store connection configuration

/// Connection settings for the hosted store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL (e.g., "https://xyz.example.co"); the REST API lives under `/rest/v1`
    pub base_url: String,

    /// Anonymous or service API key, sent as `apikey` and bearer token
    pub api_key: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Name of the read-only activity aggregation view
    pub activity_view: String,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_ms: 30_000,
            activity_view: "order_activities_detailed".to_string(),
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_activity_view(mut self, view: impl Into<String>) -> Self {
        self.activity_view = view.into();
        self
    }
}
