//! Caller-owned client configuration.

use crate::reference::ApiFamily;

/// API key and endpoints used to build requests.
///
/// The key is only ever read when a URL is assembled; it is not logged.
#[derive(Clone)]
pub struct ApiConfig {
    api_key: String,
    pub positions_url: String,
    pub arrivals_url: String,
    pub follow_url: String,
}

impl ApiConfig {
    /// Create a config with the given API key and the production endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            positions_url: ApiFamily::Positions.endpoint().to_string(),
            arrivals_url: ApiFamily::Arrivals.endpoint().to_string(),
            follow_url: ApiFamily::Follow.endpoint().to_string(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Set a custom positions endpoint (for testing).
    pub fn with_positions_url(mut self, url: impl Into<String>) -> Self {
        self.positions_url = url.into();
        self
    }

    /// Set a custom arrivals endpoint (for testing).
    pub fn with_arrivals_url(mut self, url: impl Into<String>) -> Self {
        self.arrivals_url = url.into();
        self
    }

    /// Set a custom follow endpoint (for testing).
    pub fn with_follow_url(mut self, url: impl Into<String>) -> Self {
        self.follow_url = url.into();
        self
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("positions_url", &self.positions_url)
            .field("arrivals_url", &self.arrivals_url)
            .field("follow_url", &self.follow_url)
            .finish()
    }
}
