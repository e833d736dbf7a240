use serde::{Deserialize, Serialize};

/// The backend address used by the dev-server proxy setup.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration for the API client.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every request path is resolved against, without a trailing
    /// slash (e.g. `http://localhost:8000/api`).
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at the given base URL.
    ///
    /// A trailing slash is stripped so that request paths (which start with
    /// `/`) concatenate cleanly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}
