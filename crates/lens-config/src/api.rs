//! Analytics API connection settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("lens/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ApiConfig {
    /// Base URL of the analytics API (e.g. `https://api.example.com/v1`).
    #[serde(default)]
    pub base_url: String,

    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: String,

    /// Request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Whether a base URL is set. The token is optional for public endpoints.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}
