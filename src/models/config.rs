//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::api::client::DEFAULT_API_BASE_URL;

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Outbound request timeout. Unset means no timeout.
    #[serde(default)]
    pub api_timeout_secs: Option<u64>,
}

impl ServerConfig {
    pub fn api_timeout(&self) -> Option<Duration> {
        self.api_timeout_secs.map(Duration::from_secs)
    }
}
