//! Backend and storage settings.

use std::{path::PathBuf, time::Duration};

use clap::Args;

/// Settings for talking to the backend and keeping local state.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base URL of the storefront API
    #[arg(
        long,
        global = true,
        env = "JAM3A_API_URL",
        default_value = "http://localhost:5000/api"
    )]
    pub api_url: String,

    /// Directory holding the session, cart and caches
    #[arg(long, global = true, env = "JAM3A_STORAGE_DIR", default_value = ".jam3a")]
    pub storage_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "JAM3A_TIMEOUT_SECS", default_value_t = 15u64)]
    pub timeout_secs: u64,

    /// Serve deals and products from the bundled catalog instead of the API
    #[arg(long, global = true, env = "JAM3A_OFFLINE")]
    pub offline: bool,
}

impl ClientConfig {
    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            storage_dir: PathBuf::from(".jam3a"),
            timeout_secs: 15,
            offline: false,
        }
    }
}
