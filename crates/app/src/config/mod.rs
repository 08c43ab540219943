//! Client configuration

use clap::Args;
use jam3a::locale::Language;

use crate::config::{client::ClientConfig, observability::LoggingConfig};

pub mod client;
pub mod observability;

/// Settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Backend and local storage settings.
    #[command(flatten)]
    pub client: ClientConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Display language for this run (en, ar); defaults to the stored choice
    #[arg(long, global = true, env = "JAM3A_LANG")]
    pub lang: Option<Language>,
}
