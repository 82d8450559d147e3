//! Application configuration module

use clap::Args;

pub use crate::config::{
    api::ApiConfig,
    observability::{LogFormat, LoggingConfig},
    storage::StorageConfig,
};

mod api;
mod observability;
mod storage;

/// Dacha storefront configuration, read from CLI flags, the environment and `.env`.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Backend API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local snapshot storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
