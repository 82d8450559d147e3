//! API Config

use clap::Args;

/// Backend API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the storefront backend
    #[arg(
        long,
        env = "DACHA_API_URL",
        default_value = "http://127.0.0.1:8000",
        global = true
    )]
    pub api_url: String,
}
