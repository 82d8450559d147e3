//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where cart and session snapshots are kept.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory for cart and session snapshots
    #[arg(long, env = "DACHA_DATA_DIR", default_value = ".dacha", global = true)]
    pub data_dir: PathBuf,
}
