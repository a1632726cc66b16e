//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Local data settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the saved cart and session
    #[arg(long, env = "LAPAK_DATA_DIR", default_value = ".lapak")]
    pub data_dir: PathBuf,
}
