//! Catalog Config

use std::path::PathBuf;

use clap::Args;

/// Offline catalog settings, used when no store is configured.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Product fixture name
    #[arg(long, env = "LAPAK_FIXTURE", default_value = "demo")]
    pub fixture: String,

    /// Directory containing `products/<fixture>.yml`
    #[arg(long, env = "LAPAK_FIXTURES_DIR", default_value = "fixtures")]
    pub fixtures_dir: PathBuf,
}
