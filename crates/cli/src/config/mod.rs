//! CLI configuration module

use clap::Parser;

use crate::{
    commands::Command,
    config::{
        catalog::CatalogConfig, logging::LoggingConfig, payment::PaymentConfig,
        storage::StorageConfig, store::StoreConfig,
    },
};

pub(crate) mod catalog;
pub(crate) mod logging;
pub(crate) mod payment;
pub(crate) mod storage;
pub(crate) mod store;

/// Lapak storefront configuration
#[derive(Debug, Parser)]
#[command(name = "lapak", about = "Lapak storefront", long_about = None)]
pub struct CliConfig {
    /// Hosted store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Local data settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Offline catalog settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Payment code settings.
    #[command(flatten)]
    pub payment: PaymentConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    pub(crate) command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
