//! Store Config

use clap::Args;
use lapak_app::remote::{DEFAULT_READ_ATTEMPTS, RemoteConfig, RetryPolicy};
use url::Url;

/// Hosted store settings. Without them the CLI runs on the offline catalog.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Hosted store base URL
    #[arg(long, env = "LAPAK_STORE_URL", requires = "store_anon_key")]
    pub store_url: Option<Url>,

    /// Public API key of the hosted store
    #[arg(long, env = "LAPAK_STORE_ANON_KEY", hide_env_values = true)]
    pub store_anon_key: Option<String>,

    /// Attempts for read requests, including the first
    #[arg(long, env = "LAPAK_READ_ATTEMPTS", default_value_t = DEFAULT_READ_ATTEMPTS)]
    pub read_attempts: u32,
}

impl StoreConfig {
    /// Remote client settings, if a store is configured.
    pub fn remote(&self) -> Option<RemoteConfig> {
        let url = self.store_url.clone()?;
        let anon_key = self.store_anon_key.clone()?;

        let retry = RetryPolicy {
            attempts: self.read_attempts,
            ..RetryPolicy::default()
        };

        Some(RemoteConfig::new(url, anon_key).with_retry(retry))
    }
}
