//! Payment Config

use clap::Args;

/// Payment code settings.
#[derive(Debug, Args)]
pub struct PaymentConfig {
    /// QRIS payload shown to buyers instead of the built-in code
    #[arg(long, env = "LAPAK_QRIS_PAYLOAD")]
    pub qris_payload: Option<String>,
}
