//! Lapak terminal storefront

use std::{error::Error, io, process};

use tracing::error;

use crate::{config::CliConfig, shop::Shop};

mod catalog;
mod commands;
mod config;
mod errors;
mod logging;
mod render;
mod shop;
#[cfg(test)]
mod test_helpers;

/// Lapak storefront entry point
#[tokio::main]
pub async fn main() {
    let config = CliConfig::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = logging::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        process::exit(1);
    }

    let mut shop = match Shop::open(&config) {
        Ok(shop) => shop,
        Err(open_error) => {
            error!("failed to open shop: {open_error}");

            process::exit(1);
        }
    };

    let mut out = io::stdout().lock();

    if let Err(error) = commands::run(config.command, &mut shop, &mut out).await {
        #[expect(
            clippy::print_stderr,
            reason = "command failures are reported to the terminal user"
        )]
        {
            eprintln!("error: {error}");

            let mut source = error.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
        }

        process::exit(1);
    }
}
