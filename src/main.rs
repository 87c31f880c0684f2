//! Shop review CLI entrypoint.
//!
//! Starts the interactive review screen, or submits straight away with
//! `--submit-now`.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use shop_review::{ReviewError, ShopReviewConfig};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ReviewError> {
    let config = load_config()?;
    shop_review::telemetry::init_logging(config.log_path())?;

    if config.submit_now {
        return cli::submit_now::run(&config).await;
    }

    cli::review_screen::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ReviewError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ShopReviewConfig, ReviewError> {
    ShopReviewConfig::load().map_err(|error| ReviewError::Configuration {
        message: error.to_string(),
    })
}
