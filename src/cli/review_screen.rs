//! TUI mode for writing a review.
//!
//! This module provides the entry point for the interactive terminal screen.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;

use shop_review::tui::{ReviewScreen, ScreenContext, ScreenServices, set_screen_context};
use shop_review::{ReviewError, ShopReviewConfig};

use super::{Prepared, prepare};

/// Runs the interactive review screen.
///
/// # Errors
///
/// Returns an error if:
/// - Required configuration is missing or invalid
/// - The order file cannot be read or parsed
/// - The TUI fails to initialise
pub async fn run(config: &ShopReviewConfig) -> Result<(), ReviewError> {
    let Prepared {
        workflow,
        shop_directory,
        review_gateway,
    } = prepare(config)?;

    // ReviewScreen::init() reads the context from module-level storage.
    let stored = set_screen_context(ScreenContext {
        workflow,
        services: ScreenServices {
            shop_directory: Arc::new(shop_directory),
            review_gateway: Arc::new(review_gateway),
        },
    });
    if !stored {
        tracing::warn!("screen context already set; keeping the existing one");
    }

    run_tui().await.map_err(|error| ReviewError::Io {
        message: format!("TUI error: {error}"),
    })
}

/// Runs the bubbletea-rs program with the `ReviewScreen` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    let program = Program::<ReviewScreen>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
