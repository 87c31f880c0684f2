//! CLI operation mode handlers.
//!
//! - [`review_screen`]: interactive terminal screen for writing the review
//! - [`submit_now`]: one-shot submission from command-line values
//!
//! Both modes start from [`prepare`]. Output formatting utilities are in
//! [`output`].

use std::sync::Arc;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use shop_review::{
    HttpReviewGateway, HttpShopDirectory, ReviewContext, ReviewError, ReviewSubmissionWorkflow,
    ShopReviewConfig, TracingTelemetrySink,
};

pub mod output;
pub mod review_screen;
pub mod submit_now;

/// Workflow and HTTP collaborators resolved from configuration.
pub struct Prepared {
    /// Workflow holding the fresh draft.
    pub workflow: ReviewSubmissionWorkflow,
    /// Shop metadata lookup.
    pub shop_directory: HttpShopDirectory,
    /// Review submission endpoint.
    pub review_gateway: HttpReviewGateway,
}

/// Reads the order file and builds the workflow and gateways.
///
/// # Errors
///
/// Returns [`ReviewError::Configuration`] when required settings are
/// missing, [`ReviewError::Io`] when the order file cannot be read, or
/// [`ReviewError::InvalidContext`] when it does not hold a navigation
/// parameter.
pub fn prepare(config: &ShopReviewConfig) -> Result<Prepared, ReviewError> {
    let context = read_order_file(config.require_order_file()?)?;
    let session = config.require_session()?;
    let settings = config.api_settings()?;

    let workflow = ReviewSubmissionWorkflow::new(context, session, config.workflow_options()?)
        .with_telemetry(Arc::new(TracingTelemetrySink));

    Ok(Prepared {
        workflow,
        shop_directory: HttpShopDirectory::new(settings.clone())?,
        review_gateway: HttpReviewGateway::new(settings)?,
    })
}

fn read_order_file(path: &Utf8Path) -> Result<ReviewContext, ReviewError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path.file_name().ok_or_else(|| ReviewError::Configuration {
        message: format!("order file '{path}' has no file name"),
    })?;

    let io_error = |error: std::io::Error| ReviewError::Io {
        message: format!("failed to read order file '{path}': {error}"),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    let json = dir.read_to_string(name).map_err(io_error)?;

    ReviewContext::from_json_str(&json)
}
