//! Terminal user interface for writing a shop review.
//!
//! The screen follows the Model-View-Update (MVU) pattern of bubbletea-rs:
//!
//! - **Model**: screen state in [`app::ReviewScreen`], wrapping the
//!   [`ReviewSubmissionWorkflow`]
//! - **View**: string rendering built from [`components`]
//! - **Update**: message-driven transitions; network and picker calls run as
//!   commands whose results come back as [`messages::ScreenMsg`] values
//!
//! # Initial Data Loading
//!
//! bubbletea-rs's `Model::init()` is a static function, so the screen reads
//! its context from module-level storage. Call [`set_screen_context`] before
//! starting the program.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use crate::api::{
    ReviewError, ReviewPayload, ReviewSubmissionGateway, ShopDirectory, ShopSummary, SubmitReceipt,
};
use crate::review::{ReviewContext, ReviewSubmissionWorkflow, Session, WorkflowOptions};

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
mod navigator;

pub use app::ReviewScreen;
pub use navigator::ScreenNavigator;

/// Global storage for the screen context, read by `ReviewScreen::init()`.
static SCREEN_CONTEXT: OnceLock<ScreenContext> = OnceLock::new();

/// Remote collaborators used by the screen's commands.
#[derive(Clone)]
pub struct ScreenServices {
    /// Shop metadata lookup.
    pub shop_directory: Arc<dyn ShopDirectory>,
    /// Review submission endpoint.
    pub review_gateway: Arc<dyn ReviewSubmissionGateway>,
}

impl std::fmt::Debug for ScreenServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenServices").finish_non_exhaustive()
    }
}

/// Everything the screen needs at start-up.
#[derive(Debug, Clone)]
pub struct ScreenContext {
    /// Workflow holding the fresh draft.
    pub workflow: ReviewSubmissionWorkflow,
    /// Remote collaborators.
    pub services: ScreenServices,
}

impl ScreenContext {
    /// Placeholder used when the program starts without a stored context.
    pub(crate) fn unconfigured() -> Self {
        let unconfigured: Arc<UnconfiguredServices> = Arc::new(UnconfiguredServices);
        Self {
            workflow: ReviewSubmissionWorkflow::new(
                ReviewContext::unconfigured(),
                Session::unconfigured(),
                WorkflowOptions::default(),
            ),
            services: ScreenServices {
                shop_directory: unconfigured.clone(),
                review_gateway: unconfigured,
            },
        }
    }
}

/// Sets the context for the review screen.
///
/// This must be called before starting the bubbletea-rs program.
///
/// # Returns
///
/// `true` if the context was set, `false` if it was already set.
pub fn set_screen_context(context: ScreenContext) -> bool {
    SCREEN_CONTEXT.set(context).is_ok()
}

/// Gets a clone of the stored screen context.
///
/// `OnceLock` cannot hand out ownership, so the context is cloned.
pub(crate) fn screen_context() -> Option<ScreenContext> {
    SCREEN_CONTEXT.get().cloned()
}

struct UnconfiguredServices;

fn not_configured() -> ReviewError {
    ReviewError::Configuration {
        message: "review screen context not configured".to_owned(),
    }
}

#[async_trait]
impl ShopDirectory for UnconfiguredServices {
    async fn fetch_by_id(&self, _shop_id: &str) -> Result<ShopSummary, ReviewError> {
        Err(not_configured())
    }
}

#[async_trait]
impl ReviewSubmissionGateway for UnconfiguredServices {
    async fn submit(&self, _payload: &ReviewPayload) -> Result<SubmitReceipt, ReviewError> {
        Err(not_configured())
    }
}
