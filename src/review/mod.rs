//! Review drafting and submission.
//!
//! A review refers to one shop and one order. [`ReviewContext`] carries the
//! identifiers handed over by navigation, [`Session`] the signed-in user, and
//! [`ReviewSubmissionWorkflow`] the mutable draft plus its submission state.

mod context;
mod draft;
mod session;
mod workflow;

pub use context::{OrderProduct, OrderReferencePolicy, ReviewContext};
pub use draft::{DraftError, MediaId, MediaRef, Rating, ReviewDraft};
pub use session::Session;
pub use workflow::{
    AttachOutcome, MediaPickFailurePolicy, NavigationHost, ReviewSubmissionWorkflow,
    ShopLoadState, SubmissionState, WorkflowOptions,
};

#[cfg(test)]
pub use workflow::MockNavigationHost;
