//! Shop review library crate.
//!
//! The library drives the "write a review" screen a shopper opens after an
//! order: it fetches the shop's display data, lets the shopper pick a star
//! rating, write a comment and attach photos or videos, then submits the
//! review as a multipart request to the storefront API.
//!
//! - [`review`] holds the draft and the [`ReviewSubmissionWorkflow`]
//! - [`api`] talks to the storefront over HTTP
//! - [`media`] resolves picked files into attachments
//! - [`tui`] renders the screen in a terminal
//! - [`config`] and [`telemetry`] carry configuration and logging

pub mod api;
pub mod config;
pub mod media;
pub mod review;
pub mod telemetry;
pub mod tui;

pub use api::{
    ApiEndpoint, ApiSettings, ApiToken, HttpReviewGateway, HttpShopDirectory, ReviewError,
    ReviewPayload, ReviewSubmissionGateway, ShopDirectory, ShopSummary, SubmitReceipt,
};
pub use config::{AttachmentArg, ShopReviewConfig};
pub use media::{LocalFileMediaPicker, MediaKind, MediaPicker, PickedAsset};
pub use review::{
    AttachOutcome, MediaPickFailurePolicy, NavigationHost, Rating, ReviewContext, ReviewDraft,
    ReviewSubmissionWorkflow, Session, SubmissionState, WorkflowOptions,
};
pub use telemetry::{TelemetryEvent, TelemetrySink, TracingTelemetrySink};
