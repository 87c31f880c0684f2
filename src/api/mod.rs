//! Storefront API access for the review screen.
//!
//! This module wraps reqwest to resolve shop metadata and to send the
//! multipart review payload. Transport and status failures are mapped into
//! [`ReviewError`] so callers can surface them without exposing reqwest.

pub mod endpoint;
pub mod error;
pub mod gateway;
pub mod models;
pub mod payload;

pub use endpoint::{ApiEndpoint, ApiSettings, ApiToken};
pub use error::ReviewError;
pub use gateway::{HttpReviewGateway, HttpShopDirectory, ReviewSubmissionGateway, ShopDirectory};
pub use models::{ShopSummary, SubmitReceipt};
pub use payload::{PayloadFile, ReviewPayload};

#[cfg(test)]
pub use gateway::{MockReviewSubmissionGateway, MockShopDirectory};
