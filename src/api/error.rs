//! Error types exposed by the storefront API layer and the review workflow.

use thiserror::Error;

/// Errors surfaced while parsing screen input or talking to the storefront API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The configured API base URL could not be parsed.
    #[error("API base URL is invalid: {0}")]
    InvalidUrl(String),

    /// The navigation parameter did not have the expected shape.
    #[error("invalid review context: {message}")]
    InvalidContext {
        /// Which part of the navigation parameter was rejected.
        message: String,
    },

    /// The order contains no product whose identifier can reference the order.
    #[error("order has no product to reference in the review")]
    MissingOrderReference,

    /// The signed-in user is unknown.
    #[error("user id is required to submit a review")]
    MissingUser,

    /// Networking failed while calling the storefront API.
    #[error("network error talking to the storefront API: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The storefront API rejected the request.
    #[error("storefront API error: {message}")]
    Api {
        /// Status and response body describing the failure.
        message: String,
    },

    /// The API answered with a body that could not be decoded.
    #[error("failed to decode storefront API response: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// The selected media file does not exist.
    #[error("media file not found: {path}")]
    MediaNotFound {
        /// Path the user selected.
        path: String,
    },

    /// The selected media file does not match the requested media kind.
    #[error("{path} is not a {expected} file")]
    MediaKindMismatch {
        /// Path the user selected.
        path: String,
        /// Media kind the picker was opened for.
        expected: String,
    },

    /// The attachment URI cannot be uploaded from this device.
    #[error("unsupported media URI: {uri}")]
    UnsupportedMediaUri {
        /// The offending URI.
        uri: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// A submission for this draft is already in flight.
    #[error("a review submission is already in progress")]
    SubmissionInFlight,

    /// The draft was already submitted successfully.
    #[error("this review has already been submitted")]
    AlreadySubmitted,
}
