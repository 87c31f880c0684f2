//! Media selection for review attachments.
//!
//! The workflow asks a [`MediaPicker`] for at most one asset of a given
//! [`MediaKind`]. Pickers report cancellation as `Ok(None)` so that the
//! workflow can tell "the user backed out" apart from a picker failure.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::ReviewError;

pub mod files;
mod local;

pub use local::LocalFileMediaPicker;

/// Kind of media a picker is opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image.
    Photo,
    /// Video clip.
    Video,
}

impl MediaKind {
    /// Lowercase label used in prompts and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }

    /// Parses `photo` or `video`, ignoring case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "photo" | "image" => Some(Self::Photo),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters passed to a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaPickRequest {
    /// Kind of media to select.
    pub kind: MediaKind,
    /// Maximum number of assets; the workflow always asks for one.
    pub selection_limit: u8,
}

impl MediaPickRequest {
    /// Single-selection request for `kind`.
    #[must_use]
    pub const fn single(kind: MediaKind) -> Self {
        Self {
            kind,
            selection_limit: 1,
        }
    }
}

/// Asset returned by a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedAsset {
    /// Location of the asset.
    pub uri: String,
    /// MIME type, when known.
    pub mime_type: Option<String>,
    /// Original file name, when known.
    pub file_name: Option<String>,
}

/// User-driven media selection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaPicker: Send + Sync {
    /// Lets the user pick at most one asset.
    ///
    /// Returns `Ok(None)` when the user cancels.
    async fn pick(&self, request: MediaPickRequest) -> Result<Option<PickedAsset>, ReviewError>;
}
