//! Draft state for a review that has not been submitted yet.
//!
//! The draft holds the star rating, the comment and the attached media in
//! attach order. It is only ever mutated through
//! [`crate::review::ReviewSubmissionWorkflow`].

use std::fmt;

use thiserror::Error;

use crate::media::{MediaKind, PickedAsset};

/// Star rating in the range 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Lowest selectable rating.
    pub const MIN: u8 = 1;
    /// Highest selectable rating.
    pub const MAX: u8 = 5;

    /// Validates a star index.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::RatingOutOfRange`] for values outside 1..=5.
    pub const fn new(value: u8) -> Result<Self, DraftError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(DraftError::RatingOutOfRange { value })
        }
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// One more star, capped at five.
    #[must_use]
    pub const fn increment(self) -> Self {
        if self.0 < Self::MAX { Self(self.0 + 1) } else { self }
    }

    /// One fewer star, floored at one.
    #[must_use]
    pub const fn decrement(self) -> Self {
        if self.0 > Self::MIN { Self(self.0 - 1) } else { self }
    }

    /// Every selectable rating in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an attachment within one draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(u64);

impl MediaId {
    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A photo or video attached to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    /// Identity of this attachment within the draft.
    pub id: MediaId,
    /// Location of the media.
    pub uri: String,
    /// Kind the picker was opened for.
    pub kind: MediaKind,
    /// MIME type reported by the picker.
    pub mime_type: Option<String>,
    /// Original file name, if the picker knew it.
    pub display_name: Option<String>,
}

/// Errors raised while mutating a draft.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    /// A rating outside 1..=5 was requested.
    #[error("rating {value} is outside 1..=5")]
    RatingOutOfRange {
        /// The rejected value.
        value: u8,
    },
}

/// In-memory review draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    rating: Rating,
    comment: String,
    attachments: Vec<MediaRef>,
    next_media_id: u64,
}

impl ReviewDraft {
    /// Empty draft with a one-star rating.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Current comment.
    #[must_use]
    pub const fn comment(&self) -> &str {
        self.comment.as_str()
    }

    /// Attachments in attach order.
    #[must_use]
    pub fn attachments(&self) -> &[MediaRef] {
        &self.attachments
    }

    pub(crate) const fn set_rating(&mut self, rating: Rating) {
        self.rating = rating;
    }

    pub(crate) fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }

    pub(crate) fn push_attachment(&mut self, kind: MediaKind, asset: PickedAsset) -> MediaId {
        let id = MediaId(self.next_media_id);
        self.next_media_id = self.next_media_id.saturating_add(1);
        self.attachments.push(MediaRef {
            id,
            uri: asset.uri,
            kind,
            mime_type: asset.mime_type,
            display_name: asset.file_name,
        });
        id
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Option<MediaRef> {
        (index < self.attachments.len()).then(|| self.attachments.remove(index))
    }

    pub(crate) fn remove_by_id(&mut self, id: MediaId) -> Option<MediaRef> {
        let index = self.attachments.iter().position(|media| media.id == id)?;
        self.remove_at(index)
    }
}
