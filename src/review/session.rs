//! Signed-in user context passed explicitly to the workflow.

use crate::api::ReviewError;

/// The user on whose behalf the review is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
}

impl Session {
    /// Creates a session for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingUser`] when the id is blank.
    pub fn new(user_id: impl AsRef<str>) -> Result<Self, ReviewError> {
        let trimmed = user_id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReviewError::MissingUser);
        }
        Ok(Self {
            user_id: trimmed.to_owned(),
        })
    }

    /// Session without a user, for a screen started unconfigured.
    pub(crate) const fn unconfigured() -> Self {
        Self {
            user_id: String::new(),
        }
    }

    /// The user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> &str {
        self.user_id.as_str()
    }
}
