//! Message types for the review screen update loop.
//!
//! Messages represent user actions, async command results, and system events.

use crate::api::{ReviewError, ShopSummary, SubmitReceipt};
use crate::media::{MediaKind, PickedAsset};

/// Messages for the review screen.
#[derive(Debug, Clone)]
pub enum ScreenMsg {
    // Focus
    /// Move focus to the next control.
    FocusNext,
    /// Move focus to the previous control.
    FocusPrevious,
    /// Press the focused control.
    Activate,

    // Draft edits
    /// Select a rating by star count.
    SetRating(u8),
    /// One more star.
    RatingUp,
    /// One fewer star.
    RatingDown,
    /// Start editing the comment.
    EditComment,
    /// Open the path prompt for a photo or video.
    OpenPicker(MediaKind),
    /// Remove the attachment at this position.
    RemoveAttachment(usize),
    /// Remove the focused attachment, if any.
    RemoveFocusedAttachment,
    /// Send the review.
    Submit,

    // Text entry
    /// Character typed into the active text field.
    InsertChar(char),
    /// Delete the last character of the active text field.
    Backspace,
    /// Accept the active text field.
    ConfirmInput,

    // Async results
    /// The shop metadata fetch settled.
    ShopLoaded(Result<ShopSummary, ReviewError>),
    /// The picker settled.
    MediaPicked {
        /// Kind the picker was opened for.
        kind: MediaKind,
        /// Picker outcome.
        result: Result<Option<PickedAsset>, ReviewError>,
    },
    /// The submission request settled.
    SubmitFinished(Result<SubmitReceipt, ReviewError>),

    // Dialogs and lifecycle
    /// Cancel a prompt or close an error dialog.
    Escape,
    /// Acknowledge the open dialog.
    DismissDialog,
    /// Quit the application.
    Quit,
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}
