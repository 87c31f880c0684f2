//! UI components for the review screen.
//!
//! Components render to strings. Interactive pieces are built on the
//! [`Column`] and [`Row`] layout containers, which carry the message a press
//! emits.

mod attachment_strip;
mod dialog;
mod layout;
mod product_card;
mod star_rating;
mod text_fit;

pub use attachment_strip::{AttachmentStrip, AttachmentStripViewContext};
pub use dialog::{Dialog, DialogKind};
pub use layout::{ACTIVE_OPACITY, Column, Justify, Row};
pub use product_card::ProductCard;
pub use star_rating::StarRating;
