//! Strip of attached photos and videos.
//!
//! Each attachment is its own pressable row so that pressing it removes that
//! attachment.

use crate::review::MediaRef;

use super::layout::{Column, Row};
use super::text_fit::fit_width;

/// Context for rendering the attachment strip.
#[derive(Debug, Clone)]
pub struct AttachmentStripViewContext<'a> {
    /// Attachments in attach order.
    pub attachments: &'a [MediaRef],
    /// Position of the focused attachment, if focus is in the strip.
    pub focused: Option<usize>,
    /// Maximum line width.
    pub max_width: usize,
}

/// Attachment list component.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachmentStrip;

impl AttachmentStrip {
    /// Label shown for one attachment.
    #[must_use]
    pub fn label(index: usize, media: &MediaRef) -> String {
        let name = media
            .display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map_or_else(|| format!("file_{index}"), ToOwned::to_owned);
        format!("[{}] {name}", media.kind)
    }

    /// Pressable row for the attachment at `index`; pressing emits `on_press`.
    #[must_use]
    pub fn item<M: Clone>(
        ctx: &AttachmentStripViewContext<'_>,
        index: usize,
        on_press: M,
    ) -> Option<Row<M>> {
        let media = ctx.attachments.get(index)?;
        let label = fit_width(&Self::label(index, media), ctx.max_width.saturating_sub(6));
        Some(
            Row::new()
                .child(label)
                .child("✕")
                .with_on_press(on_press)
                .focused(ctx.focused == Some(index)),
        )
    }

    /// Renders the strip; `on_press` builds the message for each position.
    #[must_use]
    pub fn view<M: Clone>(
        ctx: &AttachmentStripViewContext<'_>,
        on_press: impl Fn(usize) -> M,
    ) -> String {
        let header = format!("Attachments ({})", ctx.attachments.len());
        if ctx.attachments.is_empty() {
            return Column::<M>::new()
                .child(header)
                .child("  No photos or videos attached.")
                .render();
        }

        (0..ctx.attachments.len())
            .filter_map(|index| Self::item(ctx, index, on_press(index)))
            .fold(Column::<M>::new().child(header), |column, row| {
                column.child(row.render())
            })
            .render()
    }
}
