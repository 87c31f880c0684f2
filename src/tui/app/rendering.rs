//! Rendering helpers for the review screen.

use crate::review::SubmissionState;
use crate::tui::components::{AttachmentStrip, Column, Justify, ProductCard, Row};
use crate::tui::messages::ScreenMsg;

use super::{FocusTarget, ReviewScreen, TextEntry};

const TITLE: &str = "Write a review";
const INTRO: &str = "How was your order? Rate the shop and tell other shoppers about it.";
const COMMENT_PLACEHOLDER: &str = "(press c to write a comment)";
const CURSOR: &str = "▏";
const KEY_HELP: &str =
    "Tab: move  Enter: press  1-5/←→: rating  c: comment  p/v: add  x: remove  s: submit  q: quit";

impl ReviewScreen {
    pub(super) fn content_width(&self) -> usize {
        usize::from(self.width.max(1)).saturating_sub(1).max(1)
    }

    /// Renders the header with the title and product count.
    pub(super) fn render_header(&self) -> String {
        Row::<ScreenMsg>::new()
            .child(TITLE)
            .child(format!("Products({})", self.workflow.product_count()))
            .justify(Justify::SpaceBetween)
            .width(self.content_width())
            .render()
    }

    fn render_shop_line(&self) -> String {
        format!("Shop: {}", self.workflow.shop_name())
    }

    fn render_products(&self) -> String {
        let width = self.content_width();
        self.workflow
            .context()
            .products()
            .iter()
            .map(|product| ProductCard::view(product, width))
            .collect()
    }

    fn render_media_buttons(&self) -> String {
        let buttons = [FocusTarget::AddPhoto, FocusTarget::AddVideo]
            .into_iter()
            .filter_map(|target| self.control(target))
            .fold(Row::<ScreenMsg>::new().spacing(2), |row, button| {
                row.child(button.render())
            });
        buttons.render()
    }

    fn render_attachments(&self) -> String {
        AttachmentStrip::view(&self.attachment_context(), ScreenMsg::RemoveAttachment)
    }

    fn render_control(&self, target: FocusTarget) -> String {
        self.control(target)
            .map(|control| control.render())
            .unwrap_or_default()
    }

    pub(super) fn comment_preview(&self) -> String {
        if let Some(TextEntry::Comment(buffer)) = &self.entry {
            return format!("{buffer}{CURSOR}");
        }
        let comment = self.workflow.draft().comment();
        if comment.is_empty() {
            COMMENT_PLACEHOLDER.to_owned()
        } else {
            comment.replace('\n', " ")
        }
    }

    pub(super) const fn submit_label(&self) -> &'static str {
        match self.workflow.submission_state() {
            SubmissionState::Idle => "[ Submit review ]",
            SubmissionState::Submitting => "[ Submitting... ]",
            SubmissionState::Succeeded => "[ Submitted ]",
        }
    }

    fn render_prompt(&self) -> Option<String> {
        match &self.entry {
            Some(TextEntry::MediaPath { kind, buffer }) => Some(format!(
                "Path to {kind}: {buffer}{CURSOR}  (Enter: attach, Esc: cancel)"
            )),
            Some(TextEntry::Comment(_)) => {
                Some("Editing comment  (Enter: save, Esc: discard)".to_owned())
            }
            None => None,
        }
    }

    fn render_status_bar(&self) -> String {
        if let Some(kind) = self.picking {
            return format!("Attaching {kind}...");
        }
        self.status.clone().unwrap_or_else(|| KEY_HELP.to_owned())
    }

    /// Renders the whole form.
    pub(super) fn render_form(&self) -> String {
        let mut body = Column::<ScreenMsg>::new()
            .child(self.render_header())
            .child(INTRO)
            .child(self.render_shop_line())
            .child("")
            .child(self.render_products())
            .child("")
            .child(self.render_media_buttons())
            .child(self.render_attachments())
            .child("")
            .child(self.render_control(FocusTarget::Rating))
            .child(self.render_control(FocusTarget::Comment));
        if let Some(prompt) = self.render_prompt() {
            body = body.child(prompt);
        }
        body.child("")
            .child(self.render_control(FocusTarget::Submit))
            .child(self.render_status_bar())
            .render()
    }
}
