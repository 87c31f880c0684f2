//! Review screen model and message handling.
//!
//! [`ReviewScreen`] wraps a [`ReviewSubmissionWorkflow`] and adds what only a
//! terminal needs: keyboard focus, text entry for the comment and the media
//! path prompt, and the confirmation or error dialog.

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::Cmd;
use camino::Utf8PathBuf;

use crate::api::{ReviewError, ReviewPayload, SubmitReceipt};
use crate::media::{LocalFileMediaPicker, MediaKind, MediaPickRequest, MediaPicker};
use crate::review::{AttachOutcome, Rating, ReviewSubmissionWorkflow, SubmissionState};
use crate::tui::components::{
    AttachmentStrip, AttachmentStripViewContext, Dialog, DialogKind, Row, StarRating,
};
use crate::tui::messages::ScreenMsg;
use crate::tui::{ScreenContext, ScreenNavigator, ScreenServices};

mod model_impl;
mod rendering;

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

/// A control that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The add-photo button.
    AddPhoto,
    /// The add-video button.
    AddVideo,
    /// The attachment at this position.
    Attachment(usize),
    /// The star selector.
    Rating,
    /// The comment field.
    Comment,
    /// The submit button.
    Submit,
}

/// Text field currently receiving keystrokes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TextEntry {
    Comment(String),
    MediaPath { kind: MediaKind, buffer: String },
}

/// Main model for the review screen.
#[derive(Debug)]
pub struct ReviewScreen {
    workflow: ReviewSubmissionWorkflow,
    services: ScreenServices,
    navigator: Arc<ScreenNavigator>,
    focus: FocusTarget,
    entry: Option<TextEntry>,
    picking: Option<MediaKind>,
    dialog: Option<Dialog>,
    status: Option<String>,
    width: u16,
    height: u16,
}

impl ReviewScreen {
    /// Creates the screen for `context`. The shop fetch is started by
    /// [`Self::load_shop_cmd`].
    #[must_use]
    pub fn new(context: ScreenContext) -> Self {
        Self {
            workflow: context.workflow,
            services: context.services,
            navigator: Arc::new(ScreenNavigator::new()),
            focus: FocusTarget::AddPhoto,
            entry: None,
            picking: None,
            dialog: None,
            status: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    /// The wrapped workflow.
    #[must_use]
    pub const fn workflow(&self) -> &ReviewSubmissionWorkflow {
        &self.workflow
    }

    /// The open dialog, if any.
    #[must_use]
    pub const fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Whether the screen asked to navigate back.
    #[must_use]
    pub fn has_navigated_back(&self) -> bool {
        self.navigator.has_left()
    }

    /// Controls in focus order.
    #[must_use]
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        let attachments =
            (0..self.workflow.draft().attachments().len()).map(FocusTarget::Attachment);
        [FocusTarget::AddPhoto, FocusTarget::AddVideo]
            .into_iter()
            .chain(attachments)
            .chain([FocusTarget::Rating, FocusTarget::Comment, FocusTarget::Submit])
            .collect()
    }

    /// The control holding focus.
    #[must_use]
    pub const fn focused_target(&self) -> FocusTarget {
        self.focus
    }

    /// Handles a screen message and returns any follow-up command.
    pub fn handle_message(&mut self, msg: &ScreenMsg) -> Option<Cmd> {
        match msg {
            ScreenMsg::FocusNext | ScreenMsg::FocusPrevious | ScreenMsg::Activate => {
                self.handle_focus_msg(msg)
            }
            ScreenMsg::SetRating(_)
            | ScreenMsg::RatingUp
            | ScreenMsg::RatingDown
            | ScreenMsg::EditComment
            | ScreenMsg::OpenPicker(_)
            | ScreenMsg::RemoveAttachment(_)
            | ScreenMsg::RemoveFocusedAttachment
            | ScreenMsg::Submit => self.handle_draft_msg(msg),
            ScreenMsg::InsertChar(_) | ScreenMsg::Backspace | ScreenMsg::ConfirmInput => {
                self.handle_entry_msg(msg)
            }
            ScreenMsg::ShopLoaded(_)
            | ScreenMsg::MediaPicked { .. }
            | ScreenMsg::SubmitFinished(_) => self.handle_result_msg(msg),
            ScreenMsg::Escape
            | ScreenMsg::DismissDialog
            | ScreenMsg::Quit
            | ScreenMsg::WindowResized { .. } => self.handle_lifecycle_msg(msg),
        }
    }

    fn handle_focus_msg(&mut self, msg: &ScreenMsg) -> Option<Cmd> {
        let targets = self.focus_targets();
        let count = targets.len();
        let current = targets
            .iter()
            .position(|target| *target == self.focus)
            .unwrap_or(0);
        match msg {
            ScreenMsg::FocusNext => {
                let next = current.saturating_add(1).checked_rem(count).unwrap_or(0);
                self.focus = targets.get(next).copied().unwrap_or(FocusTarget::AddPhoto);
                None
            }
            ScreenMsg::FocusPrevious => {
                let previous = current
                    .checked_sub(1)
                    .unwrap_or_else(|| count.saturating_sub(1));
                self.focus = targets.get(previous).copied().unwrap_or(FocusTarget::AddPhoto);
                None
            }
            ScreenMsg::Activate => {
                let pressed = self.control(self.focus).and_then(|control| control.press())?;
                self.handle_message(&pressed)
            }
            _ => None,
        }
    }

    fn handle_draft_msg(&mut self, msg: &ScreenMsg) -> Option<Cmd> {
        match msg {
            ScreenMsg::SetRating(value) => {
                if let Ok(rating) = Rating::new(*value) {
                    self.workflow.set_rating(rating);
                }
                None
            }
            ScreenMsg::RatingUp => {
                self.workflow
                    .set_rating(self.workflow.draft().rating().increment());
                None
            }
            ScreenMsg::RatingDown => {
                self.workflow
                    .set_rating(self.workflow.draft().rating().decrement());
                None
            }
            ScreenMsg::EditComment => {
                self.entry = Some(TextEntry::Comment(self.workflow.draft().comment().to_owned()));
                None
            }
            ScreenMsg::OpenPicker(kind) => {
                self.open_path_prompt(*kind);
                None
            }
            ScreenMsg::RemoveAttachment(index) => {
                self.remove_attachment(*index);
                None
            }
            ScreenMsg::RemoveFocusedAttachment => {
                if let FocusTarget::Attachment(index) = self.focus {
                    self.remove_attachment(index);
                } else {
                    self.status = Some("Focus an attachment to remove it".to_owned());
                }
                None
            }
            ScreenMsg::Submit => self.start_submission(),
            _ => None,
        }
    }

    fn handle_entry_msg(&mut self, msg: &ScreenMsg) -> Option<Cmd> {
        if matches!(msg, ScreenMsg::ConfirmInput) {
            return self.confirm_entry();
        }

        let buffer = match self.entry.as_mut()? {
            TextEntry::Comment(buffer) | TextEntry::MediaPath { buffer, .. } => buffer,
        };
        match msg {
            ScreenMsg::InsertChar(character) => buffer.push(*character),
            ScreenMsg::Backspace => {
                buffer.pop();
            }
            _ => {}
        }
        None
    }

    fn handle_result_msg(&mut self, msg: &ScreenMsg) -> Option<Cmd> {
        match msg {
            ScreenMsg::ShopLoaded(result) => {
                self.workflow.apply_shop_result(result.clone());
                None
            }
            ScreenMsg::MediaPicked { kind, result } => {
                self.picking = None;
                match self.workflow.apply_pick_result(*kind, result.clone()) {
                    Ok(AttachOutcome::Attached(_)) => {
                        self.status = Some(format!("Attached {kind}"));
                    }
                    Ok(AttachOutcome::Cancelled) => {
                        self.status = Some("No file selected".to_owned());
                    }
                    Ok(AttachOutcome::Ignored) => self.status = None,
                    Err(error) => self.dialog = Some(Dialog::error(error.to_string())),
                }
                None
            }
            ScreenMsg::SubmitFinished(result) => {
                self.finish_submission(result.clone());
                None
            }
            _ => None,
        }
    }

    fn handle_lifecycle_msg(&mut self, msg: &ScreenMsg) -> Option<Cmd> {
        match msg {
            ScreenMsg::Escape => {
                self.escape();
                None
            }
            ScreenMsg::DismissDialog => self.dismiss_dialog(),
            ScreenMsg::Quit => Some(bubbletea_rs::quit()),
            ScreenMsg::WindowResized { width, height } => {
                self.width = *width;
                self.height = *height;
                None
            }
            _ => None,
        }
    }

    /// Pressable control for `target`; its press emits the control's action.
    pub(crate) fn control(&self, target: FocusTarget) -> Option<Row<ScreenMsg>> {
        let focused = self.focus == target;
        let row = match target {
            FocusTarget::AddPhoto => Row::new()
                .child("[ + Add photo ]")
                .with_on_press(ScreenMsg::OpenPicker(MediaKind::Photo)),
            FocusTarget::AddVideo => Row::new()
                .child("[ + Add video ]")
                .with_on_press(ScreenMsg::OpenPicker(MediaKind::Video)),
            FocusTarget::Attachment(index) => {
                return AttachmentStrip::item(
                    &self.attachment_context(),
                    index,
                    ScreenMsg::RemoveAttachment(index),
                );
            }
            FocusTarget::Rating => StarRating::new(self.workflow.draft().rating())
                .row(ScreenMsg::RatingUp),
            FocusTarget::Comment => Row::new()
                .child("Comment:")
                .child(self.comment_preview())
                .with_on_press(ScreenMsg::EditComment),
            FocusTarget::Submit => Row::new()
                .child(self.submit_label())
                .with_on_press(ScreenMsg::Submit),
        };
        Some(row.focused(focused))
    }

    pub(crate) fn attachment_context(&self) -> AttachmentStripViewContext<'_> {
        let focused = match self.focus {
            FocusTarget::Attachment(index) => Some(index),
            _ => None,
        };
        AttachmentStripViewContext {
            attachments: self.workflow.draft().attachments(),
            focused,
            max_width: usize::from(self.width),
        }
    }

    fn open_path_prompt(&mut self, kind: MediaKind) {
        if self.picking.is_some() {
            self.status = Some("Still attaching the previous file".to_owned());
            return;
        }
        self.entry = Some(TextEntry::MediaPath {
            kind,
            buffer: String::new(),
        });
        self.status = None;
    }

    fn confirm_entry(&mut self) -> Option<Cmd> {
        match self.entry.take()? {
            TextEntry::Comment(text) => {
                self.workflow.set_comment(text);
                None
            }
            TextEntry::MediaPath { kind, buffer } => {
                let path = buffer.trim();
                let selection = (!path.is_empty()).then(|| Utf8PathBuf::from(path));
                self.picking = Some(kind);
                Some(Self::pick_cmd(kind, selection))
            }
        }
    }

    fn escape(&mut self) {
        if matches!(self.dialog.as_ref().map(Dialog::kind), Some(DialogKind::Error)) {
            self.dialog = None;
            return;
        }
        match self.entry.take() {
            Some(TextEntry::MediaPath { .. }) => {
                self.status = Some("No file selected".to_owned());
            }
            Some(TextEntry::Comment(_)) | None => {}
        }
    }

    fn remove_attachment(&mut self, index: usize) {
        if let Some(removed) = self.workflow.remove_media(index) {
            let name = removed.display_name.unwrap_or_else(|| format!("file_{index}"));
            self.status = Some(format!("Removed {name}"));
            self.focus = self.focus_after_removal(index);
        }
    }

    /// Keeps focus on the same control after the attachment at `removed`
    /// is gone. Focus on the removed item moves to the next attachment, or
    /// to the rating when none follows.
    fn focus_after_removal(&self, removed: usize) -> FocusTarget {
        let FocusTarget::Attachment(index) = self.focus else {
            return self.focus;
        };
        let remaining = self.workflow.draft().attachments().len();
        let shifted = if index > removed {
            index.saturating_sub(1)
        } else {
            index
        };
        if shifted < remaining {
            FocusTarget::Attachment(shifted)
        } else {
            FocusTarget::Rating
        }
    }

    fn start_submission(&mut self) -> Option<Cmd> {
        match self.workflow.begin_submit() {
            Ok(payload) => {
                self.status = Some("Submitting review...".to_owned());
                Some(self.submit_cmd(payload))
            }
            Err(ReviewError::SubmissionInFlight) => {
                self.status = Some("Your review is already being sent".to_owned());
                None
            }
            Err(ReviewError::AlreadySubmitted) => None,
            Err(error) => {
                self.dialog = Some(Dialog::error(error.to_string()));
                None
            }
        }
    }

    fn finish_submission(&mut self, result: Result<SubmitReceipt, ReviewError>) {
        if self.workflow.submission_state() != SubmissionState::Submitting {
            return;
        }
        self.status = None;
        self.dialog = Some(match self.workflow.finish_submit(result) {
            Ok(_) => Dialog::success("Thank you! Your review has been submitted."),
            Err(error) => Dialog::error(error.to_string()),
        });
    }

    fn dismiss_dialog(&mut self) -> Option<Cmd> {
        let dialog = self.dialog.take()?;
        if dialog.kind() == DialogKind::Success
            && self.workflow.acknowledge_success(self.navigator.as_ref())
            && self.navigator.has_left()
        {
            return Some(bubbletea_rs::quit());
        }
        None
    }

    /// Command that fetches the shop metadata.
    #[must_use]
    pub fn load_shop_cmd(&self) -> Cmd {
        let directory = Arc::clone(&self.services.shop_directory);
        let shop_id = self.workflow.context().shop_id().to_owned();
        Box::pin(async move {
            let result = directory.fetch_by_id(&shop_id).await;
            Some(Box::new(ScreenMsg::ShopLoaded(result)) as Box<dyn Any + Send>)
        })
    }

    fn pick_cmd(kind: MediaKind, selection: Option<Utf8PathBuf>) -> Cmd {
        Box::pin(async move {
            let picker = LocalFileMediaPicker::new(selection);
            let result = picker.pick(MediaPickRequest::single(kind)).await;
            Some(Box::new(ScreenMsg::MediaPicked { kind, result }) as Box<dyn Any + Send>)
        })
    }

    fn submit_cmd(&self, payload: ReviewPayload) -> Cmd {
        let gateway = Arc::clone(&self.services.review_gateway);
        Box::pin(async move {
            let result = gateway.submit(&payload).await;
            Some(Box::new(ScreenMsg::SubmitFinished(result)) as Box<dyn Any + Send>)
        })
    }
}
