//! Review-submission workflow.
//!
//! [`ReviewSubmissionWorkflow`] owns the draft for one review screen. It
//! tracks the shop metadata fetch, applies user edits, gates submission so
//! that at most one request is in flight, and hands the confirmation
//! acknowledgement to the [`NavigationHost`].
//!
//! Each suspending operation is exposed twice: as an `async` convenience that
//! awaits the collaborator, and as a synchronous `apply_*`/`finish_*` step so
//! an event loop can run the future elsewhere and feed the result back.

use std::fmt;

use crate::api::{
    PayloadFile, ReviewError, ReviewPayload, ReviewSubmissionGateway, ShopDirectory, ShopSummary,
    SubmitReceipt,
};
use crate::media::{MediaKind, MediaPickRequest, MediaPicker, PickedAsset};
use crate::telemetry::{SharedTelemetrySink, TelemetryEvent, noop_sink};

use super::context::ReviewContext;
use super::draft::{MediaId, MediaRef, Rating, ReviewDraft};
use super::session::Session;

/// What happens when the media picker itself fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaPickFailurePolicy {
    /// Log the failure and carry on as if nothing was picked.
    #[default]
    Ignore,
    /// Return the failure to the caller so it can be shown.
    Surface,
}

impl MediaPickFailurePolicy {
    /// Parses `ignore` or `surface`, ignoring case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ignore" => Some(Self::Ignore),
            "surface" => Some(Self::Surface),
            _ => None,
        }
    }
}

/// Tunables for a workflow instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowOptions {
    /// Handling of picker failures.
    pub media_pick_failure: MediaPickFailurePolicy,
}

/// Progress of the one-off shop metadata fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopLoadState {
    /// The fetch has not settled yet.
    Loading,
    /// The fetch settled; failures settle to an empty summary.
    Loaded(ShopSummary),
}

/// Submission progress of the draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in flight; submit is allowed.
    #[default]
    Idle,
    /// A request is in flight.
    Submitting,
    /// The API accepted the review; the draft is finished.
    Succeeded,
}

/// Result of an attach attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// A new attachment was appended.
    Attached(MediaId),
    /// The user cancelled the picker.
    Cancelled,
    /// The picker failed and the failure was ignored.
    Ignored,
}

/// Back-navigation performed after a successful submission.
#[cfg_attr(test, mockall::automock)]
pub trait NavigationHost {
    /// Leaves the review screen.
    fn go_back(&self);
}

/// Draft lifecycle from screen entry to submission.
#[derive(Clone)]
pub struct ReviewSubmissionWorkflow {
    context: ReviewContext,
    session: Session,
    options: WorkflowOptions,
    draft: ReviewDraft,
    shop: ShopLoadState,
    submission: SubmissionState,
    navigated_back: bool,
    telemetry: SharedTelemetrySink,
}

impl fmt::Debug for ReviewSubmissionWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewSubmissionWorkflow")
            .field("context", &self.context)
            .field("session", &self.session)
            .field("options", &self.options)
            .field("draft", &self.draft)
            .field("shop", &self.shop)
            .field("submission", &self.submission)
            .field("navigated_back", &self.navigated_back)
            .finish_non_exhaustive()
    }
}

impl ReviewSubmissionWorkflow {
    /// Starts a workflow with an empty draft; the shop fetch is pending.
    #[must_use]
    pub fn new(context: ReviewContext, session: Session, options: WorkflowOptions) -> Self {
        Self {
            context,
            session,
            options,
            draft: ReviewDraft::new(),
            shop: ShopLoadState::Loading,
            submission: SubmissionState::Idle,
            navigated_back: false,
            telemetry: noop_sink(),
        }
    }

    /// Routes telemetry events to `sink`.
    #[must_use]
    pub fn with_telemetry(mut self, sink: SharedTelemetrySink) -> Self {
        self.telemetry = sink;
        self
    }

    /// The order context.
    #[must_use]
    pub const fn context(&self) -> &ReviewContext {
        &self.context
    }

    /// The signed-in user.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The current draft.
    #[must_use]
    pub const fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    /// Number of products in the order.
    #[must_use]
    pub const fn product_count(&self) -> usize {
        self.context.product_count()
    }

    /// Shop fetch progress.
    #[must_use]
    pub const fn shop_state(&self) -> &ShopLoadState {
        &self.shop
    }

    /// Whether the shop fetch is still pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.shop, ShopLoadState::Loading)
    }

    /// Shop name for display; blank while loading or when unknown.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        match &self.shop {
            ShopLoadState::Loading => "",
            ShopLoadState::Loaded(summary) => summary.display_name(),
        }
    }

    /// Submission progress.
    #[must_use]
    pub const fn submission_state(&self) -> SubmissionState {
        self.submission
    }

    /// Fetches shop metadata and settles the loading flag.
    pub async fn load_shop(&mut self, directory: &dyn ShopDirectory) {
        let result = directory.fetch_by_id(self.context.shop_id()).await;
        self.apply_shop_result(result);
    }

    /// Settles the shop fetch with an externally awaited result.
    ///
    /// Only the first result is applied; the summary is never refreshed.
    pub fn apply_shop_result(&mut self, result: Result<ShopSummary, ReviewError>) {
        if !self.is_loading() {
            return;
        }

        let summary = result.unwrap_or_else(|error| {
            tracing::warn!(
                shop_id = self.context.shop_id(),
                "failed to fetch shop details: {error}"
            );
            ShopSummary::empty(self.context.shop_id())
        });
        self.shop = ShopLoadState::Loaded(summary);
    }

    /// Replaces the rating.
    pub const fn set_rating(&mut self, rating: Rating) {
        self.draft.set_rating(rating);
    }

    /// Replaces the comment verbatim.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.draft.set_comment(comment.into());
    }

    /// Opens the picker for one asset of `kind` and appends the result.
    ///
    /// # Errors
    ///
    /// Returns the picker failure when the policy is
    /// [`MediaPickFailurePolicy::Surface`].
    pub async fn attach_media(
        &mut self,
        kind: MediaKind,
        picker: &dyn MediaPicker,
    ) -> Result<AttachOutcome, ReviewError> {
        let result = picker.pick(MediaPickRequest::single(kind)).await;
        self.apply_pick_result(kind, result)
    }

    /// Applies an externally awaited picker result.
    ///
    /// # Errors
    ///
    /// Returns the picker failure when the policy is
    /// [`MediaPickFailurePolicy::Surface`].
    pub fn apply_pick_result(
        &mut self,
        kind: MediaKind,
        result: Result<Option<PickedAsset>, ReviewError>,
    ) -> Result<AttachOutcome, ReviewError> {
        match result {
            Ok(Some(asset)) => Ok(AttachOutcome::Attached(
                self.draft.push_attachment(kind, asset),
            )),
            Ok(None) => Ok(AttachOutcome::Cancelled),
            Err(error) => {
                let surfaced = self.options.media_pick_failure == MediaPickFailurePolicy::Surface;
                tracing::warn!(%kind, surfaced, "error adding file: {error}");
                self.telemetry.record(TelemetryEvent::MediaPickFailed {
                    kind: kind.label().to_owned(),
                    error: error.to_string(),
                    surfaced,
                });
                if surfaced {
                    Err(error)
                } else {
                    Ok(AttachOutcome::Ignored)
                }
            }
        }
    }

    /// Removes the attachment at `index`; out-of-range indices change nothing.
    pub fn remove_media(&mut self, index: usize) -> Option<MediaRef> {
        self.draft.remove_at(index)
    }

    /// Removes the attachment with identity `id`.
    pub fn remove_media_by_id(&mut self, id: MediaId) -> Option<MediaRef> {
        self.draft.remove_by_id(id)
    }

    /// Serialises the draft into the multipart payload.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingOrderReference`] when the order has no
    /// first product id.
    pub fn build_payload(&self) -> Result<ReviewPayload, ReviewError> {
        let order_id = self
            .context
            .order_reference()
            .ok_or(ReviewError::MissingOrderReference)?;

        let files = self
            .draft
            .attachments()
            .iter()
            .enumerate()
            .map(|(index, media)| PayloadFile {
                uri: media.uri.clone(),
                mime_type: media.mime_type.clone(),
                name: media
                    .display_name
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| format!("file_{index}")),
            })
            .collect();

        Ok(ReviewPayload {
            user_id: self.session.user_id().to_owned(),
            shop_id: self.context.shop_id().to_owned(),
            order_id: order_id.to_owned(),
            rating: self.draft.rating().to_string(),
            comment: self.draft.comment().to_owned(),
            files,
        })
    }

    /// Moves `Idle → Submitting` and returns the payload to send.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::SubmissionInFlight`] while a request is
    /// outstanding, [`ReviewError::AlreadySubmitted`] after success, or the
    /// payload build failure (the state stays `Idle`).
    pub fn begin_submit(&mut self) -> Result<ReviewPayload, ReviewError> {
        match self.submission {
            SubmissionState::Submitting => return Err(ReviewError::SubmissionInFlight),
            SubmissionState::Succeeded => return Err(ReviewError::AlreadySubmitted),
            SubmissionState::Idle => {}
        }

        let payload = self.build_payload()?;
        tracing::debug!(
            shop_id = payload.shop_id.as_str(),
            order_id = payload.order_id.as_str(),
            rating = payload.rating.as_str(),
            files = payload.files.len(),
            "submitting review"
        );
        self.submission = SubmissionState::Submitting;
        Ok(payload)
    }

    /// Settles an in-flight submission.
    ///
    /// Success finishes the draft; failure returns to `Idle` with the draft
    /// untouched so the user can press submit again.
    ///
    /// # Errors
    ///
    /// Passes the gateway failure through.
    pub fn finish_submit(
        &mut self,
        result: Result<SubmitReceipt, ReviewError>,
    ) -> Result<SubmitReceipt, ReviewError> {
        if self.submission != SubmissionState::Submitting {
            tracing::debug!("ignoring submission result with nothing in flight");
            return result;
        }

        match &result {
            Ok(receipt) => {
                tracing::info!(
                    shop_id = self.context.shop_id(),
                    review_id = receipt.review_id.as_deref().unwrap_or_default(),
                    "review submitted"
                );
                self.submission = SubmissionState::Succeeded;
                self.telemetry.record(TelemetryEvent::ReviewSubmitted {
                    shop_id: self.context.shop_id().to_owned(),
                    rating: self.draft.rating().get(),
                    attachment_count: self.draft.attachments().len(),
                });
            }
            Err(error) => {
                tracing::warn!(
                    shop_id = self.context.shop_id(),
                    "error adding review: {error}"
                );
                self.submission = SubmissionState::Idle;
                self.telemetry.record(TelemetryEvent::ReviewSubmissionFailed {
                    shop_id: self.context.shop_id().to_owned(),
                    error: error.to_string(),
                });
            }
        }
        result
    }

    /// Sends the draft once through `gateway`.
    ///
    /// # Errors
    ///
    /// Returns any [`Self::begin_submit`] rejection or the gateway failure.
    pub async fn submit(
        &mut self,
        gateway: &dyn ReviewSubmissionGateway,
    ) -> Result<SubmitReceipt, ReviewError> {
        let payload = self.begin_submit()?;
        let result = gateway.submit(&payload).await;
        self.finish_submit(result)
    }

    /// Handles acknowledgement of the success dialog.
    ///
    /// Navigates back exactly once after a successful submission; returns
    /// whether navigation happened.
    pub fn acknowledge_success(&mut self, navigator: &dyn NavigationHost) -> bool {
        if self.submission != SubmissionState::Succeeded || self.navigated_back {
            return false;
        }
        self.navigated_back = true;
        navigator.go_back();
        true
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
