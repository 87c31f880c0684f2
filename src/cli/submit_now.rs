//! One-shot review submission without the interactive screen.
//!
//! Rating, comment and attachments come from `--rating`, `--comment` and
//! `--attach`. The draft goes through the same workflow as the screen, so
//! the payload and its validation are identical.

use std::io;

use shop_review::{AttachOutcome, LocalFileMediaPicker, ReviewError, ShopReviewConfig};

use super::output::{write_skipped_attachment, write_submission_summary};
use super::{Prepared, prepare};

/// Builds the draft from configuration and submits it once.
///
/// # Errors
///
/// Returns configuration errors, a surfaced picker failure, or the
/// submission failure reported by the API.
pub async fn run(config: &ShopReviewConfig) -> Result<(), ReviewError> {
    let rating = config.headless_rating()?;
    let attachments = config.attachments()?;
    let Prepared {
        mut workflow,
        shop_directory,
        review_gateway,
    } = prepare(config)?;

    workflow.load_shop(&shop_directory).await;
    workflow.set_rating(rating);
    if let Some(comment) = config.comment.as_deref() {
        workflow.set_comment(comment);
    }

    for attachment in &attachments {
        let picker = LocalFileMediaPicker::new(Some(attachment.path.clone()));
        match workflow.attach_media(attachment.kind, &picker).await? {
            AttachOutcome::Attached(_) => {}
            AttachOutcome::Cancelled | AttachOutcome::Ignored => {
                write_skipped_attachment(&mut io::stderr().lock(), attachment)?;
            }
        }
    }

    let receipt = workflow.submit(&review_gateway).await?;
    write_submission_summary(&mut io::stdout().lock(), &workflow, &receipt)
}
