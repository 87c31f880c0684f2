//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use shop_review::{AttachmentArg, ReviewError, ReviewSubmissionWorkflow, SubmitReceipt};

/// Writes the outcome of a headless submission to the given writer.
///
/// # Errors
///
/// Returns [`ReviewError::Io`] when the writer fails.
pub fn write_submission_summary<W: Write>(
    writer: &mut W,
    workflow: &ReviewSubmissionWorkflow,
    receipt: &SubmitReceipt,
) -> Result<(), ReviewError> {
    let shop = match workflow.shop_name() {
        "" => workflow.context().shop_id(),
        name => name,
    };
    let draft = workflow.draft();

    writeln!(
        writer,
        "Review submitted for {shop}: {}/5, {} attachment(s)",
        draft.rating(),
        draft.attachments().len()
    )
    .map_err(|e| io_error(&e))?;

    if let Some(review_id) = receipt.review_id.as_deref() {
        writeln!(writer, "Review id: {review_id}").map_err(|e| io_error(&e))?;
    }
    if let Some(message) = receipt.message.as_deref() {
        writeln!(writer, "Server: {message}").map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes a note about an attachment that was not added.
///
/// # Errors
///
/// Returns [`ReviewError::Io`] when the writer fails.
pub fn write_skipped_attachment<W: Write>(
    writer: &mut W,
    attachment: &AttachmentArg,
) -> Result<(), ReviewError> {
    writeln!(
        writer,
        "Skipped {}:{} (file could not be attached)",
        attachment.kind, attachment.path
    )
    .map_err(|e| io_error(&e))
}

fn io_error(error: &io::Error) -> ReviewError {
    ReviewError::Io {
        message: error.to_string(),
    }
}
