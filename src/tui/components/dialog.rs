//! Modal confirmation and error dialogs.

use unicode_width::UnicodeWidthStr;

use super::layout::{Column, Justify, Row};
use super::text_fit::fit_width;

/// Kind of dialog, which decides its title and acknowledgement hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// The review was accepted.
    Success,
    /// Something went wrong; the draft is kept.
    Error,
}

/// A boxed message centred on the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    kind: DialogKind,
    message: String,
}

impl Dialog {
    /// Confirmation shown after a successful submission.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Success,
            message: message.into(),
        }
    }

    /// Error dialog with `message`.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            message: message.into(),
        }
    }

    /// Dialog kind.
    #[must_use]
    pub const fn kind(&self) -> DialogKind {
        self.kind
    }

    /// Body text.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }

    const fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::Success => "Review submitted",
            DialogKind::Error => "Something went wrong",
        }
    }

    const fn hint(&self) -> &'static str {
        match self.kind {
            DialogKind::Success => "Enter: OK",
            DialogKind::Error => "Enter/Esc: close",
        }
    }

    /// Renders the dialog centred in a `width` x `height` area.
    #[must_use]
    pub fn view(&self, width: usize, height: usize) -> String {
        let inner = width.saturating_sub(8).clamp(10, 60);
        let body = fit_width(&self.message, inner);
        let lines = [self.title(), "", body.as_str(), "", self.hint()];
        let rule = "─".repeat(inner.saturating_add(2));

        let mut framed = vec![format!("┌{rule}┐")];
        framed.extend(lines.iter().map(|line| {
            let padding = inner.saturating_sub(line.width());
            format!("│ {line}{} │", " ".repeat(padding))
        }));
        framed.push(format!("└{rule}┘"));

        framed
            .into_iter()
            .map(|line| {
                Row::<()>::new()
                    .child(line)
                    .justify(Justify::Center)
                    .width(width)
                    .render()
            })
            .fold(Column::<()>::new(), |column, line| column.child(line))
            .justify(Justify::Center)
            .height(height)
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::{Dialog, DialogKind};

    #[test]
    fn success_dialog_has_title_and_hint() {
        let dialog = Dialog::success("Thanks for your review!");

        let view = dialog.view(60, 12);

        assert_eq!(dialog.kind(), DialogKind::Success);
        assert!(view.contains("Review submitted"));
        assert!(view.contains("Thanks for your review!"));
        assert!(view.contains("Enter: OK"));
        assert_eq!(view.lines().count(), 12);
    }

    #[test]
    fn long_messages_are_fitted_inside_the_frame() {
        let dialog = Dialog::error("x".repeat(200));

        let view = dialog.view(40, 10);

        assert!(view.contains('…'));
        assert!(view.lines().all(|line| line.chars().count() <= 40));
    }
}
