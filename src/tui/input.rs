//! Input handling for the review screen.
//!
//! Key events map to [`ScreenMsg`] values according to what currently owns
//! the keyboard: the form itself, a text field, or a dialog.

use crossterm::event::KeyCode;

use super::messages::ScreenMsg;
use crate::media::MediaKind;

/// What the keyboard is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Moving around the form.
    Form,
    /// Typing into the comment field or the path prompt.
    TextEntry,
    /// A confirmation or error dialog is open.
    Dialog,
}

/// Maps a key event to a screen message for the given context.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
pub fn map_key_to_message_with_context(
    key: &bubbletea_rs::event::KeyMsg,
    context: InputContext,
) -> Option<ScreenMsg> {
    match context {
        InputContext::Form => map_form_key(key.key),
        InputContext::TextEntry => map_text_entry_key(key.key),
        InputContext::Dialog => map_dialog_key(key.key),
    }
}

fn map_form_key(code: KeyCode) -> Option<ScreenMsg> {
    match code {
        KeyCode::Char('q') => Some(ScreenMsg::Quit),
        KeyCode::Tab | KeyCode::Down => Some(ScreenMsg::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(ScreenMsg::FocusPrevious),
        KeyCode::Enter => Some(ScreenMsg::Activate),
        KeyCode::Char(digit @ '1'..='5') => digit
            .to_digit(10)
            .and_then(|value| u8::try_from(value).ok())
            .map(ScreenMsg::SetRating),
        KeyCode::Right => Some(ScreenMsg::RatingUp),
        KeyCode::Left => Some(ScreenMsg::RatingDown),
        KeyCode::Char('c') => Some(ScreenMsg::EditComment),
        KeyCode::Char('p') => Some(ScreenMsg::OpenPicker(MediaKind::Photo)),
        KeyCode::Char('v') => Some(ScreenMsg::OpenPicker(MediaKind::Video)),
        KeyCode::Char('x') | KeyCode::Delete => Some(ScreenMsg::RemoveFocusedAttachment),
        KeyCode::Char('s') => Some(ScreenMsg::Submit),
        KeyCode::Esc => Some(ScreenMsg::Escape),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_text_entry_key(code: KeyCode) -> Option<ScreenMsg> {
    match code {
        KeyCode::Char(character) => Some(ScreenMsg::InsertChar(character)),
        KeyCode::Backspace => Some(ScreenMsg::Backspace),
        KeyCode::Enter => Some(ScreenMsg::ConfirmInput),
        KeyCode::Esc => Some(ScreenMsg::Escape),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_dialog_key(code: KeyCode) -> Option<ScreenMsg> {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(ScreenMsg::DismissDialog),
        KeyCode::Esc => Some(ScreenMsg::Escape),
        KeyCode::Char('q') => Some(ScreenMsg::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use rstest::rstest;

    use super::{InputContext, map_key_to_message_with_context};
    use crate::media::MediaKind;
    use crate::tui::messages::ScreenMsg;

    fn key_msg(key: KeyCode) -> bubbletea_rs::event::KeyMsg {
        bubbletea_rs::event::KeyMsg {
            key,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[rstest]
    #[case('1', 1)]
    #[case('3', 3)]
    #[case('5', 5)]
    fn digits_select_ratings(#[case] digit: char, #[case] expected: u8) {
        let msg = map_key_to_message_with_context(&key_msg(KeyCode::Char(digit)), InputContext::Form);

        assert!(
            matches!(msg, Some(ScreenMsg::SetRating(value)) if value == expected),
            "expected SetRating({expected}), got {msg:?}"
        );
    }

    #[rstest]
    #[case::zero('0')]
    #[case::six('6')]
    fn digits_outside_range_are_ignored(#[case] digit: char) {
        let msg = map_key_to_message_with_context(&key_msg(KeyCode::Char(digit)), InputContext::Form);

        assert!(msg.is_none());
    }

    #[test]
    fn picker_keys_carry_media_kind() {
        let photo = map_key_to_message_with_context(&key_msg(KeyCode::Char('p')), InputContext::Form);
        let video = map_key_to_message_with_context(&key_msg(KeyCode::Char('v')), InputContext::Form);

        assert!(matches!(photo, Some(ScreenMsg::OpenPicker(MediaKind::Photo))));
        assert!(matches!(video, Some(ScreenMsg::OpenPicker(MediaKind::Video))));
    }

    #[test]
    fn text_entry_captures_command_letters() {
        let msg =
            map_key_to_message_with_context(&key_msg(KeyCode::Char('q')), InputContext::TextEntry);

        assert!(matches!(msg, Some(ScreenMsg::InsertChar('q'))));
    }

    #[rstest]
    #[case::enter(KeyCode::Enter)]
    #[case::space(KeyCode::Char(' '))]
    fn dialog_acknowledges_on_enter_or_space(#[case] code: KeyCode) {
        let msg = map_key_to_message_with_context(&key_msg(code), InputContext::Dialog);

        assert!(matches!(msg, Some(ScreenMsg::DismissDialog)));
    }

    #[test]
    fn shift_tab_moves_focus_back() {
        let msg = map_key_to_message_with_context(&key_msg(KeyCode::BackTab), InputContext::Form);

        assert!(matches!(msg, Some(ScreenMsg::FocusPrevious)));
    }
}
