//! Display-width aware text fitting.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Cuts `text` to at most `max_width` terminal columns.
///
/// Text that does not fit ends with a single-column ellipsis. Only the first
/// line is considered.
pub(crate) fn fit_width(text: &str, max_width: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.width() <= max_width {
        return line.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width.saturating_sub(1);
    let mut fitted = String::new();
    let mut used = 0usize;
    for character in line.chars() {
        let width = UnicodeWidthChar::width(character).unwrap_or(0);
        if used.saturating_add(width) > budget {
            break;
        }
        fitted.push(character);
        used = used.saturating_add(width);
    }
    fitted.push(ELLIPSIS);
    fitted
}
