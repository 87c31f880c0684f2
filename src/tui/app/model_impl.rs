//! `Model` trait implementation for the review screen.
//!
//! Handles initialisation, update dispatch, and view rendering.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};
use unicode_width::UnicodeWidthChar;

use super::ReviewScreen;
use crate::tui::ScreenContext;
use crate::tui::input::{InputContext, map_key_to_message_with_context};
use crate::tui::messages::ScreenMsg;

impl Model for ReviewScreen {
    fn init() -> (Self, Option<Cmd>) {
        let Some(context) = crate::tui::screen_context() else {
            tracing::error!("review screen started without a screen context");
            return (
                Self::new(ScreenContext::unconfigured()),
                Some(bubbletea_rs::quit()),
            );
        };

        let model = Self::new(context);
        // The shop fetch starts on mount; its result arrives as `ShopLoaded`.
        let cmd = model.load_shop_cmd();
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(screen_msg) = msg.downcast_ref::<ScreenMsg>() {
            return self.handle_message(screen_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            let mapped = map_key_to_message_with_context(key_msg, self.input_context());
            return mapped.and_then(|screen_msg| self.handle_message(&screen_msg));
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            return self.handle_message(&ScreenMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            });
        }

        None
    }

    fn view(&self) -> String {
        if let Some(dialog) = &self.dialog {
            let frame = dialog.view(self.content_width(), usize::from(self.height.max(1)));
            return self.normalise_viewport(&frame);
        }
        self.normalise_viewport(&self.render_form())
    }
}

impl ReviewScreen {
    /// Returns the current input context for context-aware key mapping.
    pub(super) const fn input_context(&self) -> InputContext {
        if self.dialog.is_some() {
            InputContext::Dialog
        } else if self.entry.is_some() {
            InputContext::TextEntry
        } else {
            InputContext::Form
        }
    }

    /// Pads or clips the frame to the terminal size.
    ///
    /// Rows are kept one column short of the terminal width to avoid
    /// autowrap, and padded with spaces so a shorter frame clears the cells
    /// left by a longer one.
    fn normalise_viewport(&self, output: &str) -> String {
        let width = self.content_width();
        let height = usize::from(self.height.max(1));

        let mut lines: Vec<String> = output
            .lines()
            .map(|line| pad_or_truncate_line(line, width))
            .collect();
        lines.truncate(height);

        let missing = height.saturating_sub(lines.len());
        let blank = " ".repeat(width);
        lines.extend(std::iter::repeat_with(|| blank.clone()).take(missing));

        let mut normalised = lines.join("\n");
        normalised.push('\n');
        normalised
    }
}

fn pad_or_truncate_line(line: &str, width: usize) -> String {
    let mut output = String::new();
    let mut visible_width = 0usize;

    for ch in line.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if visible_width.saturating_add(char_width) > width {
            break;
        }
        output.push(ch);
        visible_width = visible_width.saturating_add(char_width);
    }

    output.push_str(&" ".repeat(width.saturating_sub(visible_width)));
    output
}
