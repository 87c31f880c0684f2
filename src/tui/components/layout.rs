//! Flex-style layout containers.
//!
//! [`Column`] stacks blocks vertically and [`Row`] places single-line
//! fragments side by side. Both distribute spare space according to a
//! [`Justify`] value and can be made pressable with `with_on_press`, in which
//! case they carry the message to emit and render a focus marker.

use unicode_width::UnicodeWidthStr;

/// Feedback intensity of a pressed container.
///
/// Terminals cannot dim a region, so the value is fixed and surfaces as the
/// focus marker drawn in front of pressable containers.
pub const ACTIVE_OPACITY: f32 = 0.9;

const FOCUS_MARKER: &str = "▸ ";
const IDLE_MARKER: &str = "  ";

/// Distribution of spare space along the main axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Justify {
    /// Pack children at the start.
    #[default]
    Start,
    /// Pack children in the middle.
    Center,
    /// Pack children at the end.
    End,
    /// Spread spare space between children only.
    SpaceBetween,
    /// Give every child equal space on both sides.
    SpaceAround,
    /// Make every gap, including the edges, equal.
    SpaceEvenly,
}

impl Justify {
    /// Splits `free` cells into the `count + 1` gaps around `count` children.
    ///
    /// The returned gaps always sum to `free`. Remainders go to the earliest
    /// gaps.
    #[must_use]
    pub fn gaps(self, free: usize, count: usize) -> Vec<usize> {
        if count == 0 {
            return vec![free];
        }

        match self {
            Self::Start => edge_gaps(0, count, free),
            Self::End => edge_gaps(free, count, 0),
            Self::Center => {
                let leading = free.checked_div(2).unwrap_or(0);
                edge_gaps(leading, count, free.saturating_sub(leading))
            }
            Self::SpaceBetween if count < 2 => edge_gaps(0, count, free),
            Self::SpaceBetween => {
                let mut gaps = vec![0];
                gaps.extend(split_evenly(free, count.saturating_sub(1)));
                gaps.push(0);
                gaps
            }
            Self::SpaceAround => space_around(free, count),
            Self::SpaceEvenly => split_evenly(free, count.saturating_add(1)),
        }
    }
}

fn edge_gaps(leading: usize, count: usize, trailing: usize) -> Vec<usize> {
    let mut gaps = vec![leading];
    gaps.extend(std::iter::repeat_n(0, count.saturating_sub(1)));
    gaps.push(trailing);
    gaps
}

fn split_evenly(total: usize, parts: usize) -> Vec<usize> {
    let Some(base) = total.checked_div(parts) else {
        return Vec::new();
    };
    let extra = total.checked_rem(parts).unwrap_or(0);
    (0..parts)
        .map(|part| if part < extra { base.saturating_add(1) } else { base })
        .collect()
}

fn space_around(free: usize, count: usize) -> Vec<usize> {
    let mut gaps = Vec::with_capacity(count.saturating_add(1));
    let mut carry = 0;
    for share in split_evenly(free, count) {
        let before = share.checked_div(2).unwrap_or(0);
        gaps.push(carry + before);
        carry = share - before;
    }
    gaps.push(carry);
    gaps
}

/// Press behaviour shared by both containers.
#[derive(Debug, Clone)]
struct Pressable<M> {
    on_press: Option<M>,
    focused: bool,
}

impl<M: Clone> Pressable<M> {
    const fn new() -> Self {
        Self {
            on_press: None,
            focused: false,
        }
    }

    const fn is_interactive(&self) -> bool {
        self.on_press.is_some()
    }

    const fn marker(&self) -> &'static str {
        match (self.is_interactive(), self.focused) {
            (false, _) => "",
            (true, true) => FOCUS_MARKER,
            (true, false) => IDLE_MARKER,
        }
    }
}

/// Vertical container.
#[derive(Debug, Clone)]
pub struct Column<M> {
    children: Vec<String>,
    justify: Justify,
    height: Option<usize>,
    press: Pressable<M>,
}

impl<M: Clone> Default for Column<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> Column<M> {
    /// Empty, non-interactive column packed at the start.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            children: Vec::new(),
            justify: Justify::Start,
            height: None,
            press: Pressable::new(),
        }
    }

    /// Appends a block; embedded newlines make it span several lines and an
    /// empty block is one blank line.
    #[must_use]
    pub fn child(mut self, block: impl Into<String>) -> Self {
        self.children.push(block.into());
        self
    }

    /// Sets the main-axis distribution.
    #[must_use]
    pub const fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Fixes the column height in lines.
    #[must_use]
    pub const fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    /// Makes the column pressable, emitting `msg` when pressed.
    #[must_use]
    pub fn with_on_press(mut self, msg: M) -> Self {
        self.press.on_press = Some(msg);
        self
    }

    /// Marks the column as holding keyboard focus.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.press.focused = focused;
        self
    }

    /// Whether the column reacts to presses.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.press.is_interactive()
    }

    /// Press feedback intensity, or `None` when not interactive.
    #[must_use]
    pub const fn active_opacity(&self) -> Option<f32> {
        if self.is_interactive() {
            Some(ACTIVE_OPACITY)
        } else {
            None
        }
    }

    /// The message a press emits, or `None` when not interactive.
    #[must_use]
    pub fn press(&self) -> Option<M> {
        self.press.on_press.clone()
    }

    /// Renders the column; every line ends with a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let blocks: Vec<Vec<&str>> = self
            .children
            .iter()
            .map(|child| {
                if child.is_empty() {
                    vec![""]
                } else {
                    child.lines().collect()
                }
            })
            .collect();
        let used: usize = blocks.iter().map(Vec::len).sum();
        let free = self
            .height
            .map_or(0, |height| height.saturating_sub(used));
        let gaps = self.justify.gaps(free, blocks.len());

        let marker = self.press.marker();
        let mut lines: Vec<String> = Vec::new();
        for (gap, block) in gaps.iter().zip(blocks.iter().map(Some).chain([None])) {
            lines.extend(std::iter::repeat_n(String::new(), *gap));
            if let Some(block_lines) = block {
                lines.extend(block_lines.iter().map(|line| format!("{marker}{line}")));
            }
        }
        if let Some(height) = self.height {
            lines.truncate(height);
        }

        lines.iter().fold(String::new(), |mut output, line| {
            output.push_str(line);
            output.push('\n');
            output
        })
    }
}

/// Horizontal container for single-line fragments.
#[derive(Debug, Clone)]
pub struct Row<M> {
    children: Vec<String>,
    justify: Justify,
    width: Option<usize>,
    spacing: usize,
    press: Pressable<M>,
}

impl<M: Clone> Default for Row<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> Row<M> {
    /// Empty, non-interactive row with one column between fragments.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            children: Vec::new(),
            justify: Justify::Start,
            width: None,
            spacing: 1,
            press: Pressable::new(),
        }
    }

    /// Appends a fragment; only its first line is kept.
    #[must_use]
    pub fn child(mut self, fragment: impl Into<String>) -> Self {
        let text: String = fragment.into();
        self.children
            .push(text.lines().next().unwrap_or_default().to_owned());
        self
    }

    /// Sets the main-axis distribution.
    #[must_use]
    pub const fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Fixes the row width in columns.
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Minimum columns between neighbouring fragments.
    #[must_use]
    pub const fn spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    /// Makes the row pressable, emitting `msg` when pressed.
    #[must_use]
    pub fn with_on_press(mut self, msg: M) -> Self {
        self.press.on_press = Some(msg);
        self
    }

    /// Marks the row as holding keyboard focus.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.press.focused = focused;
        self
    }

    /// Whether the row reacts to presses.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.press.is_interactive()
    }

    /// Press feedback intensity, or `None` when not interactive.
    #[must_use]
    pub const fn active_opacity(&self) -> Option<f32> {
        if self.is_interactive() {
            Some(ACTIVE_OPACITY)
        } else {
            None
        }
    }

    /// The message a press emits, or `None` when not interactive.
    #[must_use]
    pub fn press(&self) -> Option<M> {
        self.press.on_press.clone()
    }

    /// Renders the row as one line without a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let marker = self.press.marker();
        let spacing_total = self
            .spacing
            .saturating_mul(self.children.len().saturating_sub(1));
        let used = self
            .children
            .iter()
            .map(|child| UnicodeWidthStr::width(child.as_str()))
            .sum::<usize>()
            .saturating_add(spacing_total)
            .saturating_add(UnicodeWidthStr::width(marker));
        let free = self.width.map_or(0, |width| width.saturating_sub(used));
        let gaps = self.justify.gaps(free, self.children.len());

        let mut output = marker.to_owned();
        let mut fragments = self.children.iter().peekable();
        for gap in gaps {
            output.push_str(&" ".repeat(gap));
            let Some(fragment) = fragments.next() else {
                break;
            };
            output.push_str(fragment);
            if fragments.peek().is_some() {
                output.push_str(&" ".repeat(self.spacing));
            }
        }
        output
    }
}
