//! Back-navigation for the terminal screen.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::review::NavigationHost;

/// Records that the screen asked to go back.
///
/// There is no previous screen in a terminal session, so going back ends the
/// program: the screen checks [`ScreenNavigator::has_left`] and quits.
#[derive(Debug, Default)]
pub struct ScreenNavigator {
    left: AtomicBool,
}

impl ScreenNavigator {
    /// Creates a navigator that has not navigated yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: AtomicBool::new(false),
        }
    }

    /// Whether back-navigation was requested.
    #[must_use]
    pub fn has_left(&self) -> bool {
        self.left.load(Ordering::SeqCst)
    }
}

impl NavigationHost for ScreenNavigator {
    fn go_back(&self) {
        self.left.store(true, Ordering::SeqCst);
        tracing::debug!("leaving review screen");
    }
}
