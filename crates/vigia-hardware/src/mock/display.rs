//! Mock status display for testing and development.

use crate::{Result, traits::Display};
use std::sync::{Arc, Mutex};

/// Mock display recording every screen written to it.
///
/// Each call to [`Display::show_lines`] is stored as one screen (a vector
/// of lines). Tests inspect screens through a [`MockDisplayHandle`].
#[derive(Debug)]
pub struct MockDisplay {
    screens: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockDisplay {
    /// Create a new mock display and its observation handle.
    pub fn new() -> (Self, MockDisplayHandle) {
        let screens = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                screens: Arc::clone(&screens),
            },
            MockDisplayHandle { screens },
        )
    }
}

impl Display for MockDisplay {
    async fn show_lines(&mut self, lines: &[String]) -> Result<()> {
        if let Ok(mut screens) = self.screens.lock() {
            screens.push(lines.to_vec());
        }
        Ok(())
    }
}

/// Handle for observing what a mock display has shown.
///
/// Can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct MockDisplayHandle {
    screens: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockDisplayHandle {
    /// All screens shown so far, oldest first.
    pub fn screens(&self) -> Vec<Vec<String>> {
        self.screens.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// The most recently shown screen, if any.
    pub fn last_screen(&self) -> Option<Vec<String>> {
        self.screens.lock().ok().and_then(|s| s.last().cloned())
    }
}
