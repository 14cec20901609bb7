//! Mock keypad implementation for testing and development.
//!
//! This module provides a simulated keypad that can be driven
//! programmatically for testing without requiring physical hardware.

use crate::{
    Result,
    traits::{KeyEvent, Keypad},
};
use tokio::sync::mpsc;

/// Mock keypad for testing and development.
///
/// Simulates the 4x4 membrane keypad by receiving key events through an
/// internal channel. Tests send events through a [`MockKeypadHandle`].
///
/// # Examples
///
/// ```
/// use vigia_hardware::mock::MockKeypad;
/// use vigia_hardware::traits::{KeyEvent, Keypad};
///
/// #[tokio::main]
/// async fn main() -> vigia_hardware::Result<()> {
///     let (mut keypad, handle) = MockKeypad::new();
///
///     handle.send_key(KeyEvent::Digit(1)).await?;
///     handle.send_key(KeyEvent::Submit).await?;
///
///     assert_eq!(keypad.read_key().await?, KeyEvent::Digit(1));
///     assert_eq!(keypad.read_key().await?, KeyEvent::Submit);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockKeypad {
    /// Channel receiver for simulated key events
    key_rx: mpsc::Receiver<KeyEvent>,
}

impl MockKeypad {
    /// Create a new mock keypad.
    ///
    /// Returns a tuple of (MockKeypad, MockKeypadHandle) where the handle
    /// is used to feed simulated key events to the keypad.
    pub fn new() -> (Self, MockKeypadHandle) {
        let (key_tx, key_rx) = mpsc::channel(32);
        (Self { key_rx }, MockKeypadHandle { key_tx })
    }
}

impl Keypad for MockKeypad {
    async fn read_key(&mut self) -> Result<KeyEvent> {
        self.key_rx
            .recv()
            .await
            .ok_or_else(|| crate::HardwareError::disconnected("keypad channel closed"))
    }
}

/// Handle for driving a mock keypad.
///
/// Can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct MockKeypadHandle {
    /// Channel sender for simulated key events
    key_tx: mpsc::Sender<KeyEvent>,
}

impl MockKeypadHandle {
    /// Send a key event to the mock keypad.
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad has been dropped and the channel is
    /// closed.
    pub async fn send_key(&self, key: KeyEvent) -> Result<()> {
        self.key_tx
            .send(key)
            .await
            .map_err(|_| crate::HardwareError::disconnected("keypad channel closed"))
    }

    /// Send a full PIN entry: each digit followed by Submit.
    ///
    /// Digits outside 1-9 are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid digit or a closed channel.
    pub async fn send_pin(&self, digits: &[u8]) -> Result<()> {
        for &d in digits {
            self.send_key(KeyEvent::digit(d)?).await?;
        }
        self.send_key(KeyEvent::Submit).await
    }
}
