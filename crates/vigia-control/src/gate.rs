//! PIN-entry access gate state machine.
//!
//! The gate tracks a digit buffer fed by the keypad and transitions to
//! `Unlocked` on a successful comparison against the configured PIN. While
//! unlocked, the automation policy is suspended (the cover servo holds
//! whatever was last commanded) and every further key is ignored.
//!
//! # States
//!
//! - `Entering`: accumulating up to 4 digits; `Reset` clears the buffer,
//!   `Submit` triggers the comparison.
//! - `Unlocked`: terminal until process restart. There is no re-lock
//!   transition; the deployed device expects a power cycle.
//!
//! # Examples
//!
//! ```
//! use vigia_control::gate::{AccessGate, GateEvent};
//! use vigia_core::PinCode;
//! use vigia_hardware::KeyEvent;
//!
//! let mut gate = AccessGate::new(PinCode::new("1245").unwrap());
//! for d in [1, 2, 4, 5] {
//!     gate.handle_key(KeyEvent::Digit(d));
//! }
//! assert_eq!(gate.handle_key(KeyEvent::Submit), GateEvent::Unlocked);
//! assert!(gate.is_unlocked());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use vigia_core::{PinCode, constants::PIN_LENGTH};
use vigia_hardware::KeyEvent;

/// Gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// Accumulating PIN digits.
    Entering,

    /// Manual override active; automation suspended until process restart.
    Unlocked,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateState::Entering => write!(f, "Entering"),
            GateState::Unlocked => write!(f, "Unlocked"),
        }
    }
}

/// Outcome of feeding one key event to the gate.
///
/// Events carry what the caller needs for display side effects; the gate
/// itself never touches peripherals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    /// A digit was appended to the buffer.
    DigitAccepted {
        /// Digits buffered after the append (1-4).
        buffered: usize,
    },

    /// The buffer was cleared by the reset key.
    BufferCleared,

    /// The submitted code matched; the gate is now unlocked. The caller
    /// must command the actuator open exactly once on this event.
    Unlocked,

    /// The submitted code did not match; the buffer was cleared and the
    /// caller should surface a transient retry message.
    Denied,

    /// The key had no effect (buffer full, digit out of range, or gate
    /// already unlocked).
    Ignored,
}

/// Access-control gate: digit buffer plus unlock state.
///
/// Mutated only by key-event delivery from the single control loop; on an
/// async host the read/compare/mutate sequence must stay inside one
/// critical section.
#[derive(Debug)]
pub struct AccessGate {
    state: GateState,
    buffer: String,
    expected: PinCode,
}

impl AccessGate {
    /// Create a gate in the `Entering` state with an empty buffer.
    pub fn new(expected: PinCode) -> Self {
        Self {
            state: GateState::Entering,
            buffer: String::with_capacity(PIN_LENGTH),
            expected,
        }
    }

    /// Current state.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Returns `true` once the override is active.
    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Number of digits currently buffered.
    pub fn buffered_digits(&self) -> usize {
        self.buffer.len()
    }

    /// Feed one key event through the state machine.
    ///
    /// See [`GateEvent`] for the side effects the caller must perform.
    pub fn handle_key(&mut self, key: KeyEvent) -> GateEvent {
        if self.state == GateState::Unlocked {
            // Permanent unlock: no transition is defined out of this state.
            return GateEvent::Ignored;
        }

        match key {
            KeyEvent::Digit(d) => {
                // The variant payload is public, so the 1-9 range enforced
                // by `KeyEvent::digit()` cannot be assumed here.
                if !(1..=9).contains(&d) || self.buffer.len() >= PIN_LENGTH {
                    return GateEvent::Ignored;
                }
                self.buffer.push(char::from(b'0' + d));
                GateEvent::DigitAccepted {
                    buffered: self.buffer.len(),
                }
            }
            KeyEvent::Reset => {
                self.buffer.clear();
                GateEvent::BufferCleared
            }
            KeyEvent::Submit => {
                let matched = self.expected.matches(&self.buffer);
                self.buffer.clear();
                if matched {
                    self.state = GateState::Unlocked;
                    GateEvent::Unlocked
                } else {
                    GateEvent::Denied
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AccessGate {
        AccessGate::new(PinCode::new("1245").unwrap())
    }

    fn enter(gate: &mut AccessGate, digits: &[u8]) {
        for &d in digits {
            gate.handle_key(KeyEvent::Digit(d));
        }
    }

    #[test]
    fn test_initial_state() {
        let gate = gate();
        assert_eq!(gate.state(), GateState::Entering);
        assert!(!gate.is_unlocked());
        assert_eq!(gate.buffered_digits(), 0);
    }

    #[test]
    fn test_correct_pin_unlocks() {
        let mut gate = gate();
        enter(&mut gate, &[1, 2, 4, 5]);
        assert_eq!(gate.handle_key(KeyEvent::Submit), GateEvent::Unlocked);
        assert!(gate.is_unlocked());
        assert_eq!(gate.buffered_digits(), 0);
    }

    #[test]
    fn test_wrong_pin_denied_and_buffer_cleared() {
        let mut gate = gate();
        enter(&mut gate, &[1, 2, 4, 6]);
        assert_eq!(gate.handle_key(KeyEvent::Submit), GateEvent::Denied);
        assert_eq!(gate.state(), GateState::Entering);
        assert_eq!(gate.buffered_digits(), 0);
    }

    #[test]
    fn test_short_pin_denied() {
        let mut gate = gate();
        enter(&mut gate, &[1, 2]);
        assert_eq!(gate.handle_key(KeyEvent::Submit), GateEvent::Denied);
    }

    #[test]
    fn test_empty_submit_denied() {
        let mut gate = gate();
        assert_eq!(gate.handle_key(KeyEvent::Submit), GateEvent::Denied);
    }

    #[test]
    fn test_digit_accepted_reports_buffer_length() {
        let mut gate = gate();
        assert_eq!(
            gate.handle_key(KeyEvent::Digit(1)),
            GateEvent::DigitAccepted { buffered: 1 }
        );
        assert_eq!(
            gate.handle_key(KeyEvent::Digit(2)),
            GateEvent::DigitAccepted { buffered: 2 }
        );
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut gate = gate();
        assert_eq!(gate.handle_key(KeyEvent::Digit(0)), GateEvent::Ignored);
        assert_eq!(gate.handle_key(KeyEvent::Digit(10)), GateEvent::Ignored);
        assert_eq!(gate.handle_key(KeyEvent::Digit(255)), GateEvent::Ignored);
        assert_eq!(gate.buffered_digits(), 0);
    }

    #[test]
    fn test_fifth_digit_ignored() {
        let mut gate = gate();
        enter(&mut gate, &[1, 2, 4, 5]);
        assert_eq!(gate.handle_key(KeyEvent::Digit(9)), GateEvent::Ignored);
        assert_eq!(gate.buffered_digits(), 4);
    }

    #[test]
    fn test_reset_clears_buffer() {
        let mut gate = gate();
        enter(&mut gate, &[1, 2]);
        assert_eq!(gate.handle_key(KeyEvent::Reset), GateEvent::BufferCleared);
        assert_eq!(gate.buffered_digits(), 0);

        // A fresh correct entry still unlocks.
        enter(&mut gate, &[1, 2, 4, 5]);
        assert_eq!(gate.handle_key(KeyEvent::Submit), GateEvent::Unlocked);
    }

    #[test]
    fn test_retry_after_denied() {
        let mut gate = gate();
        enter(&mut gate, &[9, 9, 9, 9]);
        assert_eq!(gate.handle_key(KeyEvent::Submit), GateEvent::Denied);

        enter(&mut gate, &[1, 2, 4, 5]);
        assert_eq!(gate.handle_key(KeyEvent::Submit), GateEvent::Unlocked);
    }

    #[test]
    fn test_unlocked_ignores_every_key() {
        let mut gate = gate();
        enter(&mut gate, &[1, 2, 4, 5]);
        gate.handle_key(KeyEvent::Submit);

        assert_eq!(gate.handle_key(KeyEvent::Digit(3)), GateEvent::Ignored);
        assert_eq!(gate.handle_key(KeyEvent::Reset), GateEvent::Ignored);
        assert_eq!(gate.handle_key(KeyEvent::Submit), GateEvent::Ignored);
        assert!(gate.is_unlocked());
    }
}
