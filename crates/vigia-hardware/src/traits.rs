//! Peripheral trait definitions.
//!
//! This module defines the contract between the controller core and its
//! peripherals: the sensor bank, the cover servo, the status display, the
//! keypad, and the clock. The traits enable substitution between mock
//! implementations (development and testing) and real hardware drivers.
//!
//! All I/O traits use native `async fn` methods (Edition 2024 RPITIT), so
//! no `async_trait` macro is needed.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use serde::{Deserialize, Serialize};
use vigia_core::{SampleTimestamp, ServoAngle};

/// One raw reading from the sensor bank, prior to any sanitation.
///
/// `temperature` and `humidity` may be NaN when the sensor misreads; the
/// snapshot builder substitutes the previous good value. `gas_raw` and
/// `moisture_raw` are raw ADC counts (0-4095) mapped downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    /// Temperature in degrees Celsius, NaN if the read failed.
    pub temperature: f32,

    /// Relative humidity percentage, NaN if the read failed.
    pub humidity: f32,

    /// Raw ADC count from the gas sensor.
    pub gas_raw: u16,

    /// Raw ADC count from the rain sensor.
    pub moisture_raw: u16,

    /// Whether the PIR sensor sees motion.
    pub motion: bool,
}

/// Input event from the access keypad.
///
/// The keypad drives PIN entry only: digits accumulate in the entry buffer,
/// `Reset` (the `*` key) clears it, and `Submit` (the `0` key) triggers the
/// comparison. `0` doubles as submit on the deployed hardware, which is why
/// PIN digits are restricted to 1-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    /// PIN digit (1-9).
    Digit(u8),

    /// Clear the entry buffer (`*`).
    Reset,

    /// Submit the entry buffer for comparison (`0`).
    Submit,
}

impl KeyEvent {
    /// Create a digit event with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the digit is outside 1-9.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigia_hardware::traits::KeyEvent;
    ///
    /// let key = KeyEvent::digit(5).unwrap();
    /// assert_eq!(key.as_digit(), Some(5));
    ///
    /// assert!(KeyEvent::digit(0).is_err());
    /// assert!(KeyEvent::digit(10).is_err());
    /// ```
    pub fn digit(d: u8) -> Result<Self> {
        if !(1..=9).contains(&d) {
            return Err(crate::error::HardwareError::invalid_data(format!(
                "PIN digit must be 1-9, got {d}"
            )));
        }
        Ok(Self::Digit(d))
    }

    /// Check if this event is a digit.
    pub fn is_digit(&self) -> bool {
        matches!(self, Self::Digit(_))
    }

    /// Get the digit value if this is a digit event.
    pub fn as_digit(&self) -> Option<u8> {
        match self {
            Self::Digit(d) => Some(*d),
            _ => None,
        }
    }
}

/// Environmental sensor bank abstraction.
///
/// Covers the DHT (temperature/humidity), the gas and rain analog channels,
/// and the PIR motion input, read together once per sampling tick.
///
/// Implementations must return promptly: a sensor that cannot produce a
/// value reports NaN (DHT channels) or an error, never hangs. The sampler
/// treats errors as transient and substitutes previous values.
pub trait SensorBank: Send + Sync {
    /// Read all channels once.
    ///
    /// # Errors
    ///
    /// Returns an error if the bank is disconnected or has no reading
    /// available. Callers must treat this as transient.
    async fn read(&mut self) -> Result<RawReading>;
}

/// Cover servo abstraction.
///
/// Commands are fire-and-forget: there is no position feedback and no
/// acknowledgement from the hardware.
pub trait Actuator: Send + Sync {
    /// Command the servo to the given angle.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be issued. Callers log
    /// and continue; a missed command is corrected on the next cycle.
    async fn set_angle(&mut self, angle: ServoAngle) -> Result<()>;
}

/// Status display abstraction (16x2 character LCD on the deployed device).
///
/// Best-effort: display failures never affect sampling or automation.
pub trait Display: Send + Sync {
    /// Replace the display contents with the given lines.
    ///
    /// Lines beyond the panel height and characters beyond the panel
    /// width are truncated by the implementation.
    ///
    /// # Errors
    ///
    /// Returns an error if the panel could not be written. Callers log
    /// at debug level and continue.
    async fn show_lines(&mut self, lines: &[String]) -> Result<()>;
}

/// Access keypad abstraction.
///
/// Delivers at most one key per controller loop iteration.
pub trait Keypad: Send + Sync {
    /// Wait for the next key event.
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad is disconnected.
    async fn read_key(&mut self) -> Result<KeyEvent>;
}

/// Clock abstraction for snapshot timestamps.
///
/// Implementations must be monotonically non-decreasing so that the
/// history ring stays in chronological order and date filters behave.
pub trait Clock: Send + Sync {
    /// Current local time as a sample timestamp.
    fn now(&self) -> SampleTimestamp;
}
