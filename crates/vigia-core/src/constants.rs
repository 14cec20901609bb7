//! Core constants for the Vigia monitoring controller.
//!
//! These values mirror the deployed device configuration: sampling cadence,
//! the rain threshold driving the cover servo, ADC scaling for the analog
//! sensors, and the bounded history sizing. They are defaults; anything that
//! varies per installation is overridable through `ControllerConfig`.

// ============================================================================
// Sampling
// ============================================================================

/// Default interval between sensor sampling ticks (milliseconds).
///
/// Environmental values on a home controller change slowly; 5 seconds keeps
/// the history meaningful without wearing the analog sensors.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vigia_core::constants::SAMPLE_INTERVAL_MS;
///
/// let interval = Duration::from_millis(SAMPLE_INTERVAL_MS);
/// assert_eq!(interval.as_secs(), 5);
/// ```
pub const SAMPLE_INTERVAL_MS: u64 = 5000;

// ============================================================================
// Automation
// ============================================================================

/// Default moisture percentage at or above which the rain cover closes.
///
/// The policy is a bare threshold with no hysteresis; readings oscillating
/// around this value will chatter the servo. That matches the deployed
/// behavior and is a documented limitation.
pub const RAIN_THRESHOLD_DEFAULT: u8 = 50;

/// Servo angle commanded when the cover is closed over the clothesline.
pub const COVER_CLOSED_DEGREES: u8 = 0;

/// Servo angle commanded when the cover is retracted (clothes exposed).
///
/// Also the angle commanded once on a successful PIN unlock.
pub const COVER_OPEN_DEGREES: u8 = 90;

/// Maximum servo deflection accepted by the actuator.
pub const MAX_SERVO_DEGREES: u8 = 180;

// ============================================================================
// Analog sensor scaling
// ============================================================================

/// Full-scale raw value of the board's 12-bit ADC.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Upper bound of the gas level display range.
///
/// Raw ADC gas readings are mapped linearly into `0..=GAS_DISPLAY_MAX` for
/// history and display. The mapping is not clamped beyond the source range.
pub const GAS_DISPLAY_MAX: u16 = 5000;

// ============================================================================
// History sizing
// ============================================================================

/// Default number of snapshot slots in the history ring.
///
/// At the default 5 second cadence this covers roughly 16 minutes of
/// history. The ring overwrites oldest-first; capacity is fixed at
/// construction and configurable per installation.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// Default cap on the number of points returned by a series query.
///
/// Keeps graph payloads bounded regardless of ring capacity.
pub const DEFAULT_SERIES_MAX_POINTS: usize = 300;

// ============================================================================
// Access control
// ============================================================================

/// Exact length of the unlock PIN (digits).
pub const PIN_LENGTH: usize = 4;

/// Factory-default unlock PIN, as flashed on the deployed device.
///
/// Installations override this through `ControllerConfig`.
pub const DEFAULT_PIN: &str = "1245";

// ============================================================================
// Display geometry
// ============================================================================

/// Characters per line on the status display (16x2 LCD).
pub const DISPLAY_LINE_LENGTH: usize = 16;

/// Number of lines on the status display.
pub const DISPLAY_LINES: usize = 2;
