//! Controller configuration.

use serde::Deserialize;
use std::time::Duration;
use vigia_core::{
    Error, PinCode, Result,
    constants::{DEFAULT_HISTORY_CAPACITY, DEFAULT_PIN, RAIN_THRESHOLD_DEFAULT, SAMPLE_INTERVAL_MS},
};

/// Configuration for the monitoring controller.
///
/// Defaults mirror the deployed device; each installation overrides what
/// it needs (ring capacity, cadence, rain threshold, PIN).
///
/// # Example
///
/// ```
/// use vigia_control::ControllerConfig;
///
/// let config = ControllerConfig::default();
/// assert_eq!(config.history_capacity, 200);
/// assert_eq!(config.sample_interval().as_secs(), 5);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Number of snapshot slots in the history ring.
    pub history_capacity: usize,

    /// Interval between sampling ticks, in milliseconds.
    pub sample_interval_ms: u64,

    /// Wetness percentage at or above which the cover closes.
    pub rain_threshold: u8,

    /// Unlock PIN for the manual override.
    pub pin: PinCode,
}

impl ControllerConfig {
    /// Sampling interval as a `Duration`.
    #[must_use]
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    /// Validate ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns `Error::InvalidCapacity` for a zero-capacity ring and
    /// `Error::Config` for a threshold above 100% or a zero interval.
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(Error::InvalidCapacity {
                capacity: self.history_capacity,
            });
        }
        if self.rain_threshold > 100 {
            return Err(Error::Config(format!(
                "Rain threshold must be 0-100%, got {}",
                self.rain_threshold
            )));
        }
        if self.sample_interval_ms == 0 {
            return Err(Error::Config(
                "Sample interval must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            rain_threshold: RAIN_THRESHOLD_DEFAULT,
            pin: PinCode::new(DEFAULT_PIN).unwrap(),
        }
    }
}
