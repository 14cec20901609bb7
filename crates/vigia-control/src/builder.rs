//! Raw reading normalization into sensor snapshots.
//!
//! The builder owns the numeric sanitation policy: NaN temperature or
//! humidity readings are replaced with the previous good value (0.0 before
//! any good value exists), the rain channel is mapped from raw ADC counts
//! to a wetness percentage, and the gas channel is scaled into its display
//! range. Sensor faults therefore never propagate into history.

use vigia_core::{
    CoverState, SampleTimestamp, SensorSnapshot,
    constants::{ADC_FULL_SCALE, GAS_DISPLAY_MAX},
};
use vigia_hardware::RawReading;

/// Stateful snapshot builder.
///
/// Retains the last values it produced so a failed or absent reading can be
/// substituted wholesale (availability over failure: the sampling loop must
/// keep appending even when a sensor goes quiet).
#[derive(Debug)]
pub struct SnapshotBuilder {
    last_temperature: f32,
    last_humidity: f32,
    last_gas_level: u16,
    last_moisture_percent: u8,
    last_motion: bool,
}

impl SnapshotBuilder {
    /// Create a builder with zeroed substitution values.
    pub fn new() -> Self {
        Self {
            last_temperature: 0.0,
            last_humidity: 0.0,
            last_gas_level: 0,
            last_moisture_percent: 0,
            last_motion: false,
        }
    }

    /// Map a raw rain-sensor ADC count to a wetness percentage.
    ///
    /// Monotonic decreasing linear map over the sensor's full input range
    /// (higher raw voltage = drier), clamped to 0-100. The polarity matches
    /// the physical wiring: higher percentage = wetter.
    #[must_use]
    pub fn moisture_percent(moisture_raw: u16) -> u8 {
        let pct = 100 - (i32::from(moisture_raw) * 100) / i32::from(ADC_FULL_SCALE);
        pct.clamp(0, 100) as u8
    }

    /// Map a raw gas-sensor ADC count into the 0-5000 display range.
    ///
    /// Linear over the source range; values beyond full scale extend the
    /// line, saturating at `u16::MAX`.
    #[must_use]
    pub fn gas_level(gas_raw: u16) -> u16 {
        let scaled =
            u32::from(gas_raw) * u32::from(GAS_DISPLAY_MAX) / u32::from(ADC_FULL_SCALE);
        u16::try_from(scaled).unwrap_or(u16::MAX)
    }

    /// Build a snapshot from a raw reading.
    ///
    /// NaN temperature or humidity is replaced with the previous good
    /// value for that field; all produced values are retained for later
    /// substitution.
    pub fn build(
        &mut self,
        raw: &RawReading,
        now: SampleTimestamp,
        cover_state: CoverState,
    ) -> SensorSnapshot {
        if raw.temperature.is_finite() {
            self.last_temperature = raw.temperature;
        }
        if raw.humidity.is_finite() {
            self.last_humidity = raw.humidity;
        }
        self.last_gas_level = Self::gas_level(raw.gas_raw);
        self.last_moisture_percent = Self::moisture_percent(raw.moisture_raw);
        self.last_motion = raw.motion;

        self.assemble(now, cover_state)
    }

    /// Build a snapshot from retained values, for cycles where the sensor
    /// bank reported nothing at all.
    pub fn build_from_last(
        &self,
        now: SampleTimestamp,
        cover_state: CoverState,
    ) -> SensorSnapshot {
        self.assemble(now, cover_state)
    }

    fn assemble(&self, now: SampleTimestamp, cover_state: CoverState) -> SensorSnapshot {
        SensorSnapshot {
            temperature: self.last_temperature,
            humidity: self.last_humidity,
            gas_level: self.last_gas_level,
            moisture_percent: self.last_moisture_percent,
            motion_detected: self.last_motion,
            cover_state,
            timestamp: now,
        }
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
