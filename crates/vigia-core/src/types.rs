use crate::{
    Result,
    constants::{COVER_CLOSED_DEGREES, COVER_OPEN_DEGREES, MAX_SERVO_DEGREES, PIN_LENGTH},
    error::Error,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of the automated rain cover.
///
/// Derived each sampling cycle by the automation policy (unless a manual
/// unlock has suspended automation) and recorded in every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverState {
    /// Cover retracted; the clothesline is exposed to the outside.
    Exterior,

    /// Cover extended over the clothesline (rain detected).
    Covered,
}

impl CoverState {
    /// Returns `true` if the cover is extended.
    #[inline]
    #[must_use]
    pub fn is_covered(self) -> bool {
        matches!(self, CoverState::Covered)
    }

    /// Numeric projection used by series queries (Exterior = 1, Covered = 0).
    ///
    /// Matches the graph encoding of the original deployment, where the
    /// exposed position is the "active" one.
    #[inline]
    #[must_use]
    pub fn as_series_value(self) -> f64 {
        match self {
            CoverState::Exterior => 1.0,
            CoverState::Covered => 0.0,
        }
    }
}

impl fmt::Display for CoverState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoverState::Exterior => write!(f, "Exterior"),
            CoverState::Covered => write!(f, "Covered"),
        }
    }
}

/// Servo deflection in degrees (0-180), validated at construction.
///
/// Deserialization routes through [`ServoAngle::new`], so an out-of-range
/// angle cannot materialize from configuration or stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct ServoAngle(u8);

impl ServoAngle {
    /// Cover fully closed.
    pub const COVER_CLOSED: ServoAngle = ServoAngle(COVER_CLOSED_DEGREES);

    /// Cover fully open (also the unlock position).
    pub const COVER_OPEN: ServoAngle = ServoAngle(COVER_OPEN_DEGREES);

    /// Create a new servo angle with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidAngle` if the angle exceeds 180 degrees.
    pub fn new(degrees: u8) -> Result<Self> {
        if degrees > MAX_SERVO_DEGREES {
            return Err(Error::InvalidAngle {
                degrees: u16::from(degrees),
            });
        }
        Ok(ServoAngle(degrees))
    }

    /// Get the angle in degrees.
    #[must_use]
    pub fn degrees(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ServoAngle {
    type Error = Error;

    fn try_from(degrees: u8) -> Result<Self> {
        ServoAngle::new(degrees)
    }
}

impl fmt::Display for ServoAngle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Unlock PIN code (exactly 4 ASCII digits).
///
/// Comparison is plain string equality. The threat model is a physical
/// keypad on the device itself, not a network channel.
///
/// Deserialization routes through [`PinCode::new`], so a malformed PIN in a
/// configuration file is rejected instead of silently weakening the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct PinCode(String);

impl PinCode {
    /// Create a new PIN code with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidPin` if the code is not exactly 4 ASCII digits.
    pub fn new(code: &str) -> Result<Self> {
        if code.len() != PIN_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidPin(format!(
                "PIN must be exactly {PIN_LENGTH} digits"
            )));
        }
        Ok(PinCode(code.to_string()))
    }

    /// Get the PIN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare a candidate digit buffer against this PIN.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl std::str::FromStr for PinCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PinCode::new(s)
    }
}

impl TryFrom<String> for PinCode {
    type Error = Error;

    fn try_from(code: String) -> Result<Self> {
        PinCode::new(&code)
    }
}

/// Sensor channel selector for series queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Temperature,
    Humidity,
    Gas,
    Moisture,
    Motion,
}

impl SensorKind {
    /// All selectable sensor kinds, in display order.
    pub const ALL: [SensorKind; 5] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::Gas,
        SensorKind::Moisture,
        SensorKind::Motion,
    ];
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity => "humidity",
            SensorKind::Gas => "gas",
            SensorKind::Moisture => "moisture",
            SensorKind::Motion => "motion",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for SensorKind {
    type Err = Error;

    /// Parse a sensor kind from its full name or the short query alias
    /// used by the graphing front end (`temp`, `hum`, `water`).
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "temperature" | "temp" => Ok(SensorKind::Temperature),
            "humidity" | "hum" => Ok(SensorKind::Humidity),
            "gas" => Ok(SensorKind::Gas),
            "moisture" | "water" => Ok(SensorKind::Moisture),
            "motion" => Ok(SensorKind::Motion),
            other => Err(Error::InvalidSensorKind(other.to_string())),
        }
    }
}

/// Timestamp attached to every snapshot (dd/mm/yyyy hh:mm:ss).
///
/// Wraps a structured local datetime so that date filtering compares
/// calendar dates instead of slicing formatted strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SampleTimestamp(DateTime<Local>);

impl SampleTimestamp {
    /// Create a timestamp from the current local time.
    #[must_use]
    pub fn now() -> Self {
        SampleTimestamp(Local::now())
    }

    /// Create a timestamp from a DateTime instance.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Local>) -> Self {
        SampleTimestamp(dt)
    }

    /// Parse from display format: "10/05/2025 12:46:06".
    ///
    /// # Errors
    /// Returns `Error::InvalidTimestamp` if the string does not match the
    /// expected format "dd/mm/yyyy hh:mm:ss", or if it names a local time
    /// that does not exist (DST gap). Ambiguous times during a "fall back"
    /// transition resolve to the earlier occurrence.
    pub fn parse(s: &str) -> Result<Self> {
        let dt = chrono::NaiveDateTime::parse_from_str(s, "%d/%m/%Y %H:%M:%S").map_err(|e| {
            Error::InvalidTimestamp {
                message: format!("'{s}': {e}"),
            }
        })?;

        let local_dt = Local
            .from_local_datetime(&dt)
            .earliest()
            .ok_or_else(|| Error::InvalidTimestamp {
                message: format!("'{s}' is not a valid local time"),
            })?;

        Ok(SampleTimestamp(local_dt))
    }

    /// Format for display (dd/mm/yyyy hh:mm:ss).
    #[must_use]
    pub fn format(&self) -> String {
        self.0.format("%d/%m/%Y %H:%M:%S").to_string()
    }

    /// Returns `true` if this timestamp falls on the given calendar date.
    #[must_use]
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.0.date_naive() == date
    }

    /// Get the inner DateTime reference.
    #[must_use]
    pub fn inner(&self) -> &DateTime<Local> {
        &self.0
    }
}

impl fmt::Display for SampleTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

/// One timestamped record of all sensor values plus the derived cover state.
///
/// Immutable once stored in the history ring. An unwritten ring slot is
/// represented as `None` at the ring level, so every field of a live
/// snapshot is always meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Ambient temperature in degrees Celsius.
    pub temperature: f32,

    /// Relative humidity percentage.
    pub humidity: f32,

    /// Gas level mapped into the 0-5000 display range.
    pub gas_level: u16,

    /// Rain sensor wetness percentage (0-100, higher = wetter).
    pub moisture_percent: u8,

    /// Whether the PIR sensor reported motion this cycle.
    pub motion_detected: bool,

    /// Cover position recorded with this sample.
    pub cover_state: CoverState,

    /// When the sample was taken.
    pub timestamp: SampleTimestamp,
}

impl SensorSnapshot {
    /// Project the requested sensor channel to a numeric series value.
    ///
    /// Motion projects to 0.0/1.0.
    #[must_use]
    pub fn project(&self, kind: SensorKind) -> f64 {
        match kind {
            SensorKind::Temperature => f64::from(self.temperature),
            SensorKind::Humidity => f64::from(self.humidity),
            SensorKind::Gas => f64::from(self.gas_level),
            SensorKind::Moisture => f64::from(self.moisture_percent),
            SensorKind::Motion => {
                if self.motion_detected {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}
