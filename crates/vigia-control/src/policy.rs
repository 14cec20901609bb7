//! Threshold-driven rain cover automation.

use vigia_core::{CoverState, ServoAngle, constants::RAIN_THRESHOLD_DEFAULT};

/// Actuation decision for one sampling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverCommand {
    /// Automation suspended (manual unlock active): retain the last
    /// commanded servo position and the last recorded cover state.
    Hold,

    /// Drive the servo and record the new cover state.
    Move {
        cover: CoverState,
        angle: ServoAngle,
    },
}

/// Stateless threshold policy mapping wetness to a cover command.
///
/// This is a bare threshold with no hysteresis and no debounce, matching
/// the deployed firmware: readings oscillating around the threshold will
/// chatter the servo. Known limitation.
#[derive(Debug, Clone, Copy)]
pub struct AutomationPolicy {
    rain_threshold: u8,
}

impl AutomationPolicy {
    /// Create a policy with the given wetness threshold (percent).
    pub fn new(rain_threshold: u8) -> Self {
        Self { rain_threshold }
    }

    /// Threshold in effect (percent).
    pub fn rain_threshold(&self) -> u8 {
        self.rain_threshold
    }

    /// Decide the cover command for this cycle.
    ///
    /// While `unlocked` the policy yields [`CoverCommand::Hold`]
    /// unconditionally; otherwise wetness at or above the threshold closes
    /// the cover (0°) and anything below opens it (90°).
    pub fn decide(&self, moisture_percent: u8, unlocked: bool) -> CoverCommand {
        if unlocked {
            return CoverCommand::Hold;
        }
        if moisture_percent >= self.rain_threshold {
            CoverCommand::Move {
                cover: CoverState::Covered,
                angle: ServoAngle::COVER_CLOSED,
            }
        } else {
            CoverCommand::Move {
                cover: CoverState::Exterior,
                angle: ServoAngle::COVER_OPEN,
            }
        }
    }
}

impl Default for AutomationPolicy {
    fn default() -> Self {
        Self::new(RAIN_THRESHOLD_DEFAULT)
    }
}
