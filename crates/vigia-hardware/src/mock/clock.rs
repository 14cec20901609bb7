//! Clock implementations: the real system clock and a manually stepped
//! clock for deterministic tests.

use crate::traits::Clock;
use chrono::{DateTime, Duration, Local};
use std::sync::{Arc, Mutex};
use vigia_core::SampleTimestamp;

/// Wall-clock time source used on the real device.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SampleTimestamp {
        SampleTimestamp::now()
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Starts at a fixed instant and only moves when told to, so snapshot
/// timestamps and date filters are fully predictable. Clones share the
/// same underlying instant.
///
/// # Examples
///
/// ```
/// use vigia_core::SampleTimestamp;
/// use vigia_hardware::mock::ManualClock;
/// use vigia_hardware::traits::Clock;
///
/// let start = SampleTimestamp::parse("10/05/2025 08:00:00").unwrap();
/// let clock = ManualClock::starting_at(start);
///
/// clock.advance_secs(5);
/// assert_eq!(clock.now().format(), "10/05/2025 08:00:05");
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<DateTime<Local>>>,
}

impl ManualClock {
    /// Create a manual clock starting at the given timestamp.
    pub fn starting_at(start: SampleTimestamp) -> Self {
        Self {
            current: Arc::new(Mutex::new(*start.inner())),
        }
    }

    /// Advance the clock by whole seconds.
    pub fn advance_secs(&self, secs: i64) {
        if let Ok(mut current) = self.current.lock() {
            *current += Duration::seconds(secs);
        }
    }

    /// Jump the clock to an absolute timestamp.
    pub fn set(&self, to: SampleTimestamp) {
        if let Ok(mut current) = self.current.lock() {
            *current = *to.inner();
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SampleTimestamp {
        let current = self
            .current
            .lock()
            .map(|c| *c)
            .unwrap_or_else(|_| Local::now());
        SampleTimestamp::from_datetime(current)
    }
}
