//! Mock cover servo for testing and development.

use crate::{Result, traits::Actuator};
use std::sync::{Arc, Mutex};
use vigia_core::ServoAngle;

/// Mock servo recording every commanded angle.
///
/// The command log is observable through a [`MockActuatorHandle`], letting
/// tests assert on what the controller actually drove.
///
/// # Examples
///
/// ```
/// use vigia_core::ServoAngle;
/// use vigia_hardware::mock::MockActuator;
/// use vigia_hardware::traits::Actuator;
///
/// #[tokio::main]
/// async fn main() -> vigia_hardware::Result<()> {
///     let (mut servo, handle) = MockActuator::new();
///
///     servo.set_angle(ServoAngle::COVER_CLOSED).await?;
///     servo.set_angle(ServoAngle::COVER_OPEN).await?;
///
///     assert_eq!(handle.last(), Some(ServoAngle::COVER_OPEN));
///     assert_eq!(handle.commanded().len(), 2);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockActuator {
    log: Arc<Mutex<Vec<ServoAngle>>>,
}

impl MockActuator {
    /// Create a new mock servo and its observation handle.
    pub fn new() -> (Self, MockActuatorHandle) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                log: Arc::clone(&log),
            },
            MockActuatorHandle { log },
        )
    }
}

impl Actuator for MockActuator {
    async fn set_angle(&mut self, angle: ServoAngle) -> Result<()> {
        if let Ok(mut log) = self.log.lock() {
            log.push(angle);
        }
        Ok(())
    }
}

/// Handle for observing a mock servo's command log.
///
/// Can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct MockActuatorHandle {
    log: Arc<Mutex<Vec<ServoAngle>>>,
}

impl MockActuatorHandle {
    /// All angles commanded so far, oldest first.
    pub fn commanded(&self) -> Vec<ServoAngle> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// The most recently commanded angle, if any.
    pub fn last(&self) -> Option<ServoAngle> {
        self.log.lock().ok().and_then(|log| log.last().copied())
    }

    /// Clear the command log.
    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commands_are_recorded_in_order() {
        let (mut servo, handle) = MockActuator::new();

        servo.set_angle(ServoAngle::COVER_CLOSED).await.unwrap();
        servo.set_angle(ServoAngle::COVER_OPEN).await.unwrap();

        assert_eq!(
            handle.commanded(),
            vec![ServoAngle::COVER_CLOSED, ServoAngle::COVER_OPEN]
        );
        assert_eq!(handle.last(), Some(ServoAngle::COVER_OPEN));
    }

    #[tokio::test]
    async fn test_clear_resets_log() {
        let (mut servo, handle) = MockActuator::new();
        servo.set_angle(ServoAngle::COVER_OPEN).await.unwrap();

        handle.clear();
        assert!(handle.commanded().is_empty());
        assert_eq!(handle.last(), None);
    }
}
