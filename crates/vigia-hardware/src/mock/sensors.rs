//! Mock sensor bank for testing and development.

use crate::{
    HardwareError, Result,
    traits::{RawReading, SensorBank},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock sensor bank serving scripted readings.
///
/// Readings are queued through a [`MockSensorBankHandle`] and served in
/// FIFO order, one per [`SensorBank::read`] call. When the queue runs dry
/// the bank reports `Unavailable`, exercising the sampler's
/// previous-value substitution path. The real sensor bank never blocks,
/// so neither does this one.
///
/// # Examples
///
/// ```
/// use vigia_hardware::mock::MockSensorBank;
/// use vigia_hardware::traits::{RawReading, SensorBank};
///
/// #[tokio::main]
/// async fn main() -> vigia_hardware::Result<()> {
///     let (mut bank, handle) = MockSensorBank::new();
///
///     handle.push(RawReading {
///         temperature: 22.5,
///         humidity: 48.0,
///         gas_raw: 800,
///         moisture_raw: 3500,
///         motion: false,
///     });
///
///     let reading = bank.read().await?;
///     assert_eq!(reading.temperature, 22.5);
///
///     // Queue exhausted: next read is unavailable.
///     assert!(bank.read().await.is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockSensorBank {
    queue: Arc<Mutex<VecDeque<RawReading>>>,
}

impl MockSensorBank {
    /// Create a new mock sensor bank and its control handle.
    pub fn new() -> (Self, MockSensorBankHandle) {
        let queue = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                queue: Arc::clone(&queue),
            },
            MockSensorBankHandle { queue },
        )
    }
}

impl SensorBank for MockSensorBank {
    async fn read(&mut self) -> Result<RawReading> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|_| HardwareError::invalid_data("sensor queue poisoned"))?;
        queue
            .pop_front()
            .ok_or_else(|| HardwareError::unavailable("mock sensor bank"))
    }
}

/// Handle for scripting a mock sensor bank.
///
/// Can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct MockSensorBankHandle {
    queue: Arc<Mutex<VecDeque<RawReading>>>,
}

impl MockSensorBankHandle {
    /// Queue one reading to be served by the next read.
    pub fn push(&self, reading: RawReading) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(reading);
        }
    }

    /// Queue several readings at once.
    pub fn push_all(&self, readings: impl IntoIterator<Item = RawReading>) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.extend(readings);
        }
    }

    /// Number of readings still queued.
    pub fn pending(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }
}
