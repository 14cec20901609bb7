//! Peripheral abstraction layer for the Vigia monitoring controller.
//!
//! This crate defines trait-based abstractions for the peripherals the
//! controller core consumes and drives: the environmental sensor bank, the
//! cover servo, the status display, the access keypad, and the clock. The
//! traits enable substitution between mock implementations (development and
//! testing) and real hardware drivers.
//!
//! # Design
//!
//! - **Async-first**: all I/O operations use native `async fn` in traits
//!   (Edition 2024 RPITIT); the clock alone is synchronous.
//! - **Prompt or absent**: a sensor that cannot produce a value reports NaN
//!   or an error, never hangs. The sampler treats errors as transient.
//! - **Fire-and-forget outputs**: servo and display commands carry no
//!   acknowledgement; failures are logged by the caller and dropped.
//!
//! # Mocks
//!
//! Every peripheral has a channel- or handle-driven mock in [`mock`]:
//!
//! ```no_run
//! use vigia_hardware::mock::{MockKeypad, MockSensorBank};
//! use vigia_hardware::traits::{KeyEvent, Keypad, SensorBank};
//!
//! # async fn example() -> vigia_hardware::Result<()> {
//! let (mut keypad, keys) = MockKeypad::new();
//! let (mut sensors, _feed) = MockSensorBank::new();
//!
//! keys.send_key(KeyEvent::Digit(1)).await?;
//! let key = keypad.read_key().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mock;
pub mod traits;

// Re-export commonly used types for convenience
pub use error::{HardwareError, Result};
pub use traits::{Actuator, Clock, Display, KeyEvent, Keypad, RawReading, SensorBank};
