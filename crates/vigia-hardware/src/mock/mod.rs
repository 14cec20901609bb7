//! Mock peripheral implementations for testing and development.
//!
//! This module provides simulated peripherals that can be controlled and
//! observed programmatically without requiring the physical board.

pub mod actuator;
pub mod clock;
pub mod display;
pub mod keypad;
pub mod sensors;

// Re-export commonly used types
pub use actuator::{MockActuator, MockActuatorHandle};
pub use clock::{ManualClock, SystemClock};
pub use display::{MockDisplay, MockDisplayHandle};
pub use keypad::{MockKeypad, MockKeypadHandle};
pub use sensors::{MockSensorBank, MockSensorBankHandle};
