//! Control plane for the Vigia home-monitoring controller.
//!
//! This crate ties the peripheral traits from `vigia-hardware` to the
//! history storage in `vigia-history`:
//!
//! - [`SnapshotBuilder`] normalizes raw readings (NaN substitution, ADC
//!   scaling) into [`vigia_core::SensorSnapshot`] values
//! - [`AutomationPolicy`] maps wetness to rain cover commands
//! - [`AccessGate`] is the PIN entry state machine for the manual override
//! - [`Controller`] owns all of the above and runs the cooperative
//!   sampling/key-event loop
//!
//! # Examples
//!
//! ```
//! use vigia_control::{AccessGate, GateEvent};
//! use vigia_core::PinCode;
//! use vigia_hardware::KeyEvent;
//!
//! let mut gate = AccessGate::new(PinCode::new("1245").unwrap());
//! for digit in [1, 2, 4, 5] {
//!     gate.handle_key(KeyEvent::digit(digit).unwrap());
//! }
//! assert_eq!(gate.handle_key(KeyEvent::Submit), GateEvent::Unlocked);
//! ```

pub mod builder;
pub mod config;
pub mod controller;
pub mod gate;
pub mod policy;

pub use builder::SnapshotBuilder;
pub use config::ControllerConfig;
pub use controller::Controller;
pub use gate::{AccessGate, GateEvent, GateState};
pub use policy::{AutomationPolicy, CoverCommand};
