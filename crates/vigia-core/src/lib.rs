//! Shared domain types for the Vigia home-monitoring controller.
//!
//! This crate defines the vocabulary used across the workspace: sensor
//! snapshots, cover states, validated servo angles and PIN codes, structured
//! sample timestamps, and the common error type.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
