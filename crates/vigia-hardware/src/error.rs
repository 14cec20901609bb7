//! Error types for peripheral operations.
//!
//! This module defines error types specific to the controller's peripherals,
//! covering disconnection, transient unavailability, and invalid data.

/// Result type alias for peripheral operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur during peripheral operations.
///
/// None of these are fatal to the controller: sensor failures are sanitized
/// by the sampler (previous-value substitution), and actuator/display
/// failures are logged and dropped (fire-and-forget contract).
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Peripheral is not connected or has been disconnected.
    #[error("Peripheral disconnected: {device}")]
    Disconnected { device: String },

    /// Peripheral has no reading available right now.
    #[error("Reading unavailable: {device}")]
    Unavailable { device: String },

    /// Invalid data received from a peripheral.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new reading-unavailable error.
    pub fn unavailable(device: impl Into<String>) -> Self {
        Self::Unavailable {
            device: device.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_error() {
        let error = HardwareError::disconnected("keypad");
        assert!(matches!(error, HardwareError::Disconnected { .. }));
        assert_eq!(error.to_string(), "Peripheral disconnected: keypad");
    }

    #[test]
    fn test_unavailable_error() {
        let error = HardwareError::unavailable("dht22");
        assert!(matches!(error, HardwareError::Unavailable { .. }));
        assert_eq!(error.to_string(), "Reading unavailable: dht22");
    }

    #[test]
    fn test_invalid_data_error() {
        let error = HardwareError::invalid_data("digit out of range");
        assert_eq!(error.to_string(), "Invalid data: digit out of range");
    }
}
