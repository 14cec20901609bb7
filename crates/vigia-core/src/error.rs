use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Domain validation errors
    #[error("Servo angle must be 0-180 degrees, got {degrees}")]
    InvalidAngle { degrees: u16 },

    #[error("Invalid PIN code: {0}")]
    InvalidPin(String),

    #[error("Unknown sensor kind: {0}")]
    InvalidSensorKind(String),

    #[error("Invalid timestamp: {message}")]
    InvalidTimestamp { message: String },

    // History errors
    #[error("History capacity must be at least 1, got {capacity}")]
    InvalidCapacity { capacity: usize },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
