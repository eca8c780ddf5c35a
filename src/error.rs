//! # TIC Error Handling
//!
//! This module defines the TicError enum, which represents the different error
//! types that can surface from the tic-rs crate.
//!
//! Field-level decode failures are not part of this enum: a malformed value
//! decodes to zero and the rest of the frame is kept.

use thiserror::Error;

/// Represents the different error types that can occur in the TIC crate.
#[derive(Debug, Error)]
pub enum TicError {
    /// The serial device could not be opened with the requested configuration.
    #[error("Serial port error: {0}")]
    SerialPortError(String),

    /// An I/O failure, or the end of the stream, while reading a frame.
    #[error("Serial read error: {0}")]
    ReadError(String),

    /// No candidate link configuration validated against the sampled lines.
    #[error("Impossible to auto detect TIC mode on {device} ({tried} configurations tried)")]
    DetectionExhausted { device: String, tried: usize },

    /// Unknown parity name.
    #[error("Impossible to parse parity named: {0}")]
    InvalidParity(String),

    /// Unknown stop bits name.
    #[error("Impossible to parse stop bits named: {0}")]
    InvalidStopBits(String),

    /// Unknown TIC mode name.
    #[error("Impossible to parse TIC mode named: {0}")]
    InvalidMode(String),
}

impl TicError {
    /// Returns true for failures raised while opening the link.
    pub fn is_open_error(&self) -> bool {
        matches!(self, TicError::SerialPortError(_))
    }
}

impl From<tokio_serial::Error> for TicError {
    fn from(e: tokio_serial::Error) -> Self {
        TicError::SerialPortError(e.to_string())
    }
}
