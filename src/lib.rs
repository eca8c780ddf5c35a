//! # tic-rs - A Rust Crate for Linky TIC (Télé-Information Client) Decoding
//!
//! French smart electricity meters continuously emit their readings on a
//! serial output called TIC. The tic-rs crate detects which TIC generation a
//! meter speaks, reads one frame at a time and decodes it into a typed record.
//!
//! ## Features
//!
//! - Auto detection of the link configuration (Standard 9600 baud, then
//!   Historical 1200 baud)
//! - Frame assembly from the STX / ETX delimited line stream
//! - Historical and Standard record decoding, including the seasonal horodate,
//!   the STGE status register and the RELAIS register
//! - Serde serializable records, ready to be handed to an exporter
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tic_rs::{detect, TicRecord};
//!
//! # async fn run() -> Result<(), tic_rs::TicError> {
//! let reader = detect("/dev/ttyAMA0").await?;
//! match reader.read().await? {
//!     TicRecord::Historical(record) => println!("PAPP {}", record.papp),
//!     TicRecord::Standard(record) => println!("SINSTS {}", record.sinsts),
//! }
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod logging;
pub mod payload;
pub mod tic;

pub use crate::error::TicError;
pub use crate::logging::{init_logger, log_error, log_info};

pub use payload::{
    HistoricalRecord, RelayRegister, StandardRecord, StatusField, StatusRegister, TicDecode,
    TicRecord,
};
pub use tic::{
    Detected, DetectorConfig, Frame, LinkConfig, Parity, SerialTransport, StopBits, TicMode,
    TicReader, TicTransport,
};

/// Detect the TIC mode of the meter on a serial device.
///
/// # Arguments
/// * `device` - Serial port path (e.g., "/dev/ttyAMA0" or "/dev/ttyUSB0")
///
/// # Returns
/// * `Ok(TicReader)` - Reader configured with the detected preset
/// * `Err(TicError)` - No preset validated on this device
pub async fn detect(device: &str) -> Result<TicReader<SerialTransport>, TicError> {
    TicReader::detect(SerialTransport::new(device)).await
}

/// Open a reader with an explicit link configuration, skipping detection.
///
/// # Arguments
/// * `device` - Serial port path
/// * `config` - Link configuration to open the port with
/// * `mode` - Field set to decode with; inferred from the baud rate if `None`
pub fn connect(device: &str, config: LinkConfig, mode: Option<TicMode>) -> TicReader<SerialTransport> {
    let mode = mode.unwrap_or_else(|| TicMode::infer(&config));
    TicReader::new(SerialTransport::new(device), config, mode)
}

/// Read and decode one frame from a device with an explicit configuration.
///
/// # Arguments
/// * `device` - Serial port path
/// * `config` - Link configuration to open the port with
///
/// # Returns
/// * `Ok(TicRecord)` - Decoded frame, shaped by the inferred mode
/// * `Err(TicError)` - The port could not be opened or the read failed
pub async fn read(device: &str, config: LinkConfig) -> Result<TicRecord, TicError> {
    connect(device, config, None).read().await
}
