//! # TIC Serial Transport
//!
//! This module provides the link layer of the crate: opening the serial
//! device with a given [`LinkConfig`] and handing back a buffered line stream.
//! Framing and decoding live in [`crate::tic::frame`] and [`crate::payload`].

use crate::error::TicError;
use crate::tic::link::{LinkConfig, Parity, StopBits};
use log::debug;
use tokio::io::{AsyncBufRead, BufReader};
use tokio_serial::SerialPortBuilderExt;

/// Trait for anything that can open the TIC link and return a readable line stream.
///
/// The stream is exclusively owned by the caller and closed when dropped.
#[async_trait::async_trait]
pub trait TicTransport: Send + Sync {
    type Stream: AsyncBufRead + Unpin + Send;

    /// Device path or label, used in log lines and errors.
    fn device(&self) -> &str;

    /// Opens the link with the given configuration.
    async fn open(&self, config: &LinkConfig) -> Result<Self::Stream, TicError>;
}

/// Serial port transport backed by tokio-serial.
#[derive(Debug, Clone)]
pub struct SerialTransport {
    device: String,
}

impl SerialTransport {
    pub fn new(device: impl Into<String>) -> Self {
        SerialTransport {
            device: device.into(),
        }
    }
}

#[async_trait::async_trait]
impl TicTransport for SerialTransport {
    type Stream = BufReader<tokio_serial::SerialStream>;

    fn device(&self) -> &str {
        &self.device
    }

    async fn open(&self, config: &LinkConfig) -> Result<Self::Stream, TicError> {
        debug!("Opening {} with {}", self.device, config);

        let port = tokio_serial::new(self.device.as_str(), config.baud_rate)
            .data_bits(data_bits(config.frame_size)?)
            .parity(parity(config.parity)?)
            .stop_bits(stop_bits(config.stop_bits)?)
            .open_native_async()
            .map_err(|e| TicError::SerialPortError(format!("{}: {}", self.device, e)))?;

        Ok(BufReader::new(port))
    }
}

fn data_bits(frame_size: u8) -> Result<tokio_serial::DataBits, TicError> {
    match frame_size {
        5 => Ok(tokio_serial::DataBits::Five),
        6 => Ok(tokio_serial::DataBits::Six),
        7 => Ok(tokio_serial::DataBits::Seven),
        8 => Ok(tokio_serial::DataBits::Eight),
        other => Err(TicError::SerialPortError(format!(
            "unsupported frame size: {other} data bits"
        ))),
    }
}

fn parity(parity: Parity) -> Result<tokio_serial::Parity, TicError> {
    match parity {
        Parity::None => Ok(tokio_serial::Parity::None),
        Parity::Odd => Ok(tokio_serial::Parity::Odd),
        Parity::Even => Ok(tokio_serial::Parity::Even),
        Parity::Mark | Parity::Space => Err(TicError::SerialPortError(format!(
            "parity {parity:?} is not supported by the serial backend"
        ))),
    }
}

fn stop_bits(stop_bits: StopBits) -> Result<tokio_serial::StopBits, TicError> {
    match stop_bits {
        StopBits::One => Ok(tokio_serial::StopBits::One),
        StopBits::Two => Ok(tokio_serial::StopBits::Two),
        StopBits::OnePointFive => Err(TicError::SerialPortError(
            "1.5 stop bits are not supported by the serial backend".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_bits_mapping() {
        assert_eq!(data_bits(7).unwrap(), tokio_serial::DataBits::Seven);
        assert_eq!(data_bits(8).unwrap(), tokio_serial::DataBits::Eight);
        assert!(matches!(data_bits(9), Err(TicError::SerialPortError(_))));
    }

    #[test]
    fn test_unsupported_parity_and_stop_bits() {
        assert_eq!(parity(Parity::Even).unwrap(), tokio_serial::Parity::Even);
        assert!(parity(Parity::Mark).is_err());
        assert!(parity(Parity::Space).is_err());
        assert_eq!(stop_bits(StopBits::Two).unwrap(), tokio_serial::StopBits::Two);
        assert!(stop_bits(StopBits::OnePointFive).is_err());
    }

    #[tokio::test]
    async fn test_open_missing_device_is_open_error() {
        let transport = SerialTransport::new("/dev/tic-rs-does-not-exist");
        let result = transport.open(&LinkConfig::STANDARD).await;
        assert!(matches!(result, Err(TicError::SerialPortError(_))));
    }
}
