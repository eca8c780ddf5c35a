//! Mock serial link implementation for testing
//!
//! This module provides an in-memory serial port and transport that can be
//! used to exercise framing, detection and decoding without a meter attached.

use crate::constants::{TIC_CARRIAGE_RETURN, TIC_FRAME_END, TIC_FRAME_START, TIC_LINE_FEED};
use crate::error::TicError;
use crate::tic::link::LinkConfig;
use crate::tic::serial::TicTransport;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, BufReader, ReadBuf};

/// Mock serial port replaying queued bytes, then reporting end of stream.
#[derive(Clone)]
pub struct MockSerialPort {
    /// Data to be read from the port (incoming)
    pub rx_buffer: Arc<Mutex<VecDeque<u8>>>,
    /// Simulated error, returned once the queued bytes are drained
    pub next_error: Arc<Mutex<Option<io::Error>>>,
}

impl Default for MockSerialPort {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSerialPort {
    pub fn new() -> Self {
        MockSerialPort {
            rx_buffer: Arc::new(Mutex::new(VecDeque::new())),
            next_error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_data(data: &[u8]) -> Self {
        let port = Self::new();
        port.queue_rx_data(data);
        port
    }

    /// Queue data to be read from the port
    pub fn queue_rx_data(&self, data: &[u8]) {
        let mut rx = self.rx_buffer.lock().unwrap();
        rx.extend(data);
    }

    /// Queue TIC information groups framed by STX / ETX
    pub fn queue_frame(&self, groups: &[&str]) {
        self.queue_rx_data(&encode_frame(groups));
    }

    /// Set an error to be returned after the queued data has been read
    pub fn set_next_error(&self, error: io::Error) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    pub fn remaining(&self) -> usize {
        self.rx_buffer.lock().unwrap().len()
    }
}

/// Encodes information groups the way a meter puts them on the wire:
/// `STX (LF group CR)* ETX`.
///
/// A trailing LF follows ETX so that the end marker arrives on its own line.
pub fn encode_frame(groups: &[&str]) -> Vec<u8> {
    let mut bytes = vec![TIC_FRAME_START];
    for group in groups {
        bytes.push(TIC_LINE_FEED);
        bytes.extend_from_slice(group.as_bytes());
        bytes.push(TIC_CARRIAGE_RETURN);
    }
    bytes.push(TIC_LINE_FEED);
    bytes.push(TIC_FRAME_END);
    bytes.push(TIC_LINE_FEED);
    bytes
}

impl AsyncRead for MockSerialPort {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let mut rx = self.rx_buffer.lock().unwrap();
        let available = rx.len().min(buf.remaining());

        if available > 0 {
            let data: Vec<u8> = rx.drain(..available).collect();
            buf.put_slice(&data);
            return Poll::Ready(Ok(()));
        }

        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Poll::Ready(Err(error));
        }

        // Nothing left: end of stream
        Poll::Ready(Ok(()))
    }
}

/// What the mock transport does when a given baud rate is opened.
#[derive(Clone)]
pub enum MockLink {
    /// Opening succeeds and the port replays these bytes.
    Stream(Vec<u8>),
    /// Opening fails.
    OpenFailure(String),
}

/// Transport answering each baud rate with a scripted link.
///
/// Unscripted baud rates fail to open. Every successful open replays the
/// script from the start, like a meter that keeps emitting the same frames.
#[derive(Clone, Default)]
pub struct MockTransport {
    device: String,
    links: Arc<Mutex<HashMap<u32, MockLink>>>,
    opened: Arc<Mutex<Vec<LinkConfig>>>,
}

impl MockTransport {
    pub fn new(device: impl Into<String>) -> Self {
        MockTransport {
            device: device.into(),
            ..Default::default()
        }
    }

    pub fn with_stream(self, baud_rate: u32, data: Vec<u8>) -> Self {
        self.links
            .lock()
            .unwrap()
            .insert(baud_rate, MockLink::Stream(data));
        self
    }

    pub fn with_open_failure(self, baud_rate: u32, reason: &str) -> Self {
        self.links
            .lock()
            .unwrap()
            .insert(baud_rate, MockLink::OpenFailure(reason.to_string()));
        self
    }

    /// Configurations passed to `open`, in call order.
    pub fn opened(&self) -> Vec<LinkConfig> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TicTransport for MockTransport {
    type Stream = BufReader<MockSerialPort>;

    fn device(&self) -> &str {
        &self.device
    }

    async fn open(&self, config: &LinkConfig) -> Result<Self::Stream, TicError> {
        self.opened.lock().unwrap().push(*config);

        let link = self.links.lock().unwrap().get(&config.baud_rate).cloned();
        match link {
            Some(MockLink::Stream(data)) => Ok(BufReader::new(MockSerialPort::with_data(&data))),
            Some(MockLink::OpenFailure(reason)) => Err(TicError::SerialPortError(reason)),
            None => Err(TicError::SerialPortError(format!(
                "{}: no device at {} baud",
                self.device, config.baud_rate
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[test]
    fn test_encode_frame() {
        let bytes = encode_frame(&["ADCO 012345678901 E"]);
        assert_eq!(bytes[0], 0x02);
        assert_eq!(bytes[1], 0x0A);
        assert_eq!(&bytes[2..21], b"ADCO 012345678901 E");
        assert_eq!(bytes[21], 0x0D);
        assert_eq!(&bytes[22..], &[0x0A, 0x03, 0x0A]);
    }

    #[tokio::test]
    async fn test_mock_port_reads_then_eof() {
        let mut port = MockSerialPort::with_data(&[1, 2, 3]);
        let mut out = Vec::new();
        port.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(port.remaining(), 0);
    }

    #[tokio::test]
    async fn test_mock_port_error_after_data() {
        let mut port = MockSerialPort::with_data(&[7]);
        port.set_next_error(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"));
        let mut byte = [0u8; 1];
        assert_eq!(port.read(&mut byte).await.unwrap(), 1);
        assert!(port.read(&mut byte).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_transport_records_opens() {
        let transport = MockTransport::new("mock0")
            .with_stream(9600, vec![])
            .with_open_failure(1200, "busy");

        assert!(transport.open(&LinkConfig::STANDARD).await.is_ok());
        assert!(matches!(
            transport.open(&LinkConfig::HISTORICAL).await,
            Err(TicError::SerialPortError(_))
        ));
        assert_eq!(
            transport.opened(),
            vec![LinkConfig::STANDARD, LinkConfig::HISTORICAL]
        );
    }
}
