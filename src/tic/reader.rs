//! # TIC Reader
//!
//! Ties a transport, a link configuration and a mode together. Each read
//! opens the link, assembles one frame, decodes it and drops the link again;
//! nothing is kept between reads.

use crate::error::TicError;
use crate::payload::{HistoricalRecord, StandardRecord, TicDecode, TicRecord};
use crate::tic::detect::{detect, DetectorConfig};
use crate::tic::frame::{read_frame, Frame};
use crate::tic::link::{LinkConfig, TicMode};
use crate::tic::serial::TicTransport;
use log::{debug, error};

/// Reads decoded frames from one meter.
#[derive(Debug, Clone)]
pub struct TicReader<T: TicTransport> {
    transport: T,
    config: LinkConfig,
    mode: TicMode,
}

impl<T: TicTransport> TicReader<T> {
    /// Creates a reader with an explicit configuration.
    pub fn new(transport: T, config: LinkConfig, mode: TicMode) -> Self {
        TicReader {
            transport,
            config,
            mode,
        }
    }

    /// Creates a reader with an explicit configuration, inferring the mode
    /// from its baud rate.
    pub fn with_config(transport: T, config: LinkConfig) -> Self {
        let mode = TicMode::infer(&config);
        Self::new(transport, config, mode)
    }

    /// Detects the link configuration, then builds the reader.
    pub async fn detect(transport: T) -> Result<Self, TicError> {
        Self::detect_with(transport, &DetectorConfig::default()).await
    }

    pub async fn detect_with(transport: T, settings: &DetectorConfig) -> Result<Self, TicError> {
        let detected = detect(&transport, settings).await?;
        Ok(Self::new(transport, detected.config, detected.mode))
    }

    pub fn config(&self) -> LinkConfig {
        self.config
    }

    pub fn mode(&self) -> TicMode {
        self.mode
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Reads the interior lines of the next complete frame.
    pub async fn read_frame(&self) -> Result<Frame, TicError> {
        debug!(
            "Read serial with config device: {} {}",
            self.transport.device(),
            self.config
        );
        let mut stream = self.transport.open(&self.config).await?;
        read_frame(&mut stream).await
    }

    /// Reads and decodes one frame with the historical field set.
    pub async fn read_historical(&self) -> Result<HistoricalRecord, TicError> {
        let frame = self.read_frame().await.map_err(|e| {
            error!("Failed to read historical serial : {e}");
            e
        })?;
        Ok(HistoricalRecord::decode(&frame))
    }

    /// Reads and decodes one frame with the standard field set.
    pub async fn read_standard(&self) -> Result<StandardRecord, TicError> {
        let frame = self.read_frame().await.map_err(|e| {
            error!("Failed to read standard serial : {e}");
            e
        })?;
        Ok(StandardRecord::decode(&frame))
    }

    /// Reads one frame and decodes it according to the reader's mode.
    pub async fn read(&self) -> Result<TicRecord, TicError> {
        match self.mode {
            TicMode::Historical => self.read_historical().await.map(TicRecord::Historical),
            TicMode::Standard => self
                .read_standard()
                .await
                .map(|record| TicRecord::Standard(Box::new(record))),
        }
    }
}
