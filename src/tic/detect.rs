//! # TIC Mode Detection
//!
//! The meter does not announce its generation, so the link is opened with
//! each candidate preset in turn and a few lines are sampled. A line that
//! looks like an information group (`LABEL value checksum`) confirms the
//! preset; a wrong baud rate only produces garbage.
//!
//! ## Detection Sequence
//!
//! 1. Open with the Standard preset (9600 baud 7N1), sample up to 5 lines
//! 2. Open with the Historical preset (1200 baud 7N1), sample up to 5 lines
//! 3. Give up with [`TicError::DetectionExhausted`]
//!
//! An attempt that cannot open the device, or whose stream fails while
//! sampling, is rejected and the next candidate is tried. Sampled lines are
//! cut after 4096 bytes, so a link that never sends a line feed still uses
//! up its sample window.

use crate::constants::{TIC_DETECTION_MAX_LINE, TIC_DETECTION_SAMPLE_LINES, TIC_LINE_PATTERN};
use crate::error::TicError;
use crate::tic::frame::read_line_limited;
use crate::tic::link::{LinkConfig, TicMode};
use crate::tic::serial::TicTransport;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::AsyncBufRead;

static LINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(TIC_LINE_PATTERN).expect("TIC_LINE_PATTERN is a valid regex"));

/// Returns true when a raw line has the shape of an information group.
pub fn is_valid_line(line: &str) -> bool {
    LINE_PATTERN.is_match(line)
}

/// Detection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Lines read per candidate before rejecting it.
    pub sample_lines: usize,
    /// Bytes after which a sampled line is cut and counted as one line.
    pub max_line_len: usize,
    /// Candidates, tried in order.
    pub candidates: Vec<TicMode>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            sample_lines: TIC_DETECTION_SAMPLE_LINES,
            max_line_len: TIC_DETECTION_MAX_LINE,
            candidates: TicMode::PRIORITY.to_vec(),
        }
    }
}

/// Outcome of a successful detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detected {
    pub mode: TicMode,
    pub config: LinkConfig,
}

/// Tries every candidate in order and returns the first one that validates.
pub async fn detect<T>(transport: &T, settings: &DetectorConfig) -> Result<Detected, TicError>
where
    T: TicTransport,
{
    info!("Trying to auto detect TIC mode...");

    for &mode in &settings.candidates {
        let config = mode.config();
        if try_config(transport, &config, settings).await {
            info!("{} mode detected on {} ({})", mode, transport.device(), config);
            return Ok(Detected { mode, config });
        }
        debug!("It's not {mode} mode !");
    }

    Err(TicError::DetectionExhausted {
        device: transport.device().to_string(),
        tried: settings.candidates.len(),
    })
}

async fn try_config<T>(transport: &T, config: &LinkConfig, settings: &DetectorConfig) -> bool
where
    T: TicTransport,
{
    let mut stream = match transport.open(config).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Cannot open {} with {}: {}", transport.device(), config, e);
            return false;
        }
    };

    // The stream is dropped, and the port closed, when this returns.
    match sample(&mut stream, settings).await {
        Ok(matched) => matched,
        Err(e) => {
            warn!("Read failed on {} with {}: {}", transport.device(), config, e);
            false
        }
    }
}

async fn sample<R>(stream: &mut R, settings: &DetectorConfig) -> Result<bool, TicError>
where
    R: AsyncBufRead + Unpin,
{
    debug!("Read serial data...");
    let sample_lines = settings.sample_lines;
    for i in 1..=sample_lines {
        let line = read_line_limited(stream, settings.max_line_len).await?;
        debug!("Try line {i}/{sample_lines} : {line:?}");
        if is_valid_line(&line) {
            return Ok(true);
        }
        debug!("Regex not match");
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tic::serial_mock::{encode_frame, MockTransport};

    #[test]
    fn test_line_pattern() {
        assert!(is_valid_line("ADCO 031762120162 >"));
        assert!(is_valid_line("PTEC TH.. $"));
        assert!(is_valid_line("NJOURF+1 00 B"));
        assert!(is_valid_line("MOTDETAT 000000 B"));
    }

    #[test]
    fn test_line_pattern_rejects_garbage() {
        assert!(!is_valid_line(""));
        assert!(!is_valid_line("\u{2}"));
        assert!(!is_valid_line("adco 031762120162 >"));
        assert!(!is_valid_line("ADCO 031762120162"));
        assert!(!is_valid_line("ADCO 031762120162 >>"));
        assert!(!is_valid_line("\u{fffd}\u{fffd}x\u{fffd}"));
    }

    #[test]
    fn test_default_config() {
        let settings = DetectorConfig::default();
        assert_eq!(settings.sample_lines, 5);
        assert_eq!(settings.max_line_len, 4096);
        assert_eq!(settings.candidates, vec![TicMode::Standard, TicMode::Historical]);
    }

    #[tokio::test]
    async fn test_first_candidate_wins() {
        let frame = encode_frame(&["ADCO 031762120162 >", "PAPP 00390 -"]);
        let transport = MockTransport::new("mock0")
            .with_stream(9600, frame.clone())
            .with_stream(1200, frame);

        let detected = detect(&transport, &DetectorConfig::default()).await.unwrap();
        assert_eq!(detected.mode, TicMode::Standard);
        assert_eq!(detected.config, LinkConfig::STANDARD);
        assert_eq!(transport.opened(), vec![LinkConfig::STANDARD]);
    }

    #[tokio::test]
    async fn test_sample_window_is_bounded() {
        // Valid group is the 6th line at 9600 baud: out of the window
        let mut data = b"\x7f\n\x7f\n\x7f\n\x7f\n\x7f\n".to_vec();
        data.extend_from_slice(b"ADCO 031762120162 >\r\n");
        let transport = MockTransport::new("mock0").with_stream(9600, data);

        let settings = DetectorConfig::default();
        assert!(matches!(
            detect(&transport, &settings).await,
            Err(TicError::DetectionExhausted { tried: 2, .. })
        ));

        let settings = DetectorConfig {
            sample_lines: 6,
            ..DetectorConfig::default()
        };
        assert_eq!(detect(&transport, &settings).await.unwrap().mode, TicMode::Standard);
    }
}
