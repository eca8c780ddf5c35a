//! # TIC Frame Assembler
//!
//! A TIC frame is a block of text lines bounded by STX (0x02) and ETX (0x03).
//! The assembler is a small state machine fed line by line:
//!
//! ```text
//! Idle --(line with STX)--> Collecting --(line with ETX)--> Complete
//! ```
//!
//! Lines seen before the first STX are noise and are dropped. The marker
//! lines themselves are never collected. One [`FrameAssembler`] builds exactly
//! one frame; nothing is carried over to the next read.
//!
//! [`read_frame`] drives the assembler from any buffered async stream. It
//! enforces neither a frame size limit nor a timeout: an unterminated frame
//! waits on the stream until it produces data or fails.

use crate::constants::{TIC_CARRIAGE_RETURN, TIC_FRAME_END, TIC_FRAME_START, TIC_LINE_FEED};
use crate::error::TicError;
use crate::payload::field::FieldLine;
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// The interior lines of one complete frame, in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
}

impl Frame {
    pub fn new(lines: Vec<String>) -> Self {
        Frame { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Tokenized lines; lines without a name/value pair are skipped.
    pub fn fields(&self) -> impl Iterator<Item = FieldLine<'_>> {
        self.lines.iter().filter_map(|line| FieldLine::parse(line))
    }
}

/// Assembly progress of the frame being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    /// Waiting for a start marker.
    Idle,
    /// Start marker seen, collecting interior lines.
    Collecting,
    /// End marker seen.
    Complete,
}

/// Line-fed frame builder.
#[derive(Debug)]
pub struct FrameAssembler {
    state: AssemblerState,
    lines: Vec<String>,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAssembler {
    pub fn new() -> Self {
        FrameAssembler {
            state: AssemblerState::Idle,
            lines: Vec::new(),
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    /// Feeds one line (without its line terminator).
    ///
    /// Returns true once the frame is complete; further lines are ignored.
    pub fn push_line(&mut self, line: &str) -> bool {
        let has_start = line.as_bytes().contains(&TIC_FRAME_START);
        let has_end = line.as_bytes().contains(&TIC_FRAME_END);

        match self.state {
            AssemblerState::Complete => {}
            AssemblerState::Collecting if has_end => {
                self.state = AssemblerState::Complete;
            }
            _ if has_start => {
                self.state = AssemblerState::Collecting;
            }
            AssemblerState::Collecting => {
                debug!("{line}");
                self.lines.push(line.to_string());
            }
            AssemblerState::Idle => {}
        }

        self.state == AssemblerState::Complete
    }

    /// Returns the frame if the end marker has been seen.
    pub fn finish(self) -> Option<Frame> {
        match self.state {
            AssemblerState::Complete => Some(Frame::new(self.lines)),
            _ => None,
        }
    }
}

/// Reads one LF-terminated line, stripping the trailing CR/LF.
///
/// End of stream is reported as a read error: the TIC link never closes on
/// its own, so a closed stream means the link is gone.
pub async fn read_line<R>(reader: &mut R) -> Result<String, TicError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader
        .read_until(TIC_LINE_FEED, &mut buf)
        .await
        .map_err(|e| TicError::ReadError(e.to_string()))?;

    into_line(buf, n)
}

/// Reads one line like [`read_line`], but stops after `max` bytes.
///
/// A longer line is cut and the prefix is returned; the next call resumes
/// where this one stopped. A link at the wrong baud rate may never send a
/// line feed, so sampling must not wait for one.
pub async fn read_line_limited<R>(reader: &mut R, max: usize) -> Result<String, TicError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = (&mut *reader)
        .take(max as u64)
        .read_until(TIC_LINE_FEED, &mut buf)
        .await
        .map_err(|e| TicError::ReadError(e.to_string()))?;

    into_line(buf, n)
}

fn into_line(mut buf: Vec<u8>, n: usize) -> Result<String, TicError> {
    if n == 0 {
        return Err(TicError::ReadError("end of stream".to_string()));
    }

    while matches!(buf.last(), Some(&TIC_LINE_FEED) | Some(&TIC_CARRIAGE_RETURN)) {
        buf.pop();
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Reads lines until one complete frame has been assembled.
///
/// Any read failure aborts the frame; partially collected lines are dropped.
pub async fn read_frame<R>(reader: &mut R) -> Result<Frame, TicError>
where
    R: AsyncBufRead + Unpin,
{
    debug!("Read serial data...");
    let mut assembler = FrameAssembler::new();

    loop {
        let line = read_line(reader).await?;
        if assembler.push_line(&line) {
            break;
        }
    }

    debug!("Read serial data ended !");
    assembler
        .finish()
        .ok_or_else(|| TicError::ReadError("frame not terminated".to_string()))
}
