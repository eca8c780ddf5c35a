//! The payload module contains the components responsible for decoding the
//! information groups of a TIC frame into typed records.

pub mod date;
pub mod field;
pub mod historical;
pub mod register;
pub mod standard;

pub use date::{decode_horodate, parse_horodate};
pub use field::{parse_number, tokenize, FieldLine};
pub use historical::HistoricalRecord;
pub use register::{BitSlice, RelayRegister, Relays, StatusField, StatusRegister};
pub use standard::StandardRecord;

use crate::tic::frame::Frame;
use serde::Serialize;

/// A record filled field by field from the lines of one frame.
///
/// Unknown field names are ignored so that newer firmware emitting extra
/// groups still decodes. Decoding is a pure function of the input lines.
pub trait TicDecode: Default {
    /// Stores one information group; last write wins.
    fn apply(&mut self, field: &FieldLine<'_>);

    fn decode_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut record = Self::default();
        for line in lines {
            if let Some(field) = FieldLine::parse(line.as_ref()) {
                record.apply(&field);
            }
        }
        record
    }

    fn decode(frame: &Frame) -> Self {
        Self::decode_lines(&frame.lines)
    }
}

/// A decoded frame, shaped by the TIC generation that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TicRecord {
    Historical(HistoricalRecord),
    Standard(Box<StandardRecord>),
}

impl TicRecord {
    /// Meter identifier: ADCO in historical mode, ADSC in standard mode.
    pub fn meter_address(&self) -> &str {
        match self {
            TicRecord::Historical(record) => &record.adco,
            TicRecord::Standard(record) => &record.adsc,
        }
    }
}
