//! # TIC Link Configuration
//!
//! Electrical parameters of the serial link and the two TIC generations that
//! use them. The presets are plain `const` values: they are never mutated and
//! are passed explicitly to the detector and the reader.

use crate::constants::{TIC_FRAME_SIZE, TIC_HISTORICAL_BAUD_RATE, TIC_STANDARD_BAUD_RATE};
use crate::error::TicError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parity bit setting of the serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    None,
    Odd,
    Even,
    Mark,
    Space,
}

impl FromStr for Parity {
    type Err = TicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ParityNone" | "N" => Ok(Parity::None),
            "ParityOdd" | "O" => Ok(Parity::Odd),
            "ParityEven" | "E" => Ok(Parity::Even),
            "ParityMark" | "M" => Ok(Parity::Mark),
            "ParitySpace" | "S" => Ok(Parity::Space),
            _ => Err(TicError::InvalidParity(s.to_string())),
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = match self {
            Parity::None => "N",
            Parity::Odd => "O",
            Parity::Even => "E",
            Parity::Mark => "M",
            Parity::Space => "S",
        };
        f.write_str(short)
    }
}

/// Number of stop bits of the serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopBits {
    One,
    OnePointFive,
    Two,
}

impl FromStr for StopBits {
    type Err = TicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Stop1" | "1" => Ok(StopBits::One),
            "Stop1Half" | "15" | "1.5" => Ok(StopBits::OnePointFive),
            "Stop2" | "2" => Ok(StopBits::Two),
            _ => Err(TicError::InvalidStopBits(s.to_string())),
        }
    }
}

impl fmt::Display for StopBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = match self {
            StopBits::One => "1",
            StopBits::OnePointFive => "1.5",
            StopBits::Two => "2",
        };
        f.write_str(short)
    }
}

/// Serial parameters used to open the TIC link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkConfig {
    pub baud_rate: u32,
    pub frame_size: u8,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl LinkConfig {
    /// Standard mode: 9600 baud, 7 data bits, no parity, 1 stop bit.
    pub const STANDARD: LinkConfig = LinkConfig {
        baud_rate: TIC_STANDARD_BAUD_RATE,
        frame_size: TIC_FRAME_SIZE,
        parity: Parity::None,
        stop_bits: StopBits::One,
    };

    /// Historical mode: 1200 baud, 7 data bits, no parity, 1 stop bit.
    pub const HISTORICAL: LinkConfig = LinkConfig {
        baud_rate: TIC_HISTORICAL_BAUD_RATE,
        frame_size: TIC_FRAME_SIZE,
        parity: Parity::None,
        stop_bits: StopBits::One,
    };

    pub fn new(baud_rate: u32, frame_size: u8, parity: Parity, stop_bits: StopBits) -> Self {
        LinkConfig {
            baud_rate,
            frame_size,
            parity,
            stop_bits,
        }
    }
}

impl fmt::Display for LinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} baud {}{}{}",
            self.baud_rate, self.frame_size, self.parity, self.stop_bits
        )
    }
}

/// TIC generation spoken by the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicMode {
    Historical,
    Standard,
}

impl TicMode {
    /// Detection order: the modern generation first.
    pub const PRIORITY: [TicMode; 2] = [TicMode::Standard, TicMode::Historical];

    /// Preset link configuration of this generation.
    pub fn config(&self) -> LinkConfig {
        match self {
            TicMode::Historical => LinkConfig::HISTORICAL,
            TicMode::Standard => LinkConfig::STANDARD,
        }
    }

    /// Picks the generation matching an explicit configuration.
    ///
    /// Standard meters talk at 9600 baud, historical ones at 1200; anything at
    /// or above the standard rate is decoded with the standard field set.
    pub fn infer(config: &LinkConfig) -> TicMode {
        if config.baud_rate >= TIC_STANDARD_BAUD_RATE {
            TicMode::Standard
        } else {
            TicMode::Historical
        }
    }
}

impl FromStr for TicMode {
    type Err = TicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "std" => Ok(TicMode::Standard),
            "historical" | "historique" | "hist" => Ok(TicMode::Historical),
            _ => Err(TicError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for TicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicMode::Historical => f.write_str("historical"),
            TicMode::Standard => f.write_str("standard"),
        }
    }
}
