//! TIC Protocol Constants
//!
//! This module defines constants used by the TIC framing and decoding layers,
//! as published by Enedis in NOI-CPT_54E.

/// Start of frame (STX)
pub const TIC_FRAME_START: u8 = 0x02;

/// End of frame (ETX)
pub const TIC_FRAME_END: u8 = 0x03;

/// Line feed, terminates every line read from the link
pub const TIC_LINE_FEED: u8 = 0x0A;

/// Carriage return, closes every information group on the wire
pub const TIC_CARRIAGE_RETURN: u8 = 0x0D;

/// Horizontal tab, field separator in standard mode
pub const TIC_SEPARATOR_TAB: char = '\t';

/// Space, field separator in historical mode
pub const TIC_SEPARATOR_SPACE: char = ' ';

/// Number of lines sampled per candidate configuration during detection
pub const TIC_DETECTION_SAMPLE_LINES: usize = 5;

/// Longest line read while sampling; longer lines are cut at this length
pub const TIC_DETECTION_MAX_LINE: usize = 4096;

/// Structural pattern a sampled line must match to confirm a configuration
pub const TIC_LINE_PATTERN: &str = r"^[A-Z0-9\-+]+ +[a-zA-Z0-9 \.\-]+ +.$";

/// Standard mode baud rate
pub const TIC_STANDARD_BAUD_RATE: u32 = 9600;

/// Historical mode baud rate
pub const TIC_HISTORICAL_BAUD_RATE: u32 = 1200;

/// Both TIC generations use 7 data bits
pub const TIC_FRAME_SIZE: u8 = 7;

/// Season marker of a winter horodate (UTC+1)
pub const TIC_WINTER_SEASON: char = 'H';

/// UTC offset of winter horodates, in seconds
pub const TIC_WINTER_OFFSET_SECS: i32 = 3600;

/// UTC offset of summer horodates, in seconds
pub const TIC_SUMMER_OFFSET_SECS: i32 = 7200;
