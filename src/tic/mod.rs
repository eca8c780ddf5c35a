//! The tic module contains the link side of the crate: serial transport,
//! link presets, frame assembly, mode detection and the reader tying them
//! together.

pub mod detect;
pub mod frame;
pub mod link;
pub mod reader;
pub mod serial;
pub mod serial_mock;

pub use detect::{detect, is_valid_line, Detected, DetectorConfig};
pub use frame::{read_frame, read_line, AssemblerState, Frame, FrameAssembler};
pub use link::{LinkConfig, Parity, StopBits, TicMode};
pub use reader::TicReader;
pub use serial::{SerialTransport, TicTransport};
