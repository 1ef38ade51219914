use std::io;
use thiserror::Error;

use crate::constants::MAX_PACKET_LENGTH;

/// Failure while framing or decoding a single packet.
///
/// None of these are fatal: the frame assembler always returns to scanning
/// for the next sync marker.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodeError {
    #[error("Packet too long: declared length {length} exceeds {max}", max = MAX_PACKET_LENGTH)]
    PacketTooLong { length: usize },

    #[error("Checksum mismatch: expected {expected:#04x}, received {received:#04x}")]
    ChecksumMismatch { expected: u8, received: u8 },

    #[error("Could not parse: unrecognized tag {tag:#04x} at offset {offset}")]
    UnrecognizedTag { tag: u8, offset: usize },

    #[error("Could not parse: tag {tag:#04x} needs {needed} bytes, only {available} left")]
    TruncatedPayload { tag: u8, needed: usize, available: usize },
}

impl DecodeError {
    /// Whether the frame itself was rejected, as opposed to its payload
    pub fn is_framing_error(&self) -> bool {
        matches!(self, DecodeError::PacketTooLong { .. } | DecodeError::ChecksumMismatch { .. })
    }
}

/// The primary error type for the `brainwave-lib` library.
#[derive(Error, Debug)]
pub enum BrainError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Byte source closed")]
    Disconnected,
}
