use crate::decoder::PayloadDecoder;
use crate::error::DecodeError;
use crate::framer::{AssemblerState, FrameAssembler, FrameEvent};
use crate::reading::DecodedReading;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of submitting one byte to a [`StreamDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    NoEvent,
    PacketReady(DecodedReading),
    PacketError(DecodeError),
}

impl StepResult {
    pub fn is_ready(&self) -> bool {
        matches!(self, StepResult::PacketReady(_))
    }

    pub fn reading(&self) -> Option<&DecodedReading> {
        match self {
            StepResult::PacketReady(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DecodeError> {
        match self {
            StepResult::PacketError(err) => Some(err),
            _ => None,
        }
    }
}

/// Running counters for a decoded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StreamStats {
    pub bytes: u64,
    /// Frames that passed the checksum
    pub frames: u64,
    pub readings: u64,
    pub too_long: u64,
    pub checksum_mismatches: u64,
    pub parse_errors: u64,
}

impl StreamStats {
    pub fn errors(&self) -> u64 {
        self.too_long + self.checksum_mismatches + self.parse_errors
    }

    fn record_error(&mut self, err: &DecodeError) {
        match err {
            DecodeError::PacketTooLong { .. } => self.too_long += 1,
            DecodeError::ChecksumMismatch { .. } => self.checksum_mismatches += 1,
            DecodeError::UnrecognizedTag { .. } | DecodeError::TruncatedPayload { .. } => self.parse_errors += 1,
        }
    }
}

/// Frame assembler and payload decoder for a single byte stream.
///
/// Holds the latest reading and a single latest-error slot; errors that
/// occur between two polls of [`StreamDecoder::latest_error`] overwrite each
/// other. Use the returned [`StepResult`] or [`StreamDecoder::stats`] to see
/// every one.
#[derive(Debug, Clone, Default)]
pub struct StreamDecoder {
    assembler: FrameAssembler,
    decoder: PayloadDecoder,
    latest_error: Option<DecodeError>,
    stats: StreamStats,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_byte(&mut self, byte: u8) -> StepResult {
        self.stats.bytes += 1;

        let result = match self.assembler.submit_byte(byte) {
            FrameEvent::Pending => StepResult::NoEvent,
            FrameEvent::Rejected(err) => StepResult::PacketError(err),
            FrameEvent::Frame(payload) => {
                self.stats.frames += 1;
                match self.decoder.decode(payload) {
                    Ok(reading) => StepResult::PacketReady(reading),
                    Err(err) => StepResult::PacketError(err),
                }
            }
        };

        match &result {
            StepResult::NoEvent => {}
            StepResult::PacketReady(_) => self.stats.readings += 1,
            StepResult::PacketError(err) => {
                warn!("{}", err);
                self.stats.record_error(err);
                self.latest_error = Some(*err);
            }
        }
        result
    }

    /// Submit a run of bytes, keeping only the results that carry an event.
    pub fn submit_bytes(&mut self, bytes: &[u8]) -> Vec<StepResult> {
        bytes
            .iter()
            .map(|&b| self.submit_byte(b))
            .filter(|r| *r != StepResult::NoEvent)
            .collect()
    }

    pub fn reading(&self) -> &DecodedReading {
        self.decoder.reading()
    }

    pub fn latest_error(&self) -> Option<&DecodeError> {
        self.latest_error.as_ref()
    }

    /// Take the latest error, leaving the slot empty
    pub fn take_error(&mut self) -> Option<DecodeError> {
        self.latest_error.take()
    }

    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    pub fn state(&self) -> AssemblerState {
        self.assembler.state()
    }
}
