use crate::error::{BrainError, DecodeError};
use crate::reading::{DecodedReading, EegPower};
use crate::source::ByteSource;
use crate::stream::{StepResult, StreamDecoder, StreamStats};

/// A headset connection: a byte source paired with its own decoder.
///
/// Each physical stream needs its own `Brain`; nothing is shared between
/// instances.
#[derive(Debug)]
pub struct Brain<S> {
    source: S,
    decoder: StreamDecoder,
}

impl<S: ByteSource> Brain<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            decoder: StreamDecoder::new(),
        }
    }

    /// Consume at most one byte from the source.
    ///
    /// Returns `true` when that byte completed a packet that decoded
    /// successfully. Call it from the main loop.
    pub fn update(&mut self) -> Result<bool, BrainError> {
        Ok(self.step()?.is_some_and(|result| result.is_ready()))
    }

    /// Consume available bytes until a fresh reading is decoded or the
    /// source has nothing more to offer right now.
    pub fn next_reading(&mut self) -> Result<Option<DecodedReading>, BrainError> {
        while let Some(result) = self.step()? {
            if let StepResult::PacketReady(reading) = result {
                return Ok(Some(reading));
            }
        }
        Ok(None)
    }

    fn step(&mut self) -> Result<Option<StepResult>, BrainError> {
        Ok(self.source.poll_byte()?.map(|byte| self.decoder.submit_byte(byte)))
    }

    pub fn reading(&self) -> &DecodedReading {
        self.decoder.reading()
    }

    pub fn signal_quality(&self) -> u8 {
        self.reading().signal_quality
    }

    pub fn attention(&self) -> u8 {
        self.reading().attention
    }

    pub fn meditation(&self) -> u8 {
        self.reading().meditation
    }

    pub fn has_power(&self) -> bool {
        self.reading().has_power
    }

    /// Band powers from the last decode; all zero unless `has_power`
    pub fn eeg_power(&self) -> &EegPower {
        &self.reading().eeg_power
    }

    pub fn latest_error(&self) -> Option<&DecodeError> {
        self.decoder.latest_error()
    }

    /// Human-readable form of the latest error, empty if none occurred
    pub fn latest_error_message(&self) -> String {
        self.latest_error().map(ToString::to_string).unwrap_or_default()
    }

    pub fn stats(&self) -> &StreamStats {
        self.decoder.stats()
    }

    pub fn decoder(&self) -> &StreamDecoder {
        &self.decoder
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source, e.g. to push newly received bytes
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}
