use crate::constants::SYNC_BYTE;
use crate::error::DecodeError;
use crate::packet::FrameBuffer;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssemblerState {
    /// Scanning for two consecutive sync bytes
    #[default]
    Idle,
    ReadingLength,
    ReadingPayload,
    ReadingChecksum,
}

/// Outcome of feeding one byte to the [`FrameAssembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent<'a> {
    /// Byte consumed, no frame boundary reached
    Pending,
    /// Checksum-verified payload
    Frame(&'a [u8]),
    /// Frame aborted: too long or bad checksum
    Rejected(DecodeError),
}

/// Byte-at-a-time frame assembler for `AA AA LEN PAYLOAD CHK` frames.
///
/// Sync bytes are only interpreted while idle; inside a frame they are
/// ordinary data. The byte that ends or aborts a frame may still pair with the
/// byte before it to open the next one.
#[derive(Debug, Clone, Default)]
pub struct FrameAssembler {
    state: AssemblerState,
    last_byte: u8,
    buffer: FrameBuffer,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    pub fn submit_byte(&mut self, byte: u8) -> FrameEvent<'_> {
        let previous = std::mem::replace(&mut self.last_byte, byte);

        let verdict = match self.state {
            AssemblerState::Idle => Verdict::Pending,
            AssemblerState::ReadingLength => {
                let length = byte as usize;
                match self.buffer.start(length) {
                    Ok(()) if length == 0 => {
                        self.state = AssemblerState::ReadingChecksum;
                        Verdict::Pending
                    }
                    Ok(()) => {
                        self.state = AssemblerState::ReadingPayload;
                        Verdict::Pending
                    }
                    Err(err) => {
                        self.state = AssemblerState::Idle;
                        Verdict::Rejected(err)
                    }
                }
            }
            AssemblerState::ReadingPayload => {
                self.buffer.push(byte);
                if self.buffer.is_complete() {
                    self.state = AssemblerState::ReadingChecksum;
                }
                Verdict::Pending
            }
            AssemblerState::ReadingChecksum => {
                self.state = AssemblerState::Idle;
                let expected = self.buffer.expected_checksum();
                if byte == expected {
                    Verdict::Frame
                } else {
                    Verdict::Rejected(DecodeError::ChecksumMismatch {
                        expected,
                        received: byte,
                    })
                }
            }
        };

        if self.state == AssemblerState::Idle && byte == SYNC_BYTE && previous == SYNC_BYTE {
            trace!("Sync marker found");
            self.state = AssemblerState::ReadingLength;
        }

        match verdict {
            Verdict::Pending => FrameEvent::Pending,
            Verdict::Rejected(err) => FrameEvent::Rejected(err),
            Verdict::Frame => {
                let payload = self.buffer.payload();
                debug!(len = payload.len(), payload = hex::encode(payload), "Frame verified");
                FrameEvent::Frame(payload)
            }
        }
    }

    /// Drop any partial frame and forget the previous byte.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

enum Verdict {
    Pending,
    Frame,
    Rejected(DecodeError),
}
