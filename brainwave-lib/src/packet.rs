use crate::constants::{EEG_POWER_LENGTH, EEG_POWER_VALUE_SIZE, MAX_BAND_POWER, MAX_PACKET_LENGTH, SYNC_BYTE};
use crate::error::DecodeError;
use crate::reading::EegPower;
use bytes::{BufMut, Bytes, BytesMut};
use num_enum::{FromPrimitive, IntoPrimitive};

/// Field tags that can appear in a frame payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum Tag {
    /// Signal quality, 0 = good, 200 = no electrode contact
    PoorSignal = 0x02,
    Attention = 0x04,
    Meditation = 0x05,
    /// Eight 24-bit big-endian band powers behind a length byte
    AsicEegPower = 0x83,

    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Tag {
    /// Number of bytes that follow the tag byte
    pub fn value_len(&self) -> Option<usize> {
        match self {
            Tag::PoorSignal | Tag::Attention | Tag::Meditation => Some(1),
            Tag::AsicEegPower => Some(1 + EEG_POWER_LENGTH as usize),
            Tag::Unknown(_) => None,
        }
    }
}

/// One's complement of the wrapping sum of all payload bytes.
pub fn checksum(payload: &[u8]) -> u8 {
    !payload.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Wrap a payload into a complete frame: `AA AA LEN PAYLOAD CHK`.
pub fn encode_frame(payload: &[u8]) -> Result<Bytes, DecodeError> {
    if payload.len() > MAX_PACKET_LENGTH {
        return Err(DecodeError::PacketTooLong { length: payload.len() });
    }
    let mut frame = BytesMut::with_capacity(payload.len() + 4);
    frame.put_u8(SYNC_BYTE);
    frame.put_u8(SYNC_BYTE);
    frame.put_u8(payload.len() as u8);
    frame.put_slice(payload);
    frame.put_u8(checksum(payload));
    Ok(frame.freeze())
}

/// Fixed-capacity payload storage for the frame currently being assembled.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    data: [u8; MAX_PACKET_LENGTH],
    declared: usize,
    filled: usize,
    accumulator: u8,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            data: [0; MAX_PACKET_LENGTH],
            declared: 0,
            filled: 0,
            accumulator: 0,
        }
    }

    /// Begin a new frame of `length` payload bytes, discarding anything held.
    pub fn start(&mut self, length: usize) -> Result<(), DecodeError> {
        self.filled = 0;
        self.accumulator = 0;
        if length > MAX_PACKET_LENGTH {
            self.declared = 0;
            return Err(DecodeError::PacketTooLong { length });
        }
        self.declared = length;
        Ok(())
    }

    /// Append one payload byte. Bytes past the declared length are dropped.
    pub fn push(&mut self, byte: u8) {
        if self.filled < self.declared {
            self.data[self.filled] = byte;
            self.filled += 1;
            self.accumulator = self.accumulator.wrapping_add(byte);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.filled == self.declared
    }

    /// The bytes collected so far; only verified once `is_complete`.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.filled]
    }

    pub fn expected_checksum(&self) -> u8 {
        255 - self.accumulator
    }
}

/// Builder for TLV payloads, mostly useful for tests and synthetic streams.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    buf: BytesMut,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal_quality(mut self, value: u8) -> Self {
        self.buf.put_u8(Tag::PoorSignal.into());
        self.buf.put_u8(value);
        self
    }

    pub fn attention(mut self, value: u8) -> Self {
        self.buf.put_u8(Tag::Attention.into());
        self.buf.put_u8(value);
        self
    }

    pub fn meditation(mut self, value: u8) -> Self {
        self.buf.put_u8(Tag::Meditation.into());
        self.buf.put_u8(value);
        self
    }

    /// Values above 24 bits are truncated to their low 24 bits.
    pub fn eeg_power(mut self, power: &EegPower) -> Self {
        self.buf.put_u8(Tag::AsicEegPower.into());
        self.buf.put_u8(EEG_POWER_LENGTH);
        for value in power.values() {
            self.buf.put_uint((value & MAX_BAND_POWER) as u64, EEG_POWER_VALUE_SIZE);
        }
        self
    }

    /// Append raw bytes verbatim (unknown tags, malformed fields).
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.put_slice(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn build(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn build_frame(self) -> Result<Bytes, DecodeError> {
        encode_frame(&self.buf)
    }
}
