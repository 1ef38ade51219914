//! TLV payload decoding.
//!
//! Payloads are walked left to right with no backtracking. Decoding is not
//! atomic across fields: scalars applied before a failing tag stay applied,
//! matching the headset library this protocol comes from. Band powers are the
//! exception: the `0x83` block is committed all at once, and any failure in
//! the payload leaves the powers empty.

use crate::constants::{EEG_POWER_BANDS, EEG_POWER_LENGTH, EEG_POWER_VALUE_SIZE};
use crate::error::DecodeError;
use crate::packet::Tag;
use crate::reading::{DecodedReading, EegPower};
use bytes::Buf;
use num_enum::FromPrimitive;
use tracing::trace;

/// Applies verified payloads onto a persistent reading.
#[derive(Debug, Clone, Default)]
pub struct PayloadDecoder {
    reading: DecodedReading,
}

impl PayloadDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current reading, including scalars applied by a failed decode
    pub fn reading(&self) -> &DecodedReading {
        &self.reading
    }

    /// Decode one verified payload.
    ///
    /// On failure the band powers are left empty for this cycle, whatever the
    /// payload carried before the failing tag.
    pub fn decode(&mut self, payload: &[u8]) -> Result<DecodedReading, DecodeError> {
        self.reading.clear_power();
        self.walk(payload).inspect_err(|_| self.reading.clear_power())?;
        Ok(self.reading)
    }

    fn walk(&mut self, payload: &[u8]) -> Result<(), DecodeError> {
        let mut buf = payload;
        while buf.has_remaining() {
            let offset = payload.len() - buf.remaining();
            let code = buf.get_u8();
            let tag = Tag::from_primitive(code);
            if let Some(needed) = tag.value_len() {
                ensure_remaining(buf, code, needed)?;
            }
            match tag {
                Tag::PoorSignal => self.reading.signal_quality = buf.get_u8(),
                Tag::Attention => self.reading.attention = buf.get_u8(),
                Tag::Meditation => self.reading.meditation = buf.get_u8(),
                Tag::AsicEegPower => {
                    self.reading.eeg_power = read_eeg_power(&mut buf);
                    self.reading.has_power = true;
                }
                Tag::Unknown(tag) => return Err(DecodeError::UnrecognizedTag { tag, offset }),
            }
        }
        Ok(())
    }
}

fn ensure_remaining(buf: &[u8], tag: u8, needed: usize) -> Result<(), DecodeError> {
    if buf.remaining() < needed {
        return Err(DecodeError::TruncatedPayload {
            tag,
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}

/// Reads a length byte and eight band powers; the caller has checked the block fits.
fn read_eeg_power(buf: &mut &[u8]) -> EegPower {
    // The length byte is not trusted, the block size is fixed.
    let declared = buf.get_u8();
    if declared != EEG_POWER_LENGTH {
        trace!(declared, "Unusual EEG power length byte");
    }

    let mut values = [0u32; EEG_POWER_BANDS];
    for value in values.iter_mut() {
        *value = buf.get_uint(EEG_POWER_VALUE_SIZE) as u32;
    }
    EegPower::new(values)
}
