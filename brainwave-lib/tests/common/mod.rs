//! Common test utilities and shared imports

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use brainwave_lib::error::{BrainError, DecodeError};
#[allow(unused_imports)]
pub use brainwave_lib::packet::{PayloadBuilder, checksum, encode_frame};
#[allow(unused_imports)]
pub use brainwave_lib::reading::{DecodedReading, EegBand, EegPower};
#[allow(unused_imports)]
pub use brainwave_lib::stream::{StepResult, StreamDecoder};
#[allow(unused_imports)]
pub use bytes::Bytes;

/// Decode hex string to bytes for testing
#[allow(dead_code)]
pub fn hex_to_bytes(hex_data: &str) -> Bytes {
    Bytes::from(hex::decode(hex_data).expect("Failed to decode hex"))
}

/// Wrap a payload in sync, length and checksum bytes
#[allow(dead_code)]
pub fn frame(payload: &[u8]) -> Vec<u8> {
    encode_frame(payload).expect("Payload too long").to_vec()
}

/// Once-per-second style frame: poor signal 0, attention 0x35, meditation 0x30, band powers
#[allow(dead_code)]
pub const POWER_FRAME: &str = "aaaa2002008318000f5b00095e0003170001d90001a50000c200006d00004b043505300f";

/// Payload of [`POWER_FRAME`]
#[allow(dead_code)]
pub const POWER_PAYLOAD: &str = "02008318000f5b00095e0003170001d90001a50000c200006d00004b04350530";

/// Frame sent while the headset is off the head
#[allow(dead_code)]
pub const NO_CONTACT_FRAME: &str = "aaaa0402c8040031";
