// Protocol constants for ThinkGear-style headset streams

/// Value of each of the two sync bytes that open a frame
pub const SYNC_BYTE: u8 = 0xAA;

/// Largest payload length accepted by the frame assembler
pub const MAX_PACKET_LENGTH: usize = 32;

/// Number of EEG band power values carried by an `0x83` field
pub const EEG_POWER_BANDS: usize = 8;

/// Width of a single band power value on the wire (24-bit big-endian)
pub const EEG_POWER_VALUE_SIZE: usize = 3;

/// Conventional value of the `0x83` length byte (8 × 3 bytes)
pub const EEG_POWER_LENGTH: u8 = (EEG_POWER_BANDS * EEG_POWER_VALUE_SIZE) as u8;

/// Signal quality reported before any packet arrives (no electrode contact)
pub const NO_CONTACT_SIGNAL_QUALITY: u8 = 200;

/// Largest value a 24-bit band power can hold
pub const MAX_BAND_POWER: u32 = (1 << 24) - 1;
