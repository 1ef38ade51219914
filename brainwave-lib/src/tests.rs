use crate::constants::{MAX_PACKET_LENGTH, NO_CONTACT_SIGNAL_QUALITY};
use crate::decoder::PayloadDecoder;
use crate::error::DecodeError;
use crate::framer::{AssemblerState, FrameAssembler, FrameEvent};
use crate::packet::{FrameBuffer, PayloadBuilder, Tag, checksum, encode_frame};
use crate::reading::{DecodedReading, EegBand, EegPower};
use num_enum::FromPrimitive;

#[test]
fn test_checksum_is_ones_complement_of_sum() {
    assert_eq!(checksum(&[]), 0xFF);
    assert_eq!(checksum(&[0x02, 0xC8]), 255 - 0xCA);
    // Sum wraps past 255
    assert_eq!(checksum(&[0xFF, 0x02]), 255 - 0x01);
}

#[test]
fn test_tag_from_primitive() {
    assert_eq!(Tag::from_primitive(0x02), Tag::PoorSignal);
    assert_eq!(Tag::from_primitive(0x04), Tag::Attention);
    assert_eq!(Tag::from_primitive(0x05), Tag::Meditation);
    assert_eq!(Tag::from_primitive(0x83), Tag::AsicEegPower);
    assert_eq!(Tag::from_primitive(0x80), Tag::Unknown(0x80));
    assert_eq!(u8::from(Tag::AsicEegPower), 0x83);
    assert_eq!(Tag::AsicEegPower.value_len(), Some(25));
    assert_eq!(Tag::Unknown(0x16).value_len(), None);
}

#[test]
fn test_frame_buffer_rejects_oversized_length() {
    let mut buffer = FrameBuffer::new();
    assert_eq!(
        buffer.start(MAX_PACKET_LENGTH + 1),
        Err(DecodeError::PacketTooLong { length: 33 })
    );
    assert!(buffer.start(MAX_PACKET_LENGTH).is_ok());
}

#[test]
fn test_frame_buffer_ignores_bytes_past_declared_length() {
    let mut buffer = FrameBuffer::new();
    buffer.start(2).unwrap();
    buffer.push(0x10);
    buffer.push(0x20);
    buffer.push(0x30);
    assert!(buffer.is_complete());
    assert_eq!(buffer.payload(), &[0x10, 0x20]);
    assert_eq!(buffer.expected_checksum(), checksum(&[0x10, 0x20]));
}

#[test]
fn test_encode_frame_layout() {
    let frame = encode_frame(&[0x04, 0x32]).unwrap();
    assert_eq!(frame.as_ref(), &[0xAA, 0xAA, 0x02, 0x04, 0x32, 0xC9]);

    let too_long = [0u8; MAX_PACKET_LENGTH + 1];
    assert!(matches!(
        encode_frame(&too_long),
        Err(DecodeError::PacketTooLong { length: 33 })
    ));
}

#[test]
fn test_assembler_walks_through_states() {
    let mut assembler = FrameAssembler::new();
    assert_eq!(assembler.state(), AssemblerState::Idle);

    assert_eq!(assembler.submit_byte(0xAA), FrameEvent::Pending);
    assert_eq!(assembler.state(), AssemblerState::Idle);
    assert_eq!(assembler.submit_byte(0xAA), FrameEvent::Pending);
    assert_eq!(assembler.state(), AssemblerState::ReadingLength);
    assert_eq!(assembler.submit_byte(0x02), FrameEvent::Pending);
    assert_eq!(assembler.state(), AssemblerState::ReadingPayload);
    assert_eq!(assembler.submit_byte(0x04), FrameEvent::Pending);
    assert_eq!(assembler.submit_byte(0x32), FrameEvent::Pending);
    assert_eq!(assembler.state(), AssemblerState::ReadingChecksum);
    assert_eq!(assembler.submit_byte(0xC9), FrameEvent::Frame(&[0x04, 0x32]));
    assert_eq!(assembler.state(), AssemblerState::Idle);
}

#[test]
fn test_assembler_zero_length_frame() {
    let mut assembler = FrameAssembler::new();
    assembler.submit_byte(0xAA);
    assembler.submit_byte(0xAA);
    assembler.submit_byte(0x00);
    assert_eq!(assembler.state(), AssemblerState::ReadingChecksum);
    assert_eq!(assembler.submit_byte(0xFF), FrameEvent::Frame(&[]));
}

#[test]
fn test_assembler_treats_sync_bytes_inside_frame_as_data() {
    let payload = [0xAA, 0xAA, 0xAA];
    let frame = encode_frame(&payload).unwrap();
    let mut assembler = FrameAssembler::new();

    let (last, body) = frame.split_last().unwrap();
    for &b in body {
        assert_eq!(assembler.submit_byte(b), FrameEvent::Pending);
    }
    assert_eq!(assembler.submit_byte(*last), FrameEvent::Frame(&payload));
}

#[test]
fn test_assembler_checksum_mismatch() {
    let mut assembler = FrameAssembler::new();
    for b in [0xAA, 0xAA, 0x02, 0x04, 0x32] {
        assembler.submit_byte(b);
    }
    assert_eq!(
        assembler.submit_byte(0x00),
        FrameEvent::Rejected(DecodeError::ChecksumMismatch {
            expected: 0xC9,
            received: 0x00
        })
    );
    assert_eq!(assembler.state(), AssemblerState::Idle);
}

#[test]
fn test_assembler_reset_forgets_partial_frame() {
    let mut assembler = FrameAssembler::new();
    for b in [0xAA, 0xAA, 0x04, 0x02] {
        assembler.submit_byte(b);
    }
    assert_eq!(assembler.state(), AssemblerState::ReadingPayload);
    assembler.reset();
    assert_eq!(assembler.state(), AssemblerState::Idle);
    // The previous byte is forgotten too, so a single 0xAA is not a marker
    assert_eq!(assembler.submit_byte(0xAA), FrameEvent::Pending);
    assert_eq!(assembler.state(), AssemblerState::Idle);
}

#[test]
fn test_decoder_scalar_fields() {
    let mut decoder = PayloadDecoder::new();
    let reading = decoder.decode(&[0x02, 0x00, 0x04, 0x3C, 0x05, 0x28]).unwrap();
    assert_eq!(reading.signal_quality, 0);
    assert_eq!(reading.attention, 60);
    assert_eq!(reading.meditation, 40);
    assert!(!reading.has_power);
    assert!(reading.power().is_none());
}

#[test]
fn test_decoder_keeps_untouched_scalars() {
    let mut decoder = PayloadDecoder::new();
    decoder.decode(&[0x04, 0x3C, 0x05, 0x28]).unwrap();
    let reading = decoder.decode(&[0x04, 0x10]).unwrap();
    assert_eq!(reading.attention, 0x10);
    assert_eq!(reading.meditation, 40);
    assert_eq!(reading.signal_quality, NO_CONTACT_SIGNAL_QUALITY);
}

#[test]
fn test_decoder_empty_payload_clears_power_only() {
    let mut decoder = PayloadDecoder::new();
    let power = EegPower::new([9, 8, 7, 6, 5, 4, 3, 2]);
    let payload = PayloadBuilder::new().attention(77).eeg_power(&power).build();
    assert!(decoder.decode(&payload).unwrap().has_power);

    let reading = decoder.decode(&[]).unwrap();
    assert_eq!(reading.attention, 77);
    assert!(!reading.has_power);
    assert_eq!(reading.eeg_power, EegPower::default());
}

#[test]
fn test_decoder_truncated_scalar() {
    let mut decoder = PayloadDecoder::new();
    assert_eq!(
        decoder.decode(&[0x04, 0x20, 0x05]),
        Err(DecodeError::TruncatedPayload {
            tag: 0x05,
            needed: 1,
            available: 0
        })
    );
    assert_eq!(decoder.reading().attention, 0x20);
}

#[test]
fn test_decoder_truncated_power_block_commits_nothing() {
    let mut decoder = PayloadDecoder::new();
    let mut payload = vec![0x02, 0x00, 0x83, 0x18];
    payload.extend_from_slice(&[0x01; 12]);

    assert_eq!(
        decoder.decode(&payload),
        Err(DecodeError::TruncatedPayload {
            tag: 0x83,
            needed: 25,
            available: 13
        })
    );
    let reading = decoder.reading();
    assert_eq!(reading.signal_quality, 0);
    assert!(!reading.has_power);
    assert_eq!(reading.eeg_power, EegPower::default());
}

#[test]
fn test_decoder_rejects_raw_wave_tag() {
    let mut decoder = PayloadDecoder::new();
    assert_eq!(
        decoder.decode(&[0x04, 0x10, 0x80, 0x02, 0x01, 0xF4]),
        Err(DecodeError::UnrecognizedTag { tag: 0x80, offset: 2 })
    );
    assert_eq!(decoder.reading().attention, 0x10);
    // Nothing after the unknown tag is read as a field
    assert_eq!(decoder.reading().signal_quality, NO_CONTACT_SIGNAL_QUALITY);
}

#[test]
fn test_decoder_ignores_power_length_byte() {
    let mut decoder = PayloadDecoder::new();
    let mut payload = vec![0x83, 0x00];
    payload.extend((1..=24).map(|i| i as u8));
    let reading = decoder.decode(&payload).unwrap();
    assert!(reading.has_power);
    assert_eq!(reading.eeg_power.delta(), 0x010203);
    assert_eq!(reading.eeg_power.mid_gamma(), 0x161718);
}

#[test]
fn test_decoder_max_band_power() {
    let mut decoder = PayloadDecoder::new();
    let mut payload = vec![0x83, 0x18];
    payload.extend_from_slice(&[0xFF; 24]);
    let reading = decoder.decode(&payload).unwrap();
    assert!(reading.eeg_power.values().iter().all(|&v| v == 0x00FF_FFFF));
}

#[test]
fn test_band_accessors_follow_wire_order() {
    let power = EegPower::new([1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(power.delta(), 1);
    assert_eq!(power.theta(), 2);
    assert_eq!(power.low_alpha(), 3);
    assert_eq!(power.high_alpha(), 4);
    assert_eq!(power.low_beta(), 5);
    assert_eq!(power.high_beta(), 6);
    assert_eq!(power.low_gamma(), 7);
    assert_eq!(power.mid_gamma(), 8);
    assert_eq!(power[EegBand::HighBeta], 6);

    let names: Vec<String> = power.iter().map(|(band, _)| band.to_string()).collect();
    assert_eq!(
        names,
        [
            "Delta",
            "Theta",
            "Low Alpha",
            "High Alpha",
            "Low Beta",
            "High Beta",
            "Low Gamma",
            "Mid Gamma"
        ]
    );
}

#[test]
fn test_default_reading_has_no_contact() {
    let reading = DecodedReading::default();
    assert_eq!(reading.signal_quality, 200);
    assert!(!reading.has_contact());
    assert_eq!(reading.attention, 0);
    assert_eq!(reading.meditation, 0);
    assert!(!reading.has_power);
}

#[test]
fn test_payload_builder_truncates_to_24_bits() {
    let power = EegPower::new([0x0123_4567, 0, 0, 0, 0, 0, 0, 0]);
    let payload = PayloadBuilder::new().eeg_power(&power).build();
    assert_eq!(payload.len(), 26);
    assert_eq!(&payload[..5], &[0x83, 0x18, 0x23, 0x45, 0x67]);
}
