//! Tests for the NISound codec.

use byteorder::{ByteOrder, LittleEndian};
use maschine_meta::{CategoryPath, DeviceType, MetadataRecord};
use pretty_assertions::assert_eq;

use super::*;
use crate::bytes::{decode_syncsafe, ByteReader};
use crate::error::CodecError;
use crate::geob::{read_frame, Id3Frame};

fn loop_record() -> MetadataRecord {
    MetadataRecord::builder("Hogehoge")
        .author("Hehehe")
        .vendor("Hahaha")
        .comment("uniuni")
        .device_type(DeviceType::Loop)
        .bank("Fugafuga")
        .bank("Fugafuga 1.1 Library")
        .category(CategoryPath::new(["Bass", "Synth Bass"]).unwrap())
        .mode("Additive")
        .mode("Analog")
        .build()
}

fn utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

// =========================================================================
// Layout tests
// =========================================================================

#[test]
fn test_payload_starts_with_prefix_tag_and_block_a() {
    let payload = encode_nisound_payload(&loop_record());
    assert_eq!(&payload[0..3], &[0, 0, 0]);
    assert_eq!(&payload[3..3 + NISOUND_TAG.len()], NISOUND_TAG);

    let a = 3 + NISOUND_TAG.len();
    assert_eq!(
        &payload[a..a + 12],
        &[0x02, 0, 0, 0, 0x01, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn test_payload_strings_follow_block_a() {
    let payload = encode_nisound_payload(&loop_record());
    let mut pos = 3 + NISOUND_TAG.len() + BLOCK_A.bytes.len();

    for expected in ["Hogehoge", "Hehehe", "Hahaha", "uniuni"] {
        let units = LittleEndian::read_u32(&payload[pos..pos + 4]) as usize;
        assert_eq!(units, expected.len());
        pos += 4;
        assert_eq!(&payload[pos..pos + units * 2], utf16le(expected).as_slice());
        pos += units * 2;
    }

    assert_eq!(&payload[pos..pos + BLOCK_B.bytes.len()], BLOCK_B.bytes);
    pos += BLOCK_B.bytes.len();
    assert_eq!(LittleEndian::read_u32(&payload[pos..pos + 4]), 4);
    pos += 4;
    assert_eq!(&payload[pos..pos + 4], &[1, 0, 0, 0]);
}

#[test]
fn test_opaque_block_sizes() {
    assert_eq!(BLOCK_A.bytes.len(), 12);
    assert_eq!(BLOCK_B.bytes.len(), 28);
    assert_eq!(hex::encode(BLOCK_B.bytes), "00000000ffffffffffffffff00000000000000000000000000000000");
    assert_eq!(BLOCK_C.bytes.len(), 4);
    assert_eq!(BLOCK_D.bytes, &[0, 0, 0, 0]);
    assert_eq!(OPAQUE_BLOCKS.len(), 4);
}

#[test]
fn test_absent_comment_writes_zero_length() {
    let record = MetadataRecord::builder("x").build();
    let payload = encode_nisound_payload(&record);
    // name "x" (4 + 2), author/vendor/comment empty (4 each)
    let start = 3 + NISOUND_TAG.len() + BLOCK_A.bytes.len();
    assert_eq!(&payload[start..start + 6], &[1, 0, 0, 0, b'x', 0]);
    assert_eq!(&payload[start + 6..start + 18], &[0; 12]);
}

// =========================================================================
// Device type tests
// =========================================================================

#[test]
fn test_loop_flags() {
    let info = decode_nisound_payload(&encode_nisound_payload(&loop_record())).unwrap();
    assert_eq!(info.device_flag, DEVICE_FLAG_LOOP);
    assert_eq!(info.device_type(), Some(DeviceType::Loop));
    assert_eq!(info.property("devicetypeflags"), Some("8"));
}

#[test]
fn test_oneshot_and_absent_device_type_flags() {
    let explicit = MetadataRecord::builder("x")
        .device_type(DeviceType::OneShot)
        .build();
    let absent = MetadataRecord::builder("x").build();

    for record in [explicit, absent] {
        let info = decode_nisound_payload(&encode_nisound_payload(&record)).unwrap();
        assert_eq!(info.device_flag, DEVICE_FLAG_ONESHOT);
        assert_eq!(info.property("devicetypeflags"), Some("4"));
    }
}

#[test]
fn test_properties_order() {
    let keys: Vec<&str> = properties_for(DeviceType::OneShot)
        .iter()
        .map(|(k, _)| *k)
        .collect();
    assert_eq!(
        keys,
        vec!["color", "devicetypeflags", "soundtype", "tempo", "verl", "verm", "visib"]
    );
    assert_eq!(device_flag(DeviceType::Loop), 4);
    assert_eq!(device_flag(DeviceType::OneShot), 3);
}

// =========================================================================
// Decode tests
// =========================================================================

#[test]
fn test_frame_round_trip() {
    let bytes = build_nisound_frame(&loop_record()).unwrap();
    let declared = decode_syncsafe(bytes[4..8].try_into().unwrap()) as usize;
    assert_eq!(declared, bytes.len() - 10);

    let frame = read_frame(&mut ByteReader::new(&bytes)).unwrap();
    assert!(is_nisound_frame(&frame));

    let info = decode_nisound(&frame).unwrap();
    assert_eq!(info.name, "Hogehoge");
    assert_eq!(info.author, "Hehehe");
    assert_eq!(info.vendor, "Hahaha");
    assert_eq!(info.comment, "uniuni");
    assert_eq!(info.bankchain, vec!["Fugafuga", "Fugafuga 1.1 Library"]);
    assert_eq!(
        info.categories,
        vec!["\\.Additive", "\\.Analog", "\\:Bass", "\\:Bass\\:Synth Bass"]
    );
    assert_eq!(info.property("verl"), Some("1.7.14"));
    assert_eq!(info.properties.len(), 7);
    assert!(info.trailing.is_empty());
    assert!(info.warnings.is_empty());
}

#[test]
fn test_mismatched_block_warns_and_continues() {
    let mut payload = encode_nisound_payload(&loop_record());
    let a = 3 + NISOUND_TAG.len();
    payload[a] = 0x03;

    let info = decode_nisound_payload(&payload).unwrap();
    assert_eq!(info.name, "Hogehoge");
    assert_eq!(info.warnings.len(), 1);
    assert_eq!(info.warnings[0].block, "block_a");
    assert_eq!(info.warnings[0].offset, a);
    assert_eq!(info.warnings[0].expected, "020000000100000000000000");
    assert_eq!(info.warnings[0].found, "030000000100000000000000");
}

#[test]
fn test_trailing_bytes_are_kept() {
    let mut payload = encode_nisound_payload(&loop_record());
    payload.extend_from_slice(&[0xde, 0xad]);
    let info = decode_nisound_payload(&payload).unwrap();
    assert_eq!(info.trailing, vec![0xde, 0xad]);
}

#[test]
fn test_truncated_payload_fails() {
    let payload = encode_nisound_payload(&loop_record());
    let cut = &payload[..payload.len() - 3];
    assert!(matches!(
        decode_nisound_payload(cut),
        Err(CodecError::Truncated { .. })
    ));
}

#[test]
fn test_decode_rejects_nks_frame() {
    let frame = Id3Frame::geob(b"\0\0\0com.native-instruments.nks.soundinfo\0\x80".to_vec());
    assert!(!is_nisound_frame(&frame));
    assert!(matches!(
        decode_nisound(&frame),
        Err(CodecError::Format { .. })
    ));
}

#[test]
fn test_unicode_fields_round_trip() {
    let record = MetadataRecord::builder("Kick \u{1F941} ドラム")
        .author("Zoë")
        .build();
    let info = decode_nisound_payload(&encode_nisound_payload(&record)).unwrap();
    assert_eq!(info.name, "Kick \u{1F941} ドラム");
    assert_eq!(info.author, "Zoë");
}
