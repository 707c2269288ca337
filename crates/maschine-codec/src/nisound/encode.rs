//! NISound payload encoder.

use maschine_meta::{DeviceType, MetadataRecord};

use super::layout::{device_flag, BLOCK_A, BLOCK_B, BLOCK_C, BLOCK_D, NISOUND_TAG, PLUGIN_VERSION};
use crate::category::flatten_categories;
use crate::error::CodecResult;
use crate::geob::{build_geob_frame, soundinfo_header};

/// Fixed property list written after the categories.
pub fn properties_for(device_type: DeviceType) -> [(&'static str, &'static str); 7] {
    let device_type_flags = match device_type {
        DeviceType::Loop => "8",
        DeviceType::OneShot => "4",
    };
    [
        ("color", "0"),
        ("devicetypeflags", device_type_flags),
        ("soundtype", "0"),
        ("tempo", "0"),
        ("verl", PLUGIN_VERSION),
        ("verm", PLUGIN_VERSION),
        ("visib", "0"),
    ]
}

/// Encodes the NISound payload for a record.
pub fn encode_nisound_payload(record: &MetadataRecord) -> Vec<u8> {
    let device_type = record.device_type();
    let categories = flatten_categories(&record.modes, &record.types);

    let mut w = soundinfo_header(NISOUND_TAG);
    w.push_bytes(BLOCK_A.bytes)
        .push_ucs2_string(record.name_or_empty())
        .push_ucs2_string(&record.author)
        .push_ucs2_string(&record.vendor)
        .push_ucs2_string(record.comment.as_deref().unwrap_or_default())
        .push_bytes(BLOCK_B.bytes)
        .push_u32_le(device_flag(device_type))
        .push_bytes(BLOCK_C.bytes)
        .push_ucs2_string_array(&record.bankchain)
        .push_ucs2_string_array(&categories)
        .push_bytes(BLOCK_D.bytes)
        .push_key_value_pairs(&properties_for(device_type));
    w.into_inner()
}

/// Builds the NISound GEOB frame for a record.
pub fn build_nisound_frame(record: &MetadataRecord) -> CodecResult<Vec<u8>> {
    build_geob_frame(&encode_nisound_payload(record))
}
