//! NISound payload decoder.

use maschine_meta::DeviceType;
use serde::Serialize;

use super::layout::{
    OpaqueBlock, BLOCK_A, BLOCK_B, BLOCK_C, BLOCK_D, DEVICE_FLAG_LOOP, DEVICE_FLAG_ONESHOT,
    NISOUND_TAG,
};
use crate::bytes::ByteReader;
use crate::error::{CodecError, CodecResult, CompatibilityWarning};
use crate::geob::{Id3Frame, SOUNDINFO_PREFIX};

/// A decoded NISound soundinfo record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NiSoundInfo {
    /// Sample name.
    pub name: String,
    /// Author name.
    pub author: String,
    /// Vendor name.
    pub vendor: String,
    /// Comment.
    pub comment: String,
    /// Raw device flag (4 = loop, 3 = one-shot).
    pub device_flag: u32,
    /// Bank chain.
    pub bankchain: Vec<String>,
    /// Flattened mode and type paths.
    pub categories: Vec<String>,
    /// Properties with the key prefix removed.
    pub properties: Vec<(String, String)>,
    /// Bytes after the property list.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trailing: Vec<u8>,
    /// Opaque blocks that did not match.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CompatibilityWarning>,
}

impl NiSoundInfo {
    /// Device type implied by the flag, if recognised.
    pub fn device_type(&self) -> Option<DeviceType> {
        match self.device_flag {
            DEVICE_FLAG_LOOP => Some(DeviceType::Loop),
            DEVICE_FLAG_ONESHOT => Some(DeviceType::OneShot),
            _ => None,
        }
    }

    /// Looks up a property value.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Returns true if `frame` carries an NISound soundinfo payload.
pub fn is_nisound_frame(frame: &Id3Frame) -> bool {
    frame.carries_soundinfo(NISOUND_TAG)
}

/// Decodes an NISound GEOB frame.
pub fn decode_nisound(frame: &Id3Frame) -> CodecResult<NiSoundInfo> {
    if !is_nisound_frame(frame) {
        return Err(CodecError::format("frame is not an NISound soundinfo frame"));
    }
    decode_nisound_payload(&frame.payload)
}

/// Decodes an NISound payload, starting after the prefix and tag string.
pub fn decode_nisound_payload(payload: &[u8]) -> CodecResult<NiSoundInfo> {
    let mut decoder = Decoder {
        reader: ByteReader::at(payload, SOUNDINFO_PREFIX.len() + NISOUND_TAG.len()),
        warnings: Vec::new(),
    };
    decoder.decode()
}

struct Decoder<'a> {
    reader: ByteReader<'a>,
    warnings: Vec<CompatibilityWarning>,
}

impl Decoder<'_> {
    fn decode(&mut self) -> CodecResult<NiSoundInfo> {
        self.expect_block(&BLOCK_A)?;
        let name = self.reader.read_ucs2_string()?;
        let author = self.reader.read_ucs2_string()?;
        let vendor = self.reader.read_ucs2_string()?;
        let comment = self.reader.read_ucs2_string()?;
        self.expect_block(&BLOCK_B)?;
        let device_flag = self.reader.read_u32_le("device flag")?;
        self.expect_block(&BLOCK_C)?;
        let bankchain = self.reader.read_ucs2_string_array()?;
        let categories = self.reader.read_ucs2_string_array()?;
        self.expect_block(&BLOCK_D)?;
        let properties = self.reader.read_key_value_pairs()?;
        let trailing = self.reader.take_rest().to_vec();

        Ok(NiSoundInfo {
            name,
            author,
            vendor,
            comment,
            device_flag,
            bankchain,
            categories,
            properties,
            trailing,
            warnings: std::mem::take(&mut self.warnings),
        })
    }

    fn expect_block(&mut self, block: &OpaqueBlock) -> CodecResult<()> {
        let offset = self.reader.position();
        let found = self.reader.take(block.name, block.bytes.len())?;
        if found != block.bytes {
            let warning = CompatibilityWarning {
                block: block.name,
                offset,
                expected: hex::encode(block.bytes),
                found: hex::encode(found),
            };
            tracing::warn!("{}", warning);
            self.warnings.push(warning);
        }
        Ok(())
    }
}
