//! NKS soundinfo record codec.
//!
//! The record is a MessagePack map built from a fixed default template; keys
//! are written in template order regardless of how the metadata was supplied.

use maschine_meta::MetadataRecord;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CodecError, CodecResult};
use crate::geob::{build_geob_frame, soundinfo_header, Id3Frame, SOUNDINFO_PREFIX};

/// Tag string identifying an NKS soundinfo payload.
pub const NKS_TAG: &[u8] = b"com.native-instruments.nks.soundinfo\0";

/// Separator used when the bank chain is stored as a single value.
///
/// Files written by the sampler itself carry a list, so no separator is
/// defined by the format; `,` is this crate's choice and is split on when
/// a joined value is decoded.
pub const BANKCHAIN_SEPARATOR: &str = ",";

/// Internal bookkeeping map of the NKS record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NiInternal {
    /// Origin of the record.
    pub source: String,
}

impl Default for NiInternal {
    fn default() -> Self {
        Self {
            source: "other".to_string(),
        }
    }
}

/// Bank chain as stored in the NKS map.
///
/// Records written by this crate carry a single joined value; records written
/// by the vendor application carry a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bankchain {
    /// Banks joined into one string.
    Joined(String),
    /// One entry per bank.
    List(Vec<String>),
}

impl Bankchain {
    /// Returns the banks as a list, splitting a joined value.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Bankchain::Joined(s) if s.is_empty() => Vec::new(),
            Bankchain::Joined(s) => s.split(BANKCHAIN_SEPARATOR).map(str::to_string).collect(),
            Bankchain::List(items) => items.clone(),
        }
    }
}

impl Default for Bankchain {
    fn default() -> Self {
        Bankchain::Joined(String::new())
    }
}

/// The NKS soundinfo map. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NksSoundInfo {
    /// Internal bookkeeping.
    #[serde(rename = "__ni_internal")]
    pub ni_internal: NiInternal,
    /// Author name.
    pub author: String,
    /// Bank chain.
    pub bankchain: Bankchain,
    /// Comment.
    pub comment: String,
    /// "LOOP" or "ONESHOT".
    #[serde(rename = "deviceType")]
    pub device_type: String,
    /// Mode tags.
    pub modes: Vec<String>,
    /// Sample name.
    pub name: String,
    /// Tempo in BPM; 0 when unknown.
    #[serde(serialize_with = "serialize_tempo")]
    pub tempo: f64,
    /// Type taxonomy paths.
    pub types: Vec<Vec<String>>,
    /// Vendor name.
    pub vendor: String,
}

impl Default for NksSoundInfo {
    fn default() -> Self {
        Self {
            ni_internal: NiInternal::default(),
            author: String::new(),
            bankchain: Bankchain::default(),
            comment: String::new(),
            device_type: "ONESHOT".to_string(),
            modes: Vec::new(),
            name: String::new(),
            tempo: 0.0,
            types: Vec::new(),
            vendor: String::new(),
        }
    }
}

impl NksSoundInfo {
    /// Overlays the properties present in `record` on the default template.
    pub fn from_record(record: &MetadataRecord) -> Self {
        let mut info = Self::default();

        if let Some(ref name) = record.name {
            info.name = name.clone();
        }
        info.author = record.author.clone();
        info.vendor = record.vendor.clone();
        if let Some(ref comment) = record.comment {
            info.comment = comment.clone();
        }
        if let Some(device_type) = record.device_type {
            info.device_type = device_type.as_str().to_string();
        }
        if !record.bankchain.is_empty() {
            info.bankchain = Bankchain::Joined(record.bankchain.join(BANKCHAIN_SEPARATOR));
        }
        info.modes = record.modes.clone();
        if let Some(tempo) = record.tempo {
            info.tempo = tempo;
        }
        info.types = record
            .types
            .iter()
            .map(|path| path.segments().to_vec())
            .collect();

        info
    }
}

/// Integral tempos are written as MessagePack integers, others as float64.
fn serialize_tempo<S: Serializer>(tempo: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if tempo.fract() == 0.0 && tempo.abs() <= MAX_EXACT {
        serializer.serialize_i64(*tempo as i64)
    } else {
        serializer.serialize_f64(*tempo)
    }
}

/// Encodes the NKS payload: prefix, tag string, MessagePack map.
pub fn encode_nks_payload(info: &NksSoundInfo) -> CodecResult<Vec<u8>> {
    let map = rmp_serde::to_vec_named(info)?;
    let mut w = soundinfo_header(NKS_TAG);
    w.push_bytes(&map);
    Ok(w.into_inner())
}

/// Builds the NKS GEOB frame for a record.
pub fn build_nks_frame(record: &MetadataRecord) -> CodecResult<Vec<u8>> {
    let payload = encode_nks_payload(&NksSoundInfo::from_record(record))?;
    build_geob_frame(&payload)
}

/// Returns true if `frame` carries an NKS soundinfo payload.
pub fn is_nks_frame(frame: &Id3Frame) -> bool {
    frame.carries_soundinfo(NKS_TAG)
}

/// Decodes the MessagePack map of an NKS soundinfo frame.
pub fn decode_nks(frame: &Id3Frame) -> CodecResult<NksSoundInfo> {
    if !is_nks_frame(frame) {
        return Err(CodecError::format("frame is not an NKS soundinfo frame"));
    }
    let map = &frame.payload[SOUNDINFO_PREFIX.len() + NKS_TAG.len()..];
    Ok(rmp_serde::from_slice(map)?)
}
