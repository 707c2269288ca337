//! Reading soundinfo back out of tagged WAV files.

use serde::Serialize;

use crate::error::CodecResult;
use crate::id3::Id3Tag;
use crate::nisound::{decode_nisound, is_nisound_frame, NiSoundInfo};
use crate::nks::{decode_nks, is_nks_frame, NksSoundInfo};
use crate::riff::{FourCc, RiffReader};

/// Soundinfo decoded from an `ID3 ` chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SoundInfo {
    /// Decoded NKS map, if the tag carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nks: Option<NksSoundInfo>,
    /// Decoded NISound record, if the tag carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nisound: Option<NiSoundInfo>,
}

impl SoundInfo {
    /// Returns true if neither frame was found.
    pub fn is_empty(&self) -> bool {
        self.nks.is_none() && self.nisound.is_none()
    }

    /// Number of compatibility warnings raised while decoding.
    pub fn warning_count(&self) -> usize {
        self.nisound.as_ref().map_or(0, |info| info.warnings.len())
    }
}

/// Decodes the soundinfo frames of a parsed tag.
pub fn decode_soundinfo(tag: &Id3Tag) -> CodecResult<SoundInfo> {
    let nks = tag.find_frame(is_nks_frame).map(decode_nks).transpose()?;
    let nisound = tag
        .find_frame(is_nisound_frame)
        .map(decode_nisound)
        .transpose()?;
    Ok(SoundInfo { nks, nisound })
}

/// Decodes the soundinfo of a RIFF/WAVE buffer.
///
/// Returns `Ok(None)` when the file has no `ID3 ` chunk.
pub fn inspect_wav(bytes: &[u8]) -> CodecResult<Option<SoundInfo>> {
    for chunk in RiffReader::new(bytes, FourCc::WAVE)? {
        let chunk = chunk?;
        if chunk.id == FourCc::ID3 {
            let tag = Id3Tag::parse(chunk.payload)?;
            return decode_soundinfo(&tag).map(Some);
        }
    }
    Ok(None)
}
