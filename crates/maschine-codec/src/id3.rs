//! ID3v2.4 tag assembly and parsing.
//!
//! The tag written into the `ID3 ` chunk holds exactly two GEOB frames,
//! NISound first and NKS second, followed by 1024 bytes of zero padding.
//! The sampler relies on both the frame order and the padding size.

use maschine_meta::MetadataRecord;

use crate::bytes::{ByteReader, ByteWriter};
use crate::error::{CodecError, CodecResult};
use crate::geob::{read_frame, Id3Frame};
use crate::nisound::build_nisound_frame;
use crate::nks::build_nks_frame;

/// ID3 tag magic.
pub const ID3_MAGIC: &[u8; 3] = b"ID3";

/// Version bytes for ID3v2.4.0.
pub const ID3_VERSION: [u8; 2] = [0x04, 0x00];

/// Length of the tag header.
pub const ID3_HEADER_LEN: usize = 10;

/// Zero padding appended after the frames.
pub const ID3_PADDING_LEN: usize = 1024;

/// Builds the payload of the `ID3 ` chunk for a record.
pub fn build_id3_chunk(record: &MetadataRecord) -> CodecResult<Vec<u8>> {
    let nks_frame = build_nks_frame(record)?;
    let nisound_frame = build_nisound_frame(record)?;
    assemble_tag(&[&nisound_frame, &nks_frame])
}

/// Concatenates header, encoded frames (in the given order) and padding.
pub fn assemble_tag(frames: &[&[u8]]) -> CodecResult<Vec<u8>> {
    let frames_len: usize = frames.iter().map(|f| f.len()).sum();
    let size = frames_len + ID3_PADDING_LEN;

    let mut w = ByteWriter::with_capacity(ID3_HEADER_LEN + size);
    w.push_bytes(ID3_MAGIC)
        .push_bytes(&ID3_VERSION)
        .push_u8(0x00);
    w.push_syncsafe_len(size)?;
    for frame in frames {
        w.push_bytes(frame);
    }
    w.push_zeros(ID3_PADDING_LEN);

    tracing::debug!(
        frames = frames.len(),
        tag_size = size,
        "assembled ID3 tag"
    );
    Ok(w.into_inner())
}

/// A parsed ID3 tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3Tag {
    /// Major and revision version bytes.
    pub version: [u8; 2],
    /// Header flags.
    pub flags: u8,
    /// Declared size of everything after the header.
    pub size: u32,
    /// Frames in tag order.
    pub frames: Vec<Id3Frame>,
    /// Bytes of padding after the last frame.
    pub padding: usize,
}

impl Id3Tag {
    /// Parses a tag from the start of `bytes`.
    ///
    /// Frames are read until the declared size is consumed or a zero byte
    /// marks the start of the padding. Non-zero bytes too short to hold a
    /// frame header are a `Truncated` error.
    pub fn parse(bytes: &[u8]) -> CodecResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let magic: [u8; 3] = reader.take_array("ID3 header")?;
        if &magic != ID3_MAGIC {
            return Err(CodecError::format(format!(
                "not an ID3 tag: magic is {:?}",
                String::from_utf8_lossy(&magic)
            )));
        }
        let version = reader.take_array("ID3 header")?;
        let [flags] = reader.take_array("ID3 header")?;
        let size = reader.read_syncsafe("ID3 header")?;
        let body = reader.take("ID3 body", size as usize)?;

        let mut body_reader = ByteReader::new(body);
        let mut frames = Vec::new();
        while body_reader.peek_u8().is_some_and(|b| b != 0) {
            let frame = read_frame(&mut body_reader)?;
            tracing::debug!(id = %frame.id, size = frame.payload.len(), "read ID3 frame");
            frames.push(frame);
        }

        let padding_offset = ID3_HEADER_LEN + body_reader.position();
        let padding = body_reader.take_rest();
        if let Some(pos) = padding.iter().position(|&b| b != 0) {
            tracing::warn!(
                offset = padding_offset + pos,
                "non-zero byte in ID3 padding"
            );
        }

        Ok(Self {
            version,
            flags,
            size,
            frames,
            padding: padding.len(),
        })
    }

    /// Returns the first frame matching `predicate`.
    pub fn find_frame(&self, predicate: impl Fn(&Id3Frame) -> bool) -> Option<&Id3Frame> {
        self.frames.iter().find(|frame| predicate(frame))
    }
}
