//! ID3v2.4 GEOB frame codec.
//!
//! Only the frame shape used by the soundinfo tags is supported: a 4-byte id,
//! a syncsafe payload size, two zero flag bytes and the payload.

use crate::bytes::{ByteReader, ByteWriter};
use crate::error::CodecResult;
use crate::riff::FourCc;

/// Length of an ID3v2.4 frame header.
pub const FRAME_HEADER_LEN: usize = 10;

/// Three bytes preceding the tag string of every soundinfo payload.
pub const SOUNDINFO_PREFIX: [u8; 3] = [0x00, 0x00, 0x00];

/// A decoded ID3 frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3Frame {
    /// Frame id.
    pub id: FourCc,
    /// Frame flag bytes.
    pub flags: [u8; 2],
    /// Frame payload.
    pub payload: Vec<u8>,
}

impl Id3Frame {
    /// Creates a GEOB frame with zero flags.
    pub fn geob(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id: FourCc::GEOB,
            flags: [0, 0],
            payload: payload.into(),
        }
    }

    /// Returns true for GEOB frames.
    pub fn is_geob(&self) -> bool {
        self.id == FourCc::GEOB
    }

    /// Encodes header and payload.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut w = ByteWriter::with_capacity(FRAME_HEADER_LEN + self.payload.len());
        w.push_bytes(self.id.as_bytes());
        w.push_syncsafe_len(self.payload.len())?;
        w.push_bytes(&self.flags).push_bytes(&self.payload);
        Ok(w.into_inner())
    }

    /// Returns true if the payload is a soundinfo payload carrying `tag`.
    pub fn carries_soundinfo(&self, tag: &[u8]) -> bool {
        self.is_geob()
            && self.payload.len() > SOUNDINFO_PREFIX.len() + tag.len()
            && self.payload[SOUNDINFO_PREFIX.len()..].starts_with(tag)
    }
}

/// Wraps `payload` in a GEOB frame header.
pub fn build_geob_frame(payload: &[u8]) -> CodecResult<Vec<u8>> {
    let mut w = ByteWriter::with_capacity(FRAME_HEADER_LEN + payload.len());
    w.push_bytes(FourCc::GEOB.as_bytes());
    w.push_syncsafe_len(payload.len())?;
    w.push_bytes(&[0x00, 0x00]).push_bytes(payload);
    Ok(w.into_inner())
}

/// Builds a soundinfo payload header: the zero prefix followed by `tag`.
pub(crate) fn soundinfo_header(tag: &[u8]) -> ByteWriter {
    let mut w = ByteWriter::new();
    w.push_bytes(&SOUNDINFO_PREFIX).push_bytes(tag);
    w
}

/// Reads one frame at the reader's cursor.
pub fn read_frame(reader: &mut ByteReader<'_>) -> CodecResult<Id3Frame> {
    let id = FourCc::new(reader.take_array("frame header")?);
    let size = reader.read_syncsafe("frame header")? as usize;
    let flags = reader.take_array("frame header")?;
    let payload = reader.take("frame payload", size)?.to_vec();
    Ok(Id3Frame { id, flags, payload })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_geob_frame_header() {
        let frame = build_geob_frame(&[0xAA; 200]).unwrap();
        assert_eq!(&frame[0..4], b"GEOB");
        // 200 = 1 * 128 + 72
        assert_eq!(&frame[4..8], &[0, 0, 1, 72]);
        assert_eq!(&frame[8..10], &[0, 0]);
        assert_eq!(frame.len(), 210);
    }

    #[test]
    fn test_read_frame_round_trip() {
        let bytes = build_geob_frame(b"hello").unwrap();
        let mut reader = ByteReader::new(&bytes);
        let frame = read_frame(&mut reader).unwrap();
        assert_eq!(frame, Id3Frame::geob(b"hello".to_vec()));
        assert!(reader.is_empty());
        assert_eq!(frame.encode().unwrap(), bytes);
    }

    #[test]
    fn test_read_frame_size_past_end() {
        let mut bytes = build_geob_frame(b"hello").unwrap();
        bytes.truncate(12);
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            read_frame(&mut reader),
            Err(CodecError::Truncated {
                what: "frame payload",
                needed: 5,
                available: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_carries_soundinfo() {
        let mut payload = soundinfo_header(b"com.example.tag\0");
        payload.push_bytes(&[1, 2, 3]);
        let frame = Id3Frame::geob(payload.into_inner());
        assert!(frame.carries_soundinfo(b"com.example.tag\0"));
        assert!(!frame.carries_soundinfo(b"com.example.other\0"));

        // Tag with nothing after it is not a soundinfo payload
        let bare = Id3Frame::geob(soundinfo_header(b"com.example.tag\0").into_inner());
        assert!(!bare.carries_soundinfo(b"com.example.tag\0"));
    }
}
