//! Generic RIFF chunk reader and writer.
//!
//! A RIFF file is a 12-byte header (`RIFF`, u32 LE size, form type) followed
//! by chunks. Each chunk is a 4-byte id, a u32 LE payload length and the
//! payload, plus one zero pad byte when the length is odd. The pad byte is not
//! counted in the declared length.

use std::fmt;
use std::str::FromStr;

use crate::bytes::{ByteReader, ByteWriter};
use crate::error::{CodecError, CodecResult};

/// Length of the RIFF file header.
pub const RIFF_HEADER_LEN: usize = 12;

/// Length of a chunk header (id + size).
pub const CHUNK_HEADER_LEN: usize = 8;

/// A four character code.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc([u8; 4]);

impl FourCc {
    /// `RIFF` magic.
    pub const RIFF: FourCc = FourCc(*b"RIFF");
    /// `WAVE` form type.
    pub const WAVE: FourCc = FourCc(*b"WAVE");
    /// WAVE format chunk.
    pub const FMT: FourCc = FourCc(*b"fmt ");
    /// WAVE sample data chunk.
    pub const DATA: FourCc = FourCc(*b"data");
    /// Chunk carrying an ID3v2 tag.
    pub const ID3: FourCc = FourCc(*b"ID3 ");
    /// ID3v2 general encapsulated object frame.
    pub const GEOB: FourCc = FourCc(*b"GEOB");

    /// Creates a code from raw bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl FromStr for FourCc {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() {
            return Err(CodecError::format(format!(
                "id must be an ASCII string. id:{:?}",
                s
            )));
        }
        let bytes: [u8; 4] = s.as_bytes().try_into().map_err(|_| {
            CodecError::format(format!("id must be 4 characters string. id:{:?}", s))
        })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<&str> for FourCc {
    type Error = CodecError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc({:?})", String::from_utf8_lossy(&self.0))
    }
}

/// An owned chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiffChunk {
    /// Chunk id.
    pub id: FourCc,
    /// Payload without the pad byte.
    pub payload: Vec<u8>,
}

impl RiffChunk {
    /// Creates a chunk.
    pub fn new(id: FourCc, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            payload: payload.into(),
        }
    }
}

/// A chunk borrowed from a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRef<'a> {
    /// Chunk id.
    pub id: FourCc,
    /// Payload without the pad byte.
    pub payload: &'a [u8],
    /// Offset of the chunk header in the source buffer.
    pub offset: usize,
}

impl ChunkRef<'_> {
    /// Copies the chunk out of the source buffer.
    pub fn to_chunk(&self) -> RiffChunk {
        RiffChunk::new(self.id, self.payload)
    }
}

/// RIFF container accumulator.
///
/// # Example
/// ```
/// use maschine_codec::riff::{FourCc, RiffBuilder};
///
/// let mut riff = RiffBuilder::new(FourCc::WAVE);
/// riff.push_chunk(FourCc::FMT, &[0u8; 16]).unwrap();
/// riff.push_chunk_str("data", &[1, 2, 3, 4, 5]).unwrap();
/// let wav = riff.finish().unwrap();
/// assert_eq!(wav.len(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct RiffBuilder {
    buf: ByteWriter,
}

impl RiffBuilder {
    /// Starts a container with the `RIFF` magic, a placeholder size and `form_type`.
    pub fn new(form_type: FourCc) -> Self {
        let mut buf = ByteWriter::with_capacity(RIFF_HEADER_LEN);
        buf.push_bytes(FourCc::RIFF.as_bytes())
            .push_u32_le(4)
            .push_bytes(form_type.as_bytes());
        Self { buf }
    }

    /// Appends a chunk, padding odd payloads to 16-bit alignment.
    pub fn push_chunk(&mut self, id: FourCc, payload: &[u8]) -> CodecResult<&mut Self> {
        self.buf.push_bytes(id.as_bytes());
        self.buf.push_len_u32("chunk length", payload.len())?;
        self.buf.push_bytes(payload);
        if payload.len() % 2 == 1 {
            self.buf.push_u8(0);
        }
        Ok(self)
    }

    /// Appends a chunk whose id is given as a string; the id must be exactly 4 bytes.
    pub fn push_chunk_str(&mut self, id: &str, payload: &[u8]) -> CodecResult<&mut Self> {
        let id: FourCc = id.parse()?;
        self.push_chunk(id, payload)
    }

    /// Current buffer length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Always false; the header is written on construction.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Patches the size field to `total length - 8` and returns the buffer.
    pub fn finish(mut self) -> CodecResult<Vec<u8>> {
        let size = u32::try_from(self.buf.len() - 8).map_err(|_| CodecError::Range {
            what: "RIFF size",
            value: (self.buf.len() - 8) as u64,
            max: u32::MAX as u64,
        })?;
        self.buf.patch_u32_le(4, size);
        Ok(self.buf.into_inner())
    }
}

/// Sequential chunk reader over a RIFF buffer.
///
/// Yields each chunk in file order; after the first error the iterator ends.
#[derive(Debug, Clone)]
pub struct RiffReader<'a> {
    reader: ByteReader<'a>,
    failed: bool,
}

impl<'a> RiffReader<'a> {
    /// Validates the RIFF header and form type and positions at the first chunk.
    pub fn new(buf: &'a [u8], form_type: FourCc) -> CodecResult<Self> {
        let mut reader = ByteReader::new(buf);
        let magic: [u8; 4] = reader.take_array("RIFF header")?;
        let _size = reader.read_u32_le("RIFF header")?;
        let form: [u8; 4] = reader.take_array("RIFF header")?;

        if FourCc(magic) != FourCc::RIFF {
            return Err(CodecError::format(format!(
                "not a RIFF file: magic is {}",
                FourCc(magic)
            )));
        }
        if FourCc(form) != form_type {
            return Err(CodecError::format(format!(
                "unexpected RIFF form type: expected {}, got {}",
                form_type,
                FourCc(form)
            )));
        }

        Ok(Self {
            reader,
            failed: false,
        })
    }

    fn read_chunk(&mut self) -> CodecResult<ChunkRef<'a>> {
        let offset = self.reader.position();
        let id = FourCc(self.reader.take_array("chunk header")?);
        let len = self.reader.read_u32_le("chunk header")? as usize;
        let payload = self.reader.take("chunk payload", len)?;
        if len % 2 == 1 {
            // A missing pad byte on the last chunk is tolerated.
            self.reader.skip(1);
        }
        Ok(ChunkRef {
            id,
            payload,
            offset,
        })
    }
}

impl<'a> Iterator for RiffReader<'a> {
    type Item = CodecResult<ChunkRef<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let chunk = self.read_chunk();
        if chunk.is_err() {
            self.failed = true;
        }
        Some(chunk)
    }
}

/// Reads every chunk of a RIFF buffer into owned chunks.
pub fn read_chunks(buf: &[u8], form_type: FourCc) -> CodecResult<Vec<RiffChunk>> {
    RiffReader::new(buf, form_type)?
        .map(|chunk| chunk.map(|c| c.to_chunk()))
        .collect()
}

/// Builds a complete RIFF buffer from chunks, in order.
pub fn write_chunks<'c, I>(form_type: FourCc, chunks: I) -> CodecResult<Vec<u8>>
where
    I: IntoIterator<Item = &'c RiffChunk>,
{
    let mut riff = RiffBuilder::new(form_type);
    for chunk in chunks {
        riff.push_chunk(chunk.id, &chunk.payload)?;
    }
    riff.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{ByteOrder, LittleEndian};
    use pretty_assertions::assert_eq;

    fn sample_wav() -> Vec<u8> {
        let mut riff = RiffBuilder::new(FourCc::WAVE);
        riff.push_chunk(FourCc::FMT, &[0u8; 16]).unwrap();
        riff.push_chunk(FourCc::DATA, &[1, 2, 3, 4, 5]).unwrap();
        riff.finish().unwrap()
    }

    #[test]
    fn test_build_fmt_and_odd_data_chunk() {
        let wav = sample_wav();
        assert_eq!(wav.len(), 12 + (8 + 16) + (8 + 5 + 1));
        assert_eq!(LittleEndian::read_u32(&wav[4..8]), 42);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        // Declared length excludes the pad byte
        assert_eq!(LittleEndian::read_u32(&wav[40..44]), 5);
        assert_eq!(wav[49], 0);
    }

    #[test]
    fn test_even_payload_has_no_padding() {
        let mut riff = RiffBuilder::new(FourCc::WAVE);
        riff.push_chunk(FourCc::DATA, &[9, 9]).unwrap();
        let wav = riff.finish().unwrap();
        assert_eq!(wav.len(), 12 + 8 + 2);
    }

    #[test]
    fn test_push_chunk_str_rejects_bad_ids() {
        let mut riff = RiffBuilder::new(FourCc::WAVE);
        assert!(matches!(
            riff.push_chunk_str("fmt", &[]),
            Err(CodecError::Format { .. })
        ));
        assert!(matches!(
            riff.push_chunk_str("LIST1", &[]),
            Err(CodecError::Format { .. })
        ));
        assert!(riff.push_chunk_str("LIST", &[]).is_ok());
    }

    #[test]
    fn test_read_round_trip() {
        let wav = sample_wav();
        let chunks = read_chunks(&wav, FourCc::WAVE).unwrap();
        assert_eq!(
            chunks,
            vec![
                RiffChunk::new(FourCc::FMT, vec![0u8; 16]),
                RiffChunk::new(FourCc::DATA, vec![1, 2, 3, 4, 5]),
            ]
        );
        assert_eq!(write_chunks(FourCc::WAVE, &chunks).unwrap(), wav);
    }

    #[test]
    fn test_reader_offsets() {
        let wav = sample_wav();
        let offsets: Vec<usize> = RiffReader::new(&wav, FourCc::WAVE)
            .unwrap()
            .map(|c| c.unwrap().offset)
            .collect();
        assert_eq!(offsets, vec![12, 36]);
    }

    #[test]
    fn test_read_rejects_wrong_magic_and_form() {
        let mut wav = sample_wav();
        assert!(matches!(
            read_chunks(&wav, FourCc::new(*b"AVI ")),
            Err(CodecError::Format { .. })
        ));
        wav[0..4].copy_from_slice(b"RIFX");
        assert!(matches!(
            read_chunks(&wav, FourCc::WAVE),
            Err(CodecError::Format { .. })
        ));
    }

    #[test]
    fn test_read_truncated_chunk() {
        let mut wav = sample_wav();
        // Claim the data chunk is 100 bytes long
        LittleEndian::write_u32(&mut wav[40..44], 100);
        let err = read_chunks(&wav, FourCc::WAVE).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Truncated {
                what: "chunk payload",
                ..
            }
        ));
    }

    #[test]
    fn test_read_short_header() {
        assert!(matches!(
            read_chunks(b"RIFF", FourCc::WAVE),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn test_reader_stops_after_error() {
        let mut wav = sample_wav();
        wav.extend_from_slice(b"junk");
        let results: Vec<_> = RiffReader::new(&wav, FourCc::WAVE).unwrap().collect();
        assert_eq!(results.len(), 3);
        assert!(results[2].is_err());
    }

    #[test]
    fn test_fourcc_display() {
        assert_eq!(FourCc::ID3.to_string(), "ID3 ");
        assert_eq!("data".parse::<FourCc>().unwrap(), FourCc::DATA);
    }
}
