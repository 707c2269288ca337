//! Integer and UTF-16 string primitives shared by the frame builders.
//!
//! [`ByteWriter`] appends to an owned buffer; [`ByteReader`] owns a read cursor
//! over a borrowed slice. Every decoder creates its own reader, so concurrent
//! decodes never share a position.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{CodecError, CodecResult};

/// Largest value a 28-bit syncsafe integer can hold.
pub const SYNCSAFE_MAX: u32 = (1 << 28) - 1;

/// Prefix written before each key of a key/value pair.
pub const KEY_PREFIX: &str = "\\@";

/// Encodes `n` as a 4-byte syncsafe integer (7 bits per byte, MSB first).
pub fn encode_syncsafe(n: u32) -> CodecResult<[u8; 4]> {
    if n > SYNCSAFE_MAX {
        return Err(CodecError::Range {
            what: "syncsafe integer",
            value: n as u64,
            max: SYNCSAFE_MAX as u64,
        });
    }
    Ok([
        ((n >> 21) & 0x7f) as u8,
        ((n >> 14) & 0x7f) as u8,
        ((n >> 7) & 0x7f) as u8,
        (n & 0x7f) as u8,
    ])
}

/// Decodes a 4-byte syncsafe integer. The top bit of each byte is ignored.
pub fn decode_syncsafe(bytes: [u8; 4]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 7) | (b & 0x7f) as u32)
}

/// Number of UTF-16 code units in `s`, which is what the length prefix counts.
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Growable little-endian output buffer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends raw bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Appends a single byte.
    pub fn push_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    /// Appends `count` zero bytes.
    pub fn push_zeros(&mut self, count: usize) -> &mut Self {
        self.buf.resize(self.buf.len() + count, 0);
        self
    }

    /// Appends a little-endian u32.
    pub fn push_u32_le(&mut self, value: u32) -> &mut Self {
        let mut b = [0u8; 4];
        LittleEndian::write_u32(&mut b, value);
        self.push_bytes(&b)
    }

    /// Appends a length as a little-endian u32, failing if it does not fit.
    pub fn push_len_u32(&mut self, what: &'static str, len: usize) -> CodecResult<&mut Self> {
        let value = u32::try_from(len).map_err(|_| CodecError::Range {
            what,
            value: len as u64,
            max: u32::MAX as u64,
        })?;
        Ok(self.push_u32_le(value))
    }

    /// Appends a 4-byte syncsafe integer.
    pub fn push_syncsafe(&mut self, value: u32) -> CodecResult<&mut Self> {
        let bytes = encode_syncsafe(value)?;
        Ok(self.push_bytes(&bytes))
    }

    /// Appends a syncsafe integer from a buffer length.
    pub fn push_syncsafe_len(&mut self, len: usize) -> CodecResult<&mut Self> {
        let value = u32::try_from(len).map_err(|_| CodecError::Range {
            what: "syncsafe integer",
            value: len as u64,
            max: SYNCSAFE_MAX as u64,
        })?;
        self.push_syncsafe(value)
    }

    /// Appends the UTF-16 code unit count of `s` as u32 LE, then `s` as UTF-16LE.
    pub fn push_ucs2_string(&mut self, s: &str) -> &mut Self {
        self.push_u32_le(utf16_len(s) as u32);
        for unit in s.encode_utf16() {
            let mut b = [0u8; 2];
            LittleEndian::write_u16(&mut b, unit);
            self.buf.extend_from_slice(&b);
        }
        self
    }

    /// Appends the element count as u32 LE, then each element as a UCS-2 string.
    pub fn push_ucs2_string_array<S: AsRef<str>>(&mut self, items: &[S]) -> &mut Self {
        self.push_u32_le(items.len() as u32);
        for item in items {
            self.push_ucs2_string(item.as_ref());
        }
        self
    }

    /// Appends the pair count as u32 LE, then `"\@" + key` and `value` as UCS-2 strings.
    pub fn push_key_value_pairs<K, V>(&mut self, pairs: &[(K, V)]) -> &mut Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.push_u32_le(pairs.len() as u32);
        for (key, value) in pairs {
            self.push_ucs2_string(&format!("{}{}", KEY_PREFIX, key.as_ref()));
            self.push_ucs2_string(value.as_ref());
        }
        self
    }

    /// Overwrites a little-endian u32 at `offset`.
    ///
    /// # Panics
    /// Panics if `offset + 4` is past the end of the buffer.
    pub fn patch_u32_le(&mut self, offset: usize, value: u32) {
        LittleEndian::write_u32(&mut self.buf[offset..offset + 4], value);
    }

    /// Current length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer and returns its buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Read cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader positioned at `pos`.
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self {
            data,
            pos: pos.min(data.len()),
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true when the cursor is at the end.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Consumes `len` bytes.
    pub fn take(&mut self, what: &'static str, len: usize) -> CodecResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::Truncated {
                what,
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Consumes a fixed-size array.
    pub fn take_array<const N: usize>(&mut self, what: &'static str) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(what, N)?);
        Ok(out)
    }

    /// Consumes everything after the cursor.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        self.pos = self.data.len();
        rest
    }

    /// Advances the cursor, clamping at the end of the buffer.
    pub fn skip(&mut self, len: usize) {
        self.pos = self.pos.saturating_add(len).min(self.data.len());
    }

    /// Reads a little-endian u32.
    pub fn read_u32_le(&mut self, what: &'static str) -> CodecResult<u32> {
        Ok(LittleEndian::read_u32(self.take(what, 4)?))
    }

    /// Reads a 4-byte syncsafe integer.
    pub fn read_syncsafe(&mut self, what: &'static str) -> CodecResult<u32> {
        Ok(decode_syncsafe(self.take_array(what)?))
    }

    /// Reads a UCS-2 string written by [`ByteWriter::push_ucs2_string`].
    ///
    /// Unpaired surrogates are replaced with U+FFFD.
    pub fn read_ucs2_string(&mut self) -> CodecResult<String> {
        let start = self.pos;
        let units = self.read_u32_le("string length")? as usize;
        let byte_len = units.checked_mul(2).ok_or(CodecError::Truncated {
            what: "string data",
            offset: start,
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        let bytes = self.take("string data", byte_len)?;
        let utf16: Vec<u16> = bytes.chunks_exact(2).map(LittleEndian::read_u16).collect();
        Ok(String::from_utf16_lossy(&utf16))
    }

    /// Reads a UCS-2 string array written by [`ByteWriter::push_ucs2_string_array`].
    pub fn read_ucs2_string_array(&mut self) -> CodecResult<Vec<String>> {
        let count = self.read_u32_le("string array length")?;
        let mut items = Vec::new();
        for _ in 0..count {
            items.push(self.read_ucs2_string()?);
        }
        Ok(items)
    }

    /// Reads key/value pairs written by [`ByteWriter::push_key_value_pairs`].
    ///
    /// The `\@` key prefix is removed when present.
    pub fn read_key_value_pairs(&mut self) -> CodecResult<Vec<(String, String)>> {
        let count = self.read_u32_le("key/value count")?;
        let mut pairs = Vec::new();
        for _ in 0..count {
            let key = self.read_ucs2_string()?;
            let value = self.read_ucs2_string()?;
            let key = match key.strip_prefix(KEY_PREFIX) {
                Some(stripped) => stripped.to_string(),
                None => key,
            };
            pairs.push((key, value));
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_syncsafe_known_values() {
        assert_eq!(encode_syncsafe(0).unwrap(), [0, 0, 0, 0]);
        assert_eq!(encode_syncsafe(127).unwrap(), [0, 0, 0, 0x7f]);
        assert_eq!(encode_syncsafe(128).unwrap(), [0, 0, 1, 0]);
        assert_eq!(encode_syncsafe(1024).unwrap(), [0, 0, 0x08, 0x00]);
        assert_eq!(encode_syncsafe(SYNCSAFE_MAX).unwrap(), [0x7f; 4]);
    }

    #[test]
    fn test_syncsafe_rejects_28_bit_overflow() {
        let err = encode_syncsafe(SYNCSAFE_MAX + 1).unwrap_err();
        assert_eq!(err.code(), "CODEC_003");
    }

    #[test]
    fn test_syncsafe_decode() {
        assert_eq!(decode_syncsafe([0, 0, 1, 0]), 128);
        assert_eq!(decode_syncsafe([0x7f; 4]), SYNCSAFE_MAX);
        // Top bits are not part of the value
        assert_eq!(decode_syncsafe([0x80, 0x80, 0x80, 0x81]), 1);
    }

    #[test]
    fn test_push_ucs2_string_layout() {
        let mut w = ByteWriter::new();
        w.push_ucs2_string("Ab");
        assert_eq!(w.as_slice(), &[2, 0, 0, 0, b'A', 0, b'b', 0]);
    }

    #[test]
    fn test_push_ucs2_string_counts_code_units() {
        let mut w = ByteWriter::new();
        // One astral char is two UTF-16 code units
        w.push_ucs2_string("\u{1F941}");
        assert_eq!(&w.as_slice()[..4], &[2, 0, 0, 0]);
        assert_eq!(w.len(), 8);
    }

    #[test]
    fn test_empty_string_and_array() {
        let mut w = ByteWriter::new();
        w.push_ucs2_string("");
        w.push_ucs2_string_array::<String>(&[]);
        assert_eq!(w.as_slice(), &[0; 8]);

        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(r.read_ucs2_string().unwrap(), "");
        assert!(r.read_ucs2_string_array().unwrap().is_empty());
        assert!(r.is_empty());
    }

    #[test]
    fn test_key_value_pairs() {
        let mut w = ByteWriter::new();
        w.push_key_value_pairs(&[("color", "0"), ("verl", "1.7.14")]);

        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(r.read_u32_le("count").unwrap(), 2);
        assert_eq!(r.read_ucs2_string().unwrap(), "\\@color");

        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(
            r.read_key_value_pairs().unwrap(),
            vec![
                ("color".to_string(), "0".to_string()),
                ("verl".to_string(), "1.7.14".to_string()),
            ]
        );
    }

    #[test]
    fn test_reader_truncated_string() {
        let mut w = ByteWriter::new();
        w.push_u32_le(10).push_bytes(b"a\0");
        let mut r = ByteReader::new(w.as_slice());
        match r.read_ucs2_string() {
            Err(CodecError::Truncated {
                offset,
                needed,
                available,
                ..
            }) => {
                assert_eq!(offset, 4);
                assert_eq!(needed, 20);
                assert_eq!(available, 2);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_patch_u32() {
        let mut w = ByteWriter::new();
        w.push_bytes(b"RIFF").push_u32_le(4);
        w.patch_u32_le(4, 0x0102_0304);
        assert_eq!(&w.as_slice()[4..], &[4, 3, 2, 1]);
    }

    #[test]
    fn test_take_rest_and_skip() {
        let data = [1u8, 2, 3, 4, 5];
        let mut r = ByteReader::at(&data, 1);
        r.skip(1);
        assert_eq!(r.peek_u8(), Some(3));
        assert_eq!(r.take_rest(), &[3, 4, 5]);
        r.skip(10);
        assert_eq!(r.position(), 5);
    }
}
