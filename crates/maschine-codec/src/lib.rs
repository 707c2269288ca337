//! Maschine Sampler Metadata Codec
//!
//! This crate embeds sampler metadata into WAV files and reads it back:
//!
//! - a RIFF/WAVE chunk reader and writer
//! - an ID3v2.4 tag holding two GEOB frames
//! - the NKS soundinfo frame (a MessagePack map)
//! - the NISound soundinfo frame (a fixed little-endian binary layout)
//!
//! # Overview
//!
//! [`tag_file`] takes a source WAV and a [`MetadataSource`], keeps the audio
//! chunks, and appends an `ID3 ` chunk built from the resolved
//! [`MetadataRecord`](maschine_meta::MetadataRecord). [`inspect_wav`] decodes
//! the soundinfo of an already tagged file.
//!
//! All operations work on in-memory buffers and hold no state between calls.
//!
//! # Example
//!
//! ```
//! use maschine_codec::riff::{FourCc, RiffBuilder};
//! use maschine_codec::{inspect_wav, tag_file, SourceFile};
//! use maschine_meta::MetadataRecord;
//!
//! let mut riff = RiffBuilder::new(FourCc::WAVE);
//! riff.push_chunk(FourCc::FMT, &[0u8; 16]).unwrap();
//! riff.push_chunk(FourCc::DATA, &[0u8; 64]).unwrap();
//! let source = SourceFile::new("kick_01.wav", riff.finish().unwrap());
//!
//! let record = MetadataRecord::builder("Deep Kick").author("Someone").build();
//! let tagged = tag_file(&source, &record.into()).unwrap();
//! assert_eq!(tagged.path.to_str(), Some("Deep Kick.wav"));
//!
//! let info = inspect_wav(&tagged.contents).unwrap().unwrap();
//! assert_eq!(info.nks.unwrap().author, "Someone");
//! ```
//!
//! # Crate Structure
//!
//! - [`riff`] - RIFF container reader and builder
//! - [`bytes`] - Syncsafe integers, UCS-2 strings and little-endian helpers
//! - [`geob`] - ID3 GEOB frame codec
//! - [`id3`] - ID3 tag assembly and parsing
//! - [`nks`] - NKS soundinfo codec
//! - [`nisound`] - NISound soundinfo codec
//! - [`category`] - Mode and type path flattening
//! - [`soundinfo`] - Decoding soundinfo from tagged files
//! - [`tagger`] - Per-file tagging pipeline

pub mod bytes;
pub mod category;
pub mod error;
pub mod geob;
pub mod id3;
pub mod nisound;
pub mod nks;
pub mod riff;
pub mod soundinfo;
pub mod tagger;

// Re-export main types at crate root
pub use category::flatten_categories;
pub use error::{CodecError, CodecResult, CompatibilityWarning};
pub use id3::{build_id3_chunk, Id3Tag};
pub use nisound::NiSoundInfo;
pub use nks::NksSoundInfo;
pub use riff::{FourCc, RiffChunk};
pub use soundinfo::{decode_soundinfo, inspect_wav, SoundInfo};
pub use tagger::{tag_file, MetadataSource, SourceFile, TagError, TaggedFile};
