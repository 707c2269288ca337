//! Per-file tagging pipeline.
//!
//! A source WAV is parsed into chunks, its metadata resolved, the chunk list
//! selected and the new `ID3 ` chunk appended. Nothing is written on failure;
//! the caller receives either a complete [`TaggedFile`] or an error.

use std::fmt;
use std::path::{Path, PathBuf};

use maschine_meta::{ErrorCode, MetaError, MetadataRecord, ValidationError};
use thiserror::Error;

use crate::error::CodecError;
use crate::id3::build_id3_chunk;
use crate::riff::{read_chunks, write_chunks, FourCc, RiffChunk};

/// Chunks a source file must contain.
pub const REQUIRED_CHUNKS: [FourCc; 2] = [FourCc::FMT, FourCc::DATA];

/// Errors produced while tagging one file.
#[derive(Debug, Error)]
pub enum TagError {
    /// Reading or encoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Metadata for the file was invalid.
    #[error(transparent)]
    Metadata(#[from] MetaError),

    /// The metadata provider failed.
    #[error("metadata provider failed for {}: {message}", path.display())]
    Provider {
        /// Source file path.
        path: PathBuf,
        /// Provider's error message.
        message: String,
    },
}

impl TagError {
    /// Creates a provider error.
    pub fn provider(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        Self::Provider {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Returns a stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            TagError::Codec(e) => e.code(),
            TagError::Metadata(_) => "TAG_001",
            TagError::Provider { .. } => "TAG_002",
        }
    }
}

impl From<ValidationError> for TagError {
    fn from(err: ValidationError) -> Self {
        TagError::Codec(CodecError::Validation(err))
    }
}

/// A WAV file to be tagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path of the file. Only its file name and extension are used.
    pub path: PathBuf,
    /// File contents.
    pub contents: Vec<u8>,
}

impl SourceFile {
    /// Creates a source file.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// File name without extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A tagged WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedFile {
    /// Output path, renamed when the record asks for it.
    pub path: PathBuf,
    /// Output contents.
    pub contents: Vec<u8>,
    /// The record that was embedded, with its name resolved.
    pub record: MetadataRecord,
}

/// Callback resolving metadata per file.
pub type MetadataProvider =
    Box<dyn Fn(&SourceFile, &[RiffChunk]) -> Result<MetadataRecord, TagError> + Send + Sync>;

/// Where a file's metadata comes from.
pub enum MetadataSource {
    /// The same record for every file.
    Literal(MetadataRecord),
    /// A record computed from the source file and its chunks.
    Provider(MetadataProvider),
}

impl MetadataSource {
    /// Wraps a closure as a provider.
    pub fn provider<F>(f: F) -> Self
    where
        F: Fn(&SourceFile, &[RiffChunk]) -> Result<MetadataRecord, TagError>
            + Send
            + Sync
            + 'static,
    {
        Self::Provider(Box::new(f))
    }

    /// Resolves the record for one file.
    pub fn resolve(
        &self,
        source: &SourceFile,
        chunks: &[RiffChunk],
    ) -> Result<MetadataRecord, TagError> {
        match self {
            MetadataSource::Literal(record) => Ok(record.clone()),
            MetadataSource::Provider(provider) => provider(source, chunks),
        }
    }
}

impl fmt::Debug for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataSource::Literal(record) => f.debug_tuple("Literal").field(record).finish(),
            MetadataSource::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

impl From<MetadataRecord> for MetadataSource {
    fn from(record: MetadataRecord) -> Self {
        MetadataSource::Literal(record)
    }
}

/// Reads the chunks of a source WAV and checks the required ones are present.
pub fn parse_source_chunks(contents: &[u8]) -> Result<Vec<RiffChunk>, TagError> {
    let chunks = read_chunks(contents, FourCc::WAVE)?;
    for required in REQUIRED_CHUNKS {
        if !chunks.iter().any(|c| c.id == required) {
            return Err(ValidationError::new(
                ErrorCode::MissingChunk,
                format!("[{}] chunk is not contained in file.", required),
            )
            .into());
        }
    }
    Ok(chunks)
}

/// Picks the chunks carried over into the output, in source order.
///
/// With `remove_unnecessary` only `fmt ` and `data` are kept; otherwise every
/// chunk except an existing `ID3 ` chunk is kept.
pub fn select_chunks(chunks: &[RiffChunk], remove_unnecessary: bool) -> Vec<&RiffChunk> {
    chunks
        .iter()
        .filter(|c| {
            if remove_unnecessary {
                REQUIRED_CHUNKS.contains(&c.id)
            } else {
                c.id != FourCc::ID3
            }
        })
        .collect()
}

/// Computes the output path for a record.
///
/// With `sync_filename` the base name is replaced by the record name and the
/// extension is kept.
pub fn output_path(source: &Path, record: &MetadataRecord) -> PathBuf {
    if !record.sync_filename {
        return source.to_path_buf();
    }
    let mut file_name = record.name_or_empty().to_string();
    if let Some(ext) = source.extension() {
        file_name.push('.');
        file_name.push_str(&ext.to_string_lossy());
    }
    source.with_file_name(file_name)
}

/// Tags one file.
pub fn tag_file(source: &SourceFile, metadata: &MetadataSource) -> Result<TaggedFile, TagError> {
    let chunks = parse_source_chunks(&source.contents)?;
    let record = metadata
        .resolve(source, &chunks)?
        .with_default_name(source.stem());

    let id3 = RiffChunk::new(FourCc::ID3, build_id3_chunk(&record)?);
    let mut selected = select_chunks(&chunks, record.remove_unnecessary_chunks);
    selected.push(&id3);

    tracing::debug!(
        path = %source.path.display(),
        kept = selected.len() - 1,
        dropped = chunks.len() + 1 - selected.len(),
        id3_len = id3.payload.len(),
        "tagging file"
    );

    let contents = write_chunks(FourCc::WAVE, selected)?;
    let path = output_path(&source.path, &record);
    Ok(TaggedFile {
        path,
        contents,
        record,
    })
}
