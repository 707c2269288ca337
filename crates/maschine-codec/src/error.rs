//! Error types for the codec.

use maschine_meta::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed identifier or container header.
    #[error("format error: {message}")]
    Format {
        /// Error message.
        message: String,
    },

    /// A declared size runs past the end of the buffer.
    #[error("truncated {what} at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        /// What was being read.
        what: &'static str,
        /// Offset the read started at.
        offset: usize,
        /// Bytes required.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// Value does not fit the target integer field.
    #[error("{what} value {value} exceeds maximum {max}")]
    Range {
        /// Which field overflowed.
        what: &'static str,
        /// The offending value.
        value: u64,
        /// Largest encodable value.
        max: u64,
    },

    /// Metadata or source-file validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// NKS map could not be encoded.
    #[error("NKS encode error: {0}")]
    NksEncode(#[from] rmp_serde::encode::Error),

    /// NKS map could not be decoded.
    #[error("NKS decode error: {0}")]
    NksDecode(#[from] rmp_serde::decode::Error),
}

impl CodecError {
    /// Creates a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Returns a stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::Format { .. } => "CODEC_001",
            CodecError::Truncated { .. } => "CODEC_002",
            CodecError::Range { .. } => "CODEC_003",
            CodecError::Validation(_) => "CODEC_004",
            CodecError::NksEncode(_) => "CODEC_005",
            CodecError::NksDecode(_) => "CODEC_006",
        }
    }
}

/// A decoded opaque block that differs from the expected constant.
///
/// Decoding continues after a mismatch; the warning is collected on the
/// decoded value and logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityWarning {
    /// Name of the opaque block.
    pub block: &'static str,
    /// Offset of the block within the frame payload.
    pub offset: usize,
    /// Expected bytes, hex encoded.
    pub expected: String,
    /// Bytes found, hex encoded.
    pub found: String,
}

impl std::fmt::Display for CompatibilityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unmatched {} at offset {}: expected [{}], found [{}]",
            self.block, self.offset, self.expected, self.found
        )
    }
}
