//! JSON output types for machine-readable CLI output.
//!
//! This module provides structured output types for the `--json` flag on
//! every command.

use maschine_codec::{SoundInfo, TagError};
use maschine_meta::{MetaError, ValidationError};
use serde::Serialize;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: CLI_XXX for CLI-level errors, or passes through library error codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_003";
    /// Tagged file carries no soundinfo
    pub const NO_SOUNDINFO: &str = "CLI_004";
    /// WAV file could not be decoded
    pub const DECODE: &str = "CLI_005";
    /// Two inputs map to the same output file
    pub const OUTPUT_COLLISION: &str = "CLI_006";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "M001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Converts a metadata validation error.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    JsonError {
        code: error.code.code().to_string(),
        message: error.message.clone(),
        path: error.path.clone(),
        file: None,
    }
}

/// Converts a metadata error, expanding validation failures.
pub fn meta_error_to_json(error: &MetaError) -> Vec<JsonError> {
    match error {
        MetaError::Validation(errors) => errors.iter().map(validation_error_to_json).collect(),
        MetaError::JsonParse(e) => vec![JsonError::new(error_codes::JSON_PARSE, e.to_string())],
        MetaError::Io(e) => vec![JsonError::new(error_codes::FILE_READ, e.to_string())],
    }
}

/// Converts a tagging error.
pub fn tag_error_to_json(error: &TagError) -> Vec<JsonError> {
    match error {
        TagError::Metadata(e) => meta_error_to_json(e),
        TagError::Codec(maschine_codec::CodecError::Validation(e)) => {
            vec![validation_error_to_json(e)]
        }
        other => vec![JsonError::new(other.code(), other.to_string())],
    }
}

/// Result of tagging one file.
#[derive(Debug, Clone, Serialize)]
pub struct TagFileResult {
    /// Source file path
    pub input: String,
    /// Written file path (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Errors for this file
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

impl TagFileResult {
    /// Whether the file was tagged.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Output of the tag command.
#[derive(Debug, Clone, Serialize)]
pub struct TagOutput {
    /// Whether every file was tagged
    pub success: bool,
    /// Errors not tied to one file
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
    /// Per-file results, in processing order
    pub files: Vec<TagFileResult>,
}

/// Output of the inspect command.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    /// Whether soundinfo was decoded
    pub success: bool,
    /// Inspected file path
    pub input: String,
    /// Decoded soundinfo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soundinfo: Option<SoundInfo>,
    /// Errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

/// Output of the validate command.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    /// Whether the metadata is valid
    pub success: bool,
    /// Metadata file path
    pub metadata: String,
    /// Validation errors
    pub errors: Vec<JsonError>,
}

/// Output of the flatten command.
#[derive(Debug, Clone, Serialize)]
pub struct FlattenOutput {
    /// Whether every type path was valid
    pub success: bool,
    /// Flattened category paths
    pub categories: Vec<String>,
    /// Errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maschine_meta::ErrorCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_error_keeps_path() {
        let error = ValidationError::with_path(
            ErrorCode::InvalidCategoryPath,
            "segment should not be empty",
            "types[0][1]",
        );
        let json = validation_error_to_json(&error);
        assert_eq!(json.code, "M004");
        assert_eq!(json.path.as_deref(), Some("types[0][1]"));
    }

    #[test]
    fn test_meta_validation_expands() {
        let error = MetaError::Validation(vec![
            ValidationError::new(ErrorCode::UnknownProperty, "a"),
            ValidationError::new(ErrorCode::InvalidType, "b"),
        ]);
        let json = meta_error_to_json(&error);
        assert_eq!(json.len(), 2);
        assert_eq!(json[1].code, "M002");
    }

    #[test]
    fn test_tag_provider_error() {
        let error = TagError::provider("a.wav", "boom");
        let json = tag_error_to_json(&error);
        assert_eq!(json, vec![JsonError::new("TAG_002", error.to_string())]);
    }

    #[test]
    fn test_json_error_skips_empty_fields() {
        let json = serde_json::to_string(&JsonError::new("CLI_001", "x")).unwrap();
        assert_eq!(json, r#"{"code":"CLI_001","message":"x"}"#);
    }
}
