//! Error types for metadata validation and loading.

use thiserror::Error;

/// Error codes for metadata validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// M001: Property name is not part of the metadata record
    UnknownProperty,
    /// M002: Property value has the wrong JSON type
    InvalidType,
    /// M003: deviceType is neither LOOP nor ONESHOT
    InvalidDeviceType,
    /// M004: Category path has the wrong number of segments or an empty segment
    InvalidCategoryPath,
    /// M005: Source file lacks a chunk required for tagging
    MissingChunk,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "M001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnknownProperty => "M001",
            ErrorCode::InvalidType => "M002",
            ErrorCode::InvalidDeviceType => "M003",
            ErrorCode::InvalidCategoryPath => "M004",
            ErrorCode::MissingChunk => "M005",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "types\[1\]\[0\]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error type for metadata operations.
#[derive(Debug, Error)]
pub enum MetaError {
    /// Metadata validation failed with one or more errors.
    #[error("metadata validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetaError {
    /// Returns the validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            MetaError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<ValidationError> for MetaError {
    fn from(err: ValidationError) -> Self {
        MetaError::Validation(vec![err])
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [single] => single.to_string(),
        _ => format!("{} error(s)", errors.len()),
    }
}

/// Result of metadata validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self { ok: false, errors }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.ok {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
