//! Category path type (general to specific taxonomy label).

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, ValidationError};

/// Maximum number of segments in a category path.
pub const MAX_CATEGORY_DEPTH: usize = 3;

/// An ordered 1-3 segment taxonomy label, e.g. `["Bass", "Synth Bass"]`.
///
/// Segments are ordered from general to specific. The only way to build one is
/// through [`CategoryPath::new`], so every value holds between one and three
/// non-empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryPath(Vec<String>);

impl CategoryPath {
    /// Creates a category path, rejecting empty or over-long paths and empty segments.
    pub fn new<I, S>(segments: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() || segments.len() > MAX_CATEGORY_DEPTH {
            return Err(ValidationError::new(
                ErrorCode::InvalidCategoryPath,
                format!(
                    "category path must have 1 - {} segments, got {}",
                    MAX_CATEGORY_DEPTH,
                    segments.len()
                ),
            ));
        }
        if let Some(index) = segments.iter().position(|s| s.is_empty()) {
            return Err(ValidationError::new(
                ErrorCode::InvalidCategoryPath,
                format!("category path segment {} is empty", index),
            ));
        }

        Ok(Self(segments))
    }

    /// Returns the segments, general first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments (1 to 3).
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns the first `depth` segments, or `None` if the path is shallower.
    pub fn prefix(&self, depth: usize) -> Option<&[String]> {
        self.0.get(..depth)
    }
}

impl TryFrom<Vec<String>> for CategoryPath {
    type Error = ValidationError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl From<CategoryPath> for Vec<String> {
    fn from(path: CategoryPath) -> Self {
        path.0
    }
}

impl std::fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" / "))
    }
}
