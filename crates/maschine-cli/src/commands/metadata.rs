//! Metadata file loading shared by the commands.

use maschine_codec::{MetadataSource, TagError};
use maschine_meta::{MetaError, MetadataRecord};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Flag overrides given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Keep every source chunk.
    pub keep_chunks: bool,
    /// Keep the source file name.
    pub keep_filename: bool,
}

impl Overrides {
    /// Forces the record's behavioural flags off where requested.
    pub fn apply(&self, mut record: MetadataRecord) -> MetadataRecord {
        if self.keep_chunks {
            record.remove_unnecessary_chunks = false;
        }
        if self.keep_filename {
            record.sync_filename = false;
        }
        record
    }
}

/// Reads a JSON file without validating it as metadata.
pub fn load_metadata_value(path: &Path) -> Result<Value, MetaError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Overlays the top-level properties of `overlay` on `base`.
///
/// Non-object values replace `base` entirely.
pub fn merge_values(base: &Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            merged.extend(overlay);
            Value::Object(merged)
        }
        (_, overlay) => overlay,
    }
}

/// Sidecar metadata path for a WAV file: `<stem>.json` in the same directory.
pub fn sidecar_path(wav: &Path) -> PathBuf {
    wav.with_extension("json")
}

/// Builds a source that uses the same record for every file.
pub fn literal_source(value: Value, overrides: Overrides) -> Result<MetadataSource, MetaError> {
    let record = MetadataRecord::from_value(value)?;
    Ok(MetadataSource::Literal(overrides.apply(record)))
}

/// Builds a source that merges each file's sidecar over `base`.
///
/// Files without a sidecar use `base` alone.
pub fn sidecar_source(base: Value, overrides: Overrides) -> MetadataSource {
    MetadataSource::provider(move |file, _chunks| {
        let path = sidecar_path(&file.path);
        let value = if path.is_file() {
            let overlay = load_metadata_value(&path).map_err(|e| TagError::provider(&path, e))?;
            tracing::debug!(sidecar = %path.display(), "merging sidecar metadata");
            merge_values(&base, overlay)
        } else {
            base.clone()
        };
        let record = MetadataRecord::from_value(value)?;
        Ok(overrides.apply(record))
    })
}
