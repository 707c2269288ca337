//! Metadata record types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::CategoryPath;
use crate::error::MetaError;
use crate::validation::validate_metadata;

/// Sample device type as understood by the sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    /// Tempo-synced loop.
    #[serde(rename = "LOOP")]
    Loop,
    /// Single hit sample.
    #[default]
    #[serde(rename = "ONESHOT")]
    OneShot,
}

impl DeviceType {
    /// Returns the wire name ("LOOP" or "ONESHOT").
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Loop => "LOOP",
            DeviceType::OneShot => "ONESHOT",
        }
    }

    /// Parses a wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOOP" => Some(DeviceType::Loop),
            "ONESHOT" => Some(DeviceType::OneShot),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// Metadata embedded into a WAV file.
///
/// Only the properties listed in [`KNOWN_PROPERTIES`](crate::validation::KNOWN_PROPERTIES)
/// are accepted; anything else is rejected during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MetadataRecord {
    /// Sample name. Falls back to the source file's base name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Author name.
    #[serde(default)]
    pub author: String,
    /// Vendor name.
    #[serde(default)]
    pub vendor: String,
    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Loop or one-shot; absent behaves as one-shot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    /// Library bank chain, outermost first.
    #[serde(default)]
    pub bankchain: Vec<String>,
    /// Type taxonomy paths.
    #[serde(default)]
    pub types: Vec<CategoryPath>,
    /// Mode tags.
    #[serde(default)]
    pub modes: Vec<String>,
    /// Tempo in BPM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    /// Rename the output file to `name`.
    #[serde(default = "default_true")]
    pub sync_filename: bool,
    /// Keep only the `fmt ` and `data` chunks of the source.
    #[serde(default = "default_true")]
    pub remove_unnecessary_chunks: bool,
}

impl Default for MetadataRecord {
    fn default() -> Self {
        Self {
            name: None,
            author: String::new(),
            vendor: String::new(),
            comment: None,
            device_type: None,
            bankchain: Vec::new(),
            types: Vec::new(),
            modes: Vec::new(),
            tempo: None,
            sync_filename: true,
            remove_unnecessary_chunks: true,
        }
    }
}

impl MetadataRecord {
    /// Creates a new record builder.
    pub fn builder(name: impl Into<String>) -> MetadataRecordBuilder {
        MetadataRecordBuilder::new(name)
    }

    /// Parses and validates a record from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, MetaError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Validates and converts a JSON value into a record.
    ///
    /// Every validation error is collected before failing. Null values of the
    /// optional properties are treated as absent.
    pub fn from_value(value: Value) -> Result<Self, MetaError> {
        validate_metadata(&value)
            .into_result()
            .map_err(MetaError::Validation)?;

        let value = strip_absent(value);
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the record to a pretty JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Effective device type.
    pub fn device_type(&self) -> DeviceType {
        self.device_type.unwrap_or_default()
    }

    /// Returns true for loops.
    pub fn is_loop(&self) -> bool {
        self.device_type() == DeviceType::Loop
    }

    /// Name, or empty when none was supplied or resolved.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Fills in `name` if it is absent.
    pub fn with_default_name(mut self, fallback: impl Into<String>) -> Self {
        if self.name.is_none() {
            self.name = Some(fallback.into());
        }
        self
    }
}

/// Drops properties whose value means "not provided".
fn strip_absent(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, v)| match v {
                    Value::Null => false,
                    Value::String(s) if key == "deviceType" => !s.is_empty(),
                    _ => true,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Builder for [`MetadataRecord`].
#[derive(Debug, Clone)]
pub struct MetadataRecordBuilder {
    record: MetadataRecord,
}

impl MetadataRecordBuilder {
    /// Creates a builder with the given sample name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            record: MetadataRecord {
                name: Some(name.into()),
                ..MetadataRecord::default()
            },
        }
    }

    /// Sets the author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.record.author = author.into();
        self
    }

    /// Sets the vendor.
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.record.vendor = vendor.into();
        self
    }

    /// Sets the comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.record.comment = Some(comment.into());
        self
    }

    /// Sets the device type.
    pub fn device_type(mut self, device_type: DeviceType) -> Self {
        self.record.device_type = Some(device_type);
        self
    }

    /// Appends a bank to the bank chain.
    pub fn bank(mut self, bank: impl Into<String>) -> Self {
        self.record.bankchain.push(bank.into());
        self
    }

    /// Appends a type path.
    pub fn category(mut self, path: CategoryPath) -> Self {
        self.record.types.push(path);
        self
    }

    /// Appends a mode.
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.record.modes.push(mode.into());
        self
    }

    /// Sets the tempo.
    pub fn tempo(mut self, tempo: f64) -> Self {
        self.record.tempo = Some(tempo);
        self
    }

    /// Sets whether the output file is renamed.
    pub fn sync_filename(mut self, sync: bool) -> Self {
        self.record.sync_filename = sync;
        self
    }

    /// Sets whether non-audio chunks are dropped.
    pub fn remove_unnecessary_chunks(mut self, remove: bool) -> Self {
        self.record.remove_unnecessary_chunks = remove;
        self
    }

    /// Builds the record.
    pub fn build(self) -> MetadataRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_json_full_record() {
        let json = r#"{
            "name": "Hogehoge",
            "vendor": "Hahaha",
            "author": "Hehehe",
            "bankchain": ["Fugafuga", "Fugafuga 1.1 Library"],
            "comment": "uniuni",
            "deviceType": "LOOP",
            "types": [["Bass", "Synth Bass"]],
            "modes": ["Additive", "Analog"],
            "tempo": 120
        }"#;

        let record = MetadataRecord::from_json(json).expect("should parse");

        let expected = MetadataRecord::builder("Hogehoge")
            .author("Hehehe")
            .vendor("Hahaha")
            .comment("uniuni")
            .device_type(DeviceType::Loop)
            .bank("Fugafuga")
            .bank("Fugafuga 1.1 Library")
            .category(CategoryPath::new(["Bass", "Synth Bass"]).unwrap())
            .mode("Additive")
            .mode("Analog")
            .tempo(120.0)
            .build();
        assert_eq!(record, expected);
        assert!(record.sync_filename);
        assert!(record.remove_unnecessary_chunks);
    }

    #[test]
    fn test_from_json_defaults() {
        let record = MetadataRecord::from_json("{}").unwrap();
        assert_eq!(record, MetadataRecord::default());
        assert_eq!(record.device_type(), DeviceType::OneShot);
        assert_eq!(record.name_or_empty(), "");
    }

    #[test]
    fn test_from_json_nulls_are_absent() {
        let record = MetadataRecord::from_json(
            r#"{"comment": null, "bankchain": null, "tempo": null, "deviceType": ""}"#,
        )
        .unwrap();
        assert_eq!(record.comment, None);
        assert!(record.bankchain.is_empty());
        assert_eq!(record.tempo, None);
        assert_eq!(record.device_type, None);
    }

    #[test]
    fn test_from_json_unknown_property() {
        let err = MetadataRecord::from_json(r#"{"foo": 1}"#).unwrap_err();
        assert!(err.to_string().contains("unknown data property"));
    }

    #[test]
    fn test_with_default_name() {
        let record = MetadataRecord::default().with_default_name("kick_01");
        assert_eq!(record.name.as_deref(), Some("kick_01"));

        let record = MetadataRecord::builder("Snare")
            .build()
            .with_default_name("kick_01");
        assert_eq!(record.name.as_deref(), Some("Snare"));
    }

    #[test]
    fn test_json_round_trip() {
        let record = MetadataRecord::builder("Pad")
            .device_type(DeviceType::OneShot)
            .category(CategoryPath::new(["Synth Pad"]).unwrap())
            .sync_filename(false)
            .build();

        let json = record.to_json_pretty().unwrap();
        let parsed = MetadataRecord::from_json(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
