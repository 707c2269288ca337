//! Metadata validation logic.
//!
//! Validation runs on the raw JSON value so that every problem can be reported
//! with its JSON path before the typed [`MetadataRecord`](crate::MetadataRecord)
//! is built.

use serde_json::{Map, Value};

use crate::category::MAX_CATEGORY_DEPTH;
use crate::error::{ErrorCode, ValidationError, ValidationResult};
use crate::record::DeviceType;

/// Property names accepted in a metadata record.
pub const KNOWN_PROPERTIES: &[&str] = &[
    "name",
    "author",
    "vendor",
    "comment",
    "deviceType",
    "bankchain",
    "tempo",
    "types",
    "modes",
    "syncFilename",
    "removeUnnecessaryChunks",
];

/// Validates a metadata JSON value and returns a validation result.
///
/// # Arguments
/// * `value` - The metadata object
///
/// # Returns
/// * `ValidationResult` with `ok=true` if validation passed.
/// * `ValidationResult` with `ok=false` and one error per violation otherwise.
///
/// # Example
/// ```
/// use maschine_meta::validation::validate_metadata;
///
/// let value = serde_json::json!({ "name": "Kick", "foo": 1 });
/// let result = validate_metadata(&value);
/// assert!(!result.is_ok());
/// assert!(result.errors[0].message.contains("unknown data property"));
/// ```
pub fn validate_metadata(value: &Value) -> ValidationResult {
    let mut result = ValidationResult::default();

    let Some(map) = value.as_object() else {
        result.add_error(ValidationError::new(
            ErrorCode::InvalidType,
            "metadata should be an object",
        ));
        return result;
    };

    validate_property_names(map, &mut result);

    for (key, value) in map {
        match key.as_str() {
            "name" | "author" | "vendor" => validate_string(key, value, &mut result),
            "comment" => {
                if !value.is_null() {
                    validate_string(key, value, &mut result);
                }
            }
            "deviceType" => validate_device_type(value, &mut result),
            "bankchain" | "modes" => validate_string_array(key, value, &mut result),
            "tempo" => validate_tempo(value, &mut result),
            "types" => validate_types(value, &mut result),
            "syncFilename" | "removeUnnecessaryChunks" => validate_bool(key, value, &mut result),
            _ => {}
        }
    }

    result
}

/// Returns true if `key` names a metadata property.
pub fn is_known_property(key: &str) -> bool {
    KNOWN_PROPERTIES.contains(&key)
}

fn validate_property_names(map: &Map<String, Value>, result: &mut ValidationResult) {
    for key in map.keys() {
        if !is_known_property(key) {
            result.add_error(ValidationError::with_path(
                ErrorCode::UnknownProperty,
                format!("unknown data property: [{}]", key),
                key.clone(),
            ));
        }
    }
}

fn validate_string(key: &str, value: &Value, result: &mut ValidationResult) {
    if !value.is_string() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidType,
            format!("data.{} should be String. {}", key, value),
            key,
        ));
    }
}

fn validate_bool(key: &str, value: &Value, result: &mut ValidationResult) {
    if !value.is_boolean() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidType,
            format!("data.{} should be Boolean. {}", key, value),
            key,
        ));
    }
}

fn validate_device_type(value: &Value, result: &mut ValidationResult) {
    match value {
        Value::Null => {}
        Value::String(s) if s.is_empty() => {}
        Value::String(s) => {
            if DeviceType::parse(s).is_none() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidDeviceType,
                    format!("data.deviceType should be 'LOOP' or 'ONESHOT'. {}", s),
                    "deviceType",
                ));
            }
        }
        other => result.add_error(ValidationError::with_path(
            ErrorCode::InvalidType,
            format!("data.deviceType should be String. {}", other),
            "deviceType",
        )),
    }
}

fn validate_tempo(value: &Value, result: &mut ValidationResult) {
    if !value.is_null() && !value.is_number() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidType,
            format!("data.tempo should be number. {}", value),
            "tempo",
        ));
    }
}

fn validate_string_array(key: &str, value: &Value, result: &mut ValidationResult) {
    let items = match value {
        Value::Null => return,
        Value::Array(items) => items,
        other => {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidType,
                format!("data.{} should be Array of String. {}", key, other),
                key,
            ));
            return;
        }
    };

    for (i, item) in items.iter().enumerate() {
        if !item.is_string() {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidType,
                format!("data.{} should be Array of String. {}", key, item),
                format!("{}[{}]", key, i),
            ));
        }
    }
}

fn validate_types(value: &Value, result: &mut ValidationResult) {
    let paths = match value {
        Value::Null => return,
        Value::Array(paths) => paths,
        other => {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidType,
                format!("data.types should be 2 dimensional Array of String. {}", other),
                "types",
            ));
            return;
        }
    };

    for (i, path) in paths.iter().enumerate() {
        let Some(segments) = path.as_array() else {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidType,
                format!("data.types should be Array of String. {}", path),
                format!("types[{}]", i),
            ));
            continue;
        };

        if segments.is_empty() || segments.len() > MAX_CATEGORY_DEPTH {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidCategoryPath,
                format!(
                    "data.types length of inner array should be 1 - {}. {}",
                    MAX_CATEGORY_DEPTH, path
                ),
                format!("types[{}]", i),
            ));
        }

        for (j, segment) in segments.iter().enumerate() {
            match segment.as_str() {
                None => result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidType,
                    format!("data.types should be 2 dimensional Array of String. {}", segment),
                    format!("types[{}][{}]", i, j),
                )),
                Some("") => result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidCategoryPath,
                    "data.types segments should not be empty",
                    format!("types[{}][{}]", i, j),
                )),
                Some(_) => {}
            }
        }
    }
}
