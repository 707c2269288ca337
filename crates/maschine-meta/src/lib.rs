//! Maschine Sampler Metadata Library
//!
//! This crate provides the metadata record embedded into WAV files by the
//! `maschine-codec` crate, together with its JSON loading and validation.
//!
//! # Example
//!
//! ```
//! use maschine_meta::{CategoryPath, DeviceType, MetadataRecord};
//!
//! // Build a record
//! let record = MetadataRecord::builder("Deep Kick")
//!     .author("Someone")
//!     .vendor("Some Label")
//!     .device_type(DeviceType::OneShot)
//!     .bank("Some Library")
//!     .category(CategoryPath::new(["Drums", "Kick"]).unwrap())
//!     .build();
//! assert!(!record.is_loop());
//!
//! // Or load one from JSON, rejecting unknown properties
//! let err = MetadataRecord::from_json(r#"{ "foo": 1 }"#).unwrap_err();
//! assert!(err.to_string().contains("unknown data property"));
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error types and validation results
//! - [`category`]: Category path type
//! - [`record`]: Metadata record and builder
//! - [`validation`]: JSON validation of metadata records

pub mod category;
pub mod error;
pub mod record;
pub mod validation;

// Re-export commonly used types at the crate root
pub use category::{CategoryPath, MAX_CATEGORY_DEPTH};
pub use error::{ErrorCode, MetaError, ValidationError, ValidationResult};
pub use record::{DeviceType, MetadataRecord, MetadataRecordBuilder};
pub use validation::{is_known_property, validate_metadata, KNOWN_PROPERTIES};
