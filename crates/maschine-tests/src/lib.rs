//! maschine-tag End-to-End Test Infrastructure
//!
//! This crate provides integration tests across the workspace:
//!
//! - Tagging: metadata file + WAV files -> tagged files on disk
//! - Inspection: tagged files decode back to the embedded metadata
//! - **Properties**: codec round trips and size invariants (proptest)
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p maschine-tests
//! ```

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{sample_wav, SampleLibraryFixture};
