//! maschine-tag CLI library.
//!
//! This crate provides the command implementations behind the `maschine-tag`
//! binary: tagging WAV files, inspecting tagged files, validating metadata and
//! flattening category paths.

pub mod commands;
