//! CLI command implementations

pub mod flatten;
pub mod inspect;
pub mod json_output;
pub mod metadata;
pub mod tag;
pub mod validate;

mod reporting;
