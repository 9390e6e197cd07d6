//! Command handlers behind the `adlens` binary.

pub mod analyze;
pub mod report;
pub mod settings;
pub mod validate;
