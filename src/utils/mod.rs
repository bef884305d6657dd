//! Utility modules
//!
//! File reading helpers and output formatting.

pub mod file_utils;
pub mod output_formatter;
