//! Core module for word extraction
//!
//! This module contains the word bank accumulator, the regex patterns used to
//! clean RTF source, and the extractor that ties them together.

pub mod extractor;
pub mod patterns;
pub mod word_bank;
