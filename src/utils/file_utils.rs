//! File handling utilities
//!
//! Reading input documents as text and recognizing RTF content.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::core::extractor::ExtractError;

/// Result of reading a document
#[derive(Debug)]
pub struct FileContent {
    /// The content of the file as a string, with `\n` line endings
    pub content: String,
    /// Size of the file on disk in bytes
    pub size: u64,
}

/// Read the full content of a document as UTF-8 text.
///
/// Line endings are normalized to `\n`, so brace groups split over
/// old-style `\r` line breaks are not matched as one group.
///
/// # Arguments
///
/// * `file_path` - Path to the file
///
/// # Returns
///
/// The file content, or an `ExtractError` naming the path on failure
pub fn read_file_content(file_path: &Path) -> Result<FileContent, ExtractError> {
    let bytes = fs::read(file_path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ExtractError::NotFound {
                path: file_path.to_path_buf(),
            }
        } else {
            ExtractError::Io {
                path: file_path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let size = bytes.len() as u64;
    let content = String::from_utf8(bytes).map_err(|e| ExtractError::Decode {
        path: file_path.to_path_buf(),
        source: e.utf8_error(),
    })?;

    debug!("Read {} bytes from {}", size, file_path.display());

    Ok(FileContent {
        content: normalize_newlines(&content),
        size,
    })
}

/// Translate `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Check whether text starts with an RTF header (`{\rtf`), ignoring leading whitespace
pub fn looks_like_rtf(content: &str) -> bool {
    content.trim_start().starts_with(r"{\rtf")
}
