//! RTF word extractor
//!
//! Turns RTF source into plain words with a lossy two-pass regex transform
//! (escape decoding, then markup stripping) and feeds the words containing a
//! target character into a `WordBank`.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::core::patterns::{self, RTF_NOISE, UNICODE_ESCAPE, WORD};
use crate::core::word_bank::WordBank;
use crate::utils::file_utils::{self, read_file_content};

/// Error raised while extracting words from one document
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The input file does not exist
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    /// The input file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input file is not valid UTF-8 text
    #[error("{} is not valid UTF-8: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: std::str::Utf8Error,
    },

    /// A `\uN` escape names something that is not a Unicode character
    #[error("invalid unicode escape \\u{value}")]
    InvalidCodePoint { value: String },
}

/// Replace every RTF `\uN` escape with the character it encodes.
///
/// Runs before markup stripping, since the escape itself looks like a control word.
///
/// # Arguments
///
/// * `content` - Raw RTF source
///
/// # Returns
///
/// The content with escapes decoded, or `InvalidCodePoint` for the first bad escape
pub fn decode_unicode_escapes(content: &str) -> Result<String, ExtractError> {
    let mut decoded = String::with_capacity(content.len());
    let mut last_end = 0;

    for caps in UNICODE_ESCAPE.captures_iter(content) {
        let (whole, value) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(value)) => (whole, value.as_str()),
            _ => continue,
        };

        let character = value
            .parse::<i64>()
            .ok()
            .and_then(patterns::rtf_code_point)
            .ok_or_else(|| ExtractError::InvalidCodePoint {
                value: value.to_string(),
            })?;

        decoded.push_str(&content[last_end..whole.start()]);
        decoded.push(character);
        last_end = whole.end();
    }

    decoded.push_str(&content[last_end..]);
    Ok(decoded)
}

/// Remove control words, brace groups and stray closing braces
pub fn strip_rtf(content: &str) -> String {
    RTF_NOISE.replace_all(content, "").into_owned()
}

/// Split text into maximal runs of word characters
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> + '_ {
    WORD.find_iter(text).map(|m| m.as_str())
}

/// Check whether `word` contains any of the target characters
pub fn contains_target(word: &str, target_characters: &[char]) -> bool {
    word.chars().any(|c| target_characters.contains(&c))
}

/// First character of `word`, scanning left to right, that is a target character
pub fn first_target(word: &str, target_characters: &[char]) -> Option<char> {
    word.chars().find(|c| target_characters.contains(c))
}

/// Lowercased words of already-decoded, already-stripped text that contain a target character
pub fn matching_words(text: &str, target_characters: &[char]) -> Vec<String> {
    tokenize(text)
        .map(str::to_lowercase)
        .filter(|word| contains_target(word, target_characters))
        .collect()
}

/// Run the full text transform on RTF source.
///
/// # Arguments
///
/// * `content` - Raw RTF source
/// * `target_characters` - Characters a word must contain to be kept
///
/// # Returns
///
/// Qualifying lowercased words in document order
pub fn extract_words(content: &str, target_characters: &[char]) -> Result<Vec<String>, ExtractError> {
    let decoded = decode_unicode_escapes(content)?;
    let sanitized = strip_rtf(&decoded);
    debug!(
        "Sanitized text is {} bytes (from {} bytes of source)",
        sanitized.len(),
        content.len()
    );

    Ok(matching_words(&sanitized, target_characters))
}

/// Extract qualifying words from the RTF document at `path` into `word_bank`.
///
/// Words are counted under the bank's current group. On error the bank is
/// left untouched.
///
/// # Arguments
///
/// * `path` - Path to the RTF document
/// * `target_characters` - Characters a word must contain to be counted
/// * `word_bank` - Accumulator receiving the words
///
/// # Returns
///
/// The number of word occurrences added
pub fn extract(
    path: &Path,
    target_characters: &[char],
    word_bank: &mut WordBank,
) -> Result<usize, ExtractError> {
    info!(
        "Extracting words from {} into group '{}'",
        path.display(),
        word_bank.current_group()
    );

    let file = read_file_content(path)?;
    if !file_utils::looks_like_rtf(&file.content) {
        warn!("{} has no RTF header; processing it as RTF anyway", path.display());
    }

    let words = extract_words(&file.content, target_characters)?;
    for word in &words {
        word_bank.add_word(word);
    }

    info!(
        "Added {} words from {} ({} bytes)",
        words.len(),
        path.display(),
        file.size
    );
    Ok(words.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGETS: [char; 6] = ['à', 'è', 'é', 'ì', 'ò', 'ù'];

    #[test]
    fn test_decode_unicode_escapes() {
        let decoded = decode_unicode_escapes(r"Hello \u232?world caf\u233? test")
            .expect("Failed to decode");
        assert_eq!(decoded, "Hello èworld café test");
    }

    #[test]
    fn test_decode_without_placeholder() {
        let decoded = decode_unicode_escapes(r"perch\u233 no").expect("Failed to decode");
        assert_eq!(decoded, "perché no");
    }

    #[test]
    fn test_decode_negative_escape_fails_document() {
        match decode_unicode_escapes(r"\u-23? perch\u233?") {
            Err(ExtractError::InvalidCodePoint { value }) => assert_eq!(value, "-23"),
            other => panic!("expected InvalidCodePoint, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_escape_adds_nothing() {
        let mut bank = WordBank::new("Only");
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("negative.rtf");
        std::fs::write(&path, "{\\rtf1 \\u-4064? perch\\u233?}").expect("Failed to write file");

        assert!(matches!(
            extract(&path, &TARGETS, &mut bank),
            Err(ExtractError::InvalidCodePoint { .. })
        ));
        assert!(bank.is_empty());
    }

    #[test]
    fn test_decode_rejects_surrogate() {
        assert!(matches!(
            decode_unicode_escapes(r"\u55296?"),
            Err(ExtractError::InvalidCodePoint { .. })
        ));
    }

    #[test]
    fn test_decode_leaves_other_control_words() {
        let decoded = decode_unicode_escapes(r"\ul sottolineato\ulnone").expect("Failed to decode");
        assert_eq!(decoded, r"\ul sottolineato\ulnone");
    }

    #[test]
    fn test_strip_rtf() {
        let stripped = strip_rtf(r"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0\pard Perché no\par}");
        assert_eq!(stripped, " Perché no");
    }

    #[test]
    fn test_strip_control_word_runs_to_next_space() {
        assert_eq!(strip_rtf(r"\b grassetto\b0 città"), " grassetto città");
        assert_eq!(strip_rtf(r"\par}verità"), "");
    }

    #[test]
    fn test_brace_group_does_not_cross_line_break() {
        let rtf = crate::utils::file_utils::normalize_newlines("{\\i uno\rcittà} più");
        assert_eq!(strip_rtf(&rtf), "{ uno\ncittà più");
        assert_eq!(strip_rtf("{\\i uno\rcittà} più"), " più");
    }

    #[test]
    fn test_strip_stray_closing_brace() {
        assert_eq!(strip_rtf("ciao} così"), "ciao così");
    }

    #[test]
    fn test_tokenize_unicode_words() {
        let tokens: Vec<&str> = tokenize("Hello èworld café test").collect();
        assert_eq!(tokens, vec!["Hello", "èworld", "café", "test"]);
    }

    #[test]
    fn test_matching_words_lowercases_and_filters() {
        let words = matching_words("Città e PERCHÉ, poi però niente", &TARGETS);
        assert_eq!(words, vec!["città", "perché", "però"]);
    }

    #[test]
    fn test_no_target_characters_yields_nothing() {
        let words = extract_words(r"{\rtf1\ansi\pard Nothing to see here\par}", &TARGETS)
            .expect("Failed to extract");
        assert!(words.is_empty());
    }

    #[test]
    fn test_first_target_scans_left_to_right() {
        assert_eq!(first_target("élève", &TARGETS), Some('é'));
        assert_eq!(first_target("ciao", &TARGETS), None);
    }

    #[test]
    fn test_extract_words_from_rtf() {
        let rtf = r"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0\pard Hello \u232?world caf\u233? test\par}";
        let words = extract_words(rtf, &TARGETS).expect("Failed to extract");
        assert_eq!(words, vec!["èworld", "café"]);
    }
}
