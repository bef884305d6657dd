//! Pattern definitions for RTF text extraction
//!
//! The extractor works on raw RTF source with three regular expressions:
//! one for `\uN` escapes, one for markup to strip, and one for words.

use lazy_static::lazy_static;
use regex::Regex;

/// RTF unicode escape: `\u` followed by a signed decimal code and an optional `?` placeholder.
///
/// Digits are required, unlike a bare `\u(-?\d+)?` form that would also match
/// `\ul` or `\uc1` and fail the whole document. Those are left to the
/// control-word strip instead.
pub const UNICODE_ESCAPE_PATTERN: &str = r"\\u(-?[0-9]+)\??";

/// Control words, non-greedy brace groups and stray closing braces
pub const RTF_NOISE_PATTERN: &str = r"\\[^ ]+|\{.*?\}|\}";

/// Maximal runs of word characters
pub const WORD_PATTERN: &str = r"\b\w+\b";

lazy_static! {
    pub static ref UNICODE_ESCAPE: Regex =
        Regex::new(UNICODE_ESCAPE_PATTERN).expect("unicode escape pattern is valid");
    pub static ref RTF_NOISE: Regex =
        Regex::new(RTF_NOISE_PATTERN).expect("rtf noise pattern is valid");
    pub static ref WORD: Regex = Regex::new(WORD_PATTERN).expect("word pattern is valid");
}

/// Map an RTF `\uN` parameter to the character at that code point.
///
/// Negative values (RTF's signed 16-bit form) are not shifted into range; like
/// any other value outside the Unicode scalar range they are rejected, which
/// makes the whole document fail extraction.
///
/// # Arguments
///
/// * `value` - The parameter as written in the document
///
/// # Returns
///
/// The character, or `None` if the value is not a Unicode scalar value
pub fn rtf_code_point(value: i64) -> Option<char> {
    u32::try_from(value).ok().and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(UNICODE_ESCAPE.is_match(r"caf\u233?"));
        assert!(RTF_NOISE.is_match(r"\par"));
        assert!(WORD.is_match("parola"));
    }

    #[test]
    fn test_unicode_escape_requires_digits() {
        assert!(!UNICODE_ESCAPE.is_match(r"\ul underlined"));
        assert!(!UNICODE_ESCAPE.is_match(r"\uc1"));
    }

    #[test]
    fn test_rtf_code_point() {
        assert_eq!(rtf_code_point(233), Some('é'));
        assert_eq!(rtf_code_point(-4064), None);
        assert_eq!(rtf_code_point(-23), None);
        assert_eq!(rtf_code_point(0xD800), None);
        assert_eq!(rtf_code_point(-70000), None);
    }
}
