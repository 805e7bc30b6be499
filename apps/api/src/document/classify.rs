//! Line classification for body text.
//!
//! Every body line is classified independently by its leading numbering:
//! 一、 marks a first-level heading, （一） a second-level heading, anything
//! else is plain body text. Both renderers call this one function; the
//! result is never stored on the document.

use once_cell::sync::Lazy;
use regex::Regex;

/// Classification of a single body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLevel {
    /// First-level heading, 一、 through 十、.
    H1,
    /// Second-level heading, （一） through （十）.
    H2,
    /// Plain body text.
    Body,
}

// The numeral set is the fixed ten characters 一 through 十. Composite
// numerals beyond ten are not understood: 十一、 still matches as a run of
// the base characters, but 百、 or （11） do not. This limitation is kept
// as is rather than silently extended.
static H1_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[一二三四五六七八九十]+、").expect("valid H1 pattern"));
static H2_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^（[一二三四五六七八九十]+）").expect("valid H2 pattern"));

/// Classifies one body line by its leading numbering.
///
/// Pure and total: every line maps to exactly one level, and the H1 pattern
/// wins when both could apply. Leading whitespace is ignored for matching
/// only; callers render the original line.
pub fn classify_line(line: &str) -> LineLevel {
    let trimmed = line.trim();
    if H1_PATTERN.is_match(trimmed) {
        LineLevel::H1
    } else if H2_PATTERN.is_match(trimmed) {
        LineLevel::H2
    } else {
        LineLevel::Body
    }
}
