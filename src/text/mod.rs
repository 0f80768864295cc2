//! Text utilities for mixed CJK and Latin content
//!
//! Character classification, whitespace normalization, date extraction and
//! similarity scoring. All functions are pure.

mod classify;
mod dates;
mod normalize;
mod similarity;

pub use classify::{has_digit, is_ascii_punctuation, is_cjk_char, is_cjk_punctuation, is_digit};
pub use dates::{find_dates, MIN_YEAR};
pub use normalize::{collapse_blanks, strip_whitespace, ReplaceSequence};
pub use similarity::similarity;

/// Escape every character of `s` as a `\u{..}` code point
///
/// ```
/// assert_eq!(utilkit::text::escape_code_points("中a"), "\\u{4e2d}\\u{61}");
/// ```
pub fn escape_code_points(s: &str) -> String {
    s.chars().map(|c| format!("\\u{{{:x}}}", c as u32)).collect()
}
