//! Whitespace normalization and literal replacement chains

use crate::text::classify::{is_cjk_char, is_cjk_punctuation};

fn is_cjk(c: char) -> bool {
    is_cjk_char(c) || is_cjk_punctuation(c)
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Remove redundant whitespace from mixed CJK and Latin text
///
/// The text is trimmed, every whitespace run between two non-CJK tokens is
/// reduced to its last character, and whitespace touching a CJK character
/// or CJK punctuation on either side is dropped entirely.
pub fn collapse_blanks(text: &str) -> String {
    let chars: Vec<char> = text.trim().chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            // trimmed, so a whitespace char always has a successor
            let next = chars.get(i + 1).copied().unwrap_or(' ');
            if next.is_whitespace() || is_cjk(next) {
                continue;
            }
            if prev.is_some_and(is_cjk) {
                continue;
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Replace every whitespace run with `replace`, drop line breaks and trim
pub fn strip_whitespace(text: &str, replace: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                collapsed.push_str(replace);
                in_run = true;
            }
        } else {
            collapsed.push(c);
            in_run = false;
        }
    }
    collapsed.retain(|c| !is_line_break(c));
    collapsed.trim().to_string()
}

/// Ordered chain of literal string replacements
///
/// ```
/// use utilkit::text::ReplaceSequence;
///
/// let seq = ReplaceSequence::new().append("&nbsp;", " ").append("<br>", "");
/// assert_eq!(seq.replace("a&nbsp;b<br>"), "a b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceSequence {
    actions: Vec<(String, String)>,
}

impl ReplaceSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a replacement, applied after all previously added ones
    pub fn append(mut self, pattern: impl Into<String>, replace_with: impl Into<String>) -> Self {
        self.actions.push((pattern.into(), replace_with.into()));
        self
    }

    /// Add a replacement that deletes every occurrence of `pattern`
    pub fn remove(self, pattern: impl Into<String>) -> Self {
        self.append(pattern, "")
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn replace(&self, text: &str) -> String {
        self.actions
            .iter()
            .filter(|(pattern, _)| !pattern.is_empty())
            .fold(text.to_string(), |acc, (pattern, with)| acc.replace(pattern.as_str(), with))
    }
}
