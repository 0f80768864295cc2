//! Character classification for mixed CJK and Latin text

use once_cell::sync::Lazy;
use regex::Regex;

const CJK_IDEOGRAPH_RANGES: &[(u32, u32)] = &[
    (0x4E00, 0x9FFF),   // unified ideographs
    (0x3400, 0x4DBF),   // extension A
    (0x20000, 0x2A6DF), // extension B
    (0x2A700, 0x2B73F), // extension C
    (0x2B740, 0x2B81F), // extension D
    (0x2B820, 0x2CEAF), // extension E
    (0xF900, 0xFAFF),   // compatibility ideographs
    (0x2F800, 0x2FA1F), // compatibility supplement
];

const CJK_PUNCTUATION_RANGES: &[(u32, u32)] = &[
    (0x3000, 0x3003),
    (0x3008, 0x3011),
    (0x3013, 0x301F),
    // full-width forms
    (0xFF00, 0xFF0F),
    (0xFF1A, 0xFF20),
    (0xFF3B, 0xFF40),
    (0xFF5B, 0xFF64),
];

const ASCII_PUNCTUATION_RANGES: &[(u32, u32)] = &[
    (0x0020, 0x002F),
    (0x003A, 0x0040),
    (0x005B, 0x0060),
    (0x007B, 0x007E),
];

const DIGIT_RANGES: &[(u32, u32)] = &[(0x0030, 0x0039), (0xFF10, 0xFF19)];

fn in_ranges(c: char, ranges: &[(u32, u32)]) -> bool {
    let code = c as u32;
    ranges
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
}

/// True for CJK ideographs, including the extension and compatibility blocks
pub fn is_cjk_char(c: char) -> bool {
    in_ranges(c, CJK_IDEOGRAPH_RANGES)
}

/// True for CJK symbols and full-width punctuation (including the ideographic space)
pub fn is_cjk_punctuation(c: char) -> bool {
    in_ranges(c, CJK_PUNCTUATION_RANGES)
}

/// True for printable ASCII punctuation; the space counts as punctuation
pub fn is_ascii_punctuation(c: char) -> bool {
    in_ranges(c, ASCII_PUNCTUATION_RANGES)
}

/// True for ASCII and full-width decimal digits
pub fn is_digit(c: char) -> bool {
    in_ranges(c, DIGIT_RANGES)
}

static DECIMAL_DIGIT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\d").ok());

/// True if `s` contains a decimal digit (Unicode `Nd`) in any script
pub fn has_digit(s: &str) -> bool {
    DECIMAL_DIGIT.as_ref().is_some_and(|re| re.is_match(s))
}
