//! Character-level classification for practice text.

/// CJK Unified Ideographs as used for practice text (U+4E00..U+9FA5).
/// Extension blocks and the tail of the basic block are not typed.
pub fn is_hanzi(c: char) -> bool {
    ('\u{4E00}'..='\u{9FA5}').contains(&c)
}

/// ASCII letters and digits, which may be typed as their own pseudo-syllable.
pub fn is_latin_or_digit(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Remove every whitespace character, including full-width spaces.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
