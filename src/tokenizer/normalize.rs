use std::{borrow::Cow, collections::HashMap};

use once_cell::sync::Lazy;
use unicode_normalization::UnicodeNormalization;

/// Zero-width characters, BOM and the ideographic space.
const INVISIBLE_CHARS: [char; 5] = ['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}', '\u{3000}'];

const CANONICAL_APOSTROPHE: char = '\'';
const APOSTROPHE_VARIANT: char = '\u{2019}';

static FULL_WIDTH_PUNCTUATION: Lazy<HashMap<char, char>> = Lazy::new(|| {
    [
        ('（', '('),
        ('）', ')'),
        ('！', '!'),
        ('？', '?'),
        ('．', '.'),
        ('，', ','),
        ('：', ':'),
        ('；', ';'),
        ('「', '"'),
        ('」', '"'),
        ('『', '"'),
        ('』', '"'),
        ('〜', '~'),
        ('－', '-'),
    ]
    .into_iter()
    .collect()
});

/// Normalization shared by every language family: canonical composition,
/// half-width punctuation, invisible characters and newlines turned into spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.nfc()
        .map(|c| {
            if c == '\n' || INVISIBLE_CHARS.contains(&c) {
                ' '
            } else {
                FULL_WIDTH_PUNCTUATION.get(&c).copied().unwrap_or(c)
            }
        })
        .collect()
}

/// Word-path spacing: a break after `.`, `,` and `:`, brackets become spaces
/// and the typographic apostrophe is folded to `'`.
pub fn space_word_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '.' | ',' | ':' => {
                out.push(c);
                out.push(' ');
            }
            '(' | ')' => out.push(' '),
            APOSTROPHE_VARIANT => out.push(CANONICAL_APOSTROPHE),
            _ => out.push(c),
        }
    }
    out
}

pub fn normalize_apostrophes(text: &str) -> Cow<'_, str> {
    if text.contains(APOSTROPHE_VARIANT) {
        Cow::Owned(text.replace(APOSTROPHE_VARIANT, "'"))
    } else {
        Cow::Borrowed(text)
    }
}

#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True for a non-empty token made only of punctuation/symbols.
pub fn is_special_only(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| !is_word_char(c) && !c.is_whitespace())
}

/// Form used to compare a source unit with a clue part.
///
/// Clue parts that are special-only must match exactly; everything else is
/// compared without punctuation and case.
pub fn comparable(token: &str, exact: bool) -> Cow<'_, str> {
    if exact {
        return Cow::Borrowed(token);
    }
    Cow::Owned(
        token
            .chars()
            .filter(|c| is_word_char(*c) || c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect(),
    )
}

/// Strip leading and trailing punctuation from a word unless nothing but
/// punctuation would remain.
pub fn trim_special(word: &str) -> &str {
    if is_special_only(word) {
        return word;
    }
    let trimmed = word.trim_matches(|c: char| !is_word_char(c));
    if trimmed.is_empty() { word } else { trimmed }
}

pub fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_full_width_punctuation_and_invisibles() {
        assert_eq!(normalize_text("「こんにちは」！"), "\"こんにちは\"!");
        assert_eq!(normalize_text("a\u{200b}b\u{3000}c\nd"), "a b c d");
    }

    #[test]
    fn composes_decomposed_hangul() {
        let decomposed = "\u{1100}\u{1161}";
        assert_eq!(normalize_text(decomposed), "가");
    }

    #[test]
    fn spaces_after_breaks_and_drops_brackets() {
        assert_eq!(space_word_breaks("yes,no"), "yes, no");
        assert_eq!(space_word_breaks("(oh)"), " oh ");
        assert_eq!(space_word_breaks("don\u{2019}t"), "don't");
    }

    #[test]
    fn detects_special_only_tokens() {
        assert!(is_special_only("-"));
        assert!(is_special_only("?!"));
        assert!(!is_special_only("a-"));
        assert!(!is_special_only(""));
        assert!(!is_special_only("_"));
    }

    #[test]
    fn comparable_strips_punctuation_and_case() {
        assert_eq!(comparable("Goodbye.", false), "goodbye");
        assert_eq!(comparable("don't", false), "dont");
        assert_eq!(comparable("-", true), "-");
        assert_eq!(comparable("사랑해!", false), "사랑해");
    }

    #[test]
    fn trim_special_keeps_punctuation_only_words() {
        assert_eq!(trim_special("\"Hello,"), "Hello");
        assert_eq!(trim_special("..."), "...");
        assert_eq!(trim_special("rock'n'roll!"), "rock'n'roll");
    }

    #[test]
    fn compares_characters_case_insensitively() {
        assert!(chars_eq_ignore_case('R', 'r'));
        assert!(chars_eq_ignore_case('사', '사'));
        assert!(!chars_eq_ignore_case('a', 'b'));
    }
}
