mod normalize;
mod script;

pub use normalize::{
    chars_eq_ignore_case, comparable, is_special_only, is_word_char, normalize_apostrophes,
    normalize_text, space_word_breaks, trim_special,
};
pub use script::has_family_script;

use crate::types::{LanguageFamily, UnitSequence};

/// Tokenize a full lyrics text into the unit sequence used for matching.
pub fn tokenize(raw: &str, family: LanguageFamily) -> UnitSequence {
    match family {
        LanguageFamily::Latin | LanguageFamily::Korean => UnitSequence::Words(tokenize_words(raw)),
        LanguageFamily::Japanese => UnitSequence::Chars(tokenize_chars(raw)),
    }
}

pub fn tokenize_words(raw: &str) -> Vec<String> {
    merge_special_only(split_words(raw))
}

/// Whitespace split after the word-path normalization, without merging.
pub fn split_words(raw: &str) -> Vec<String> {
    space_word_breaks(&normalize_text(raw))
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Attach punctuation-only words to the word before them. A punctuation-only
/// word with nothing before it stays on its own.
pub fn merge_special_only(words: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for word in words {
        match merged.last_mut() {
            Some(prev) if is_special_only(&word) => prev.push_str(&word),
            _ => merged.push(word),
        }
    }
    merged
}

/// Character stream for Japanese: shared normalization with every
/// whitespace character removed.
pub fn tokenize_chars(raw: &str) -> Vec<char> {
    normalize_text(raw)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
