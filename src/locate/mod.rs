//! Relocation of clues inside the tokenized original lyrics.
//!
//! Every locator is a pure function of `(clue, units, state)`: it either
//! returns the reconstructed text together with the next [`MatchState`], or
//! `None` without touching the state.

use std::borrow::Cow;

use crate::tokenizer::{chars_eq_ignore_case, comparable, is_special_only, is_word_char};

mod japanese;
mod korean;
mod latin;

pub use japanese::{MAX_GROUP_LEN, locate_chars};
pub use korean::locate_korean;
pub use latin::locate_words;

/// First or last unit of a clue, pre-folded for comparison.
#[derive(Debug, Clone)]
pub(crate) struct CluePart<'a> {
    raw: &'a str,
    exact: bool,
    key: Cow<'a, str>,
}

impl<'a> CluePart<'a> {
    pub(crate) fn new(raw: &'a str) -> Self {
        let exact = is_special_only(raw);
        Self {
            raw,
            exact,
            key: comparable(raw, exact),
        }
    }

    pub(crate) fn matches(&self, unit: &str) -> bool {
        comparable(unit, self.exact) == self.key
    }

    pub(crate) fn same_key(&self, other: &CluePart<'_>) -> bool {
        self.key == other.key
    }

    /// Split `word` after the shortest prefix that matches this part, when
    /// something comparable is left over.
    pub(crate) fn split_prefix<'w>(&self, word: &'w str) -> Option<(&'w str, &'w str)> {
        if self.exact {
            let rest = word.strip_prefix(self.raw)?;
            return (!rest.is_empty()).then(|| word.split_at(self.raw.len()));
        }
        if self.key.is_empty() {
            return None;
        }

        let mut folded = String::with_capacity(self.key.len());
        for (idx, c) in word.char_indices() {
            if !(is_word_char(c) || c.is_whitespace()) {
                continue;
            }
            folded.extend(c.to_lowercase());
            if folded.len() < self.key.len() {
                continue;
            }
            if folded != self.key {
                return None;
            }
            let (prefix, rest) = word.split_at(idx + c.len_utf8());
            return (!comparable(rest, false).is_empty()).then_some((prefix, rest));
        }
        None
    }

    /// Match `word` as the final unit of a span: either the whole word, or a
    /// prefix of it leaving a remainder for the next clue.
    pub(crate) fn match_end<'w>(&self, word: &'w str) -> Option<(&'w str, &'w str)> {
        if self.matches(word) {
            return Some((word, ""));
        }
        self.split_prefix(word)
    }
}

/// One unit per acronym character; each unit's own first character, or the
/// first character of its comparable form, must equal the acronym character
/// ignoring case.
pub(crate) fn acronym_fits<'a>(acronym: &[char], units: impl IntoIterator<Item = &'a str>) -> bool {
    let mut count = 0;
    for unit in units {
        let Some(&initial) = acronym.get(count) else {
            return false;
        };
        if !unit_has_initial(unit, initial) {
            return false;
        }
        count += 1;
    }
    count > 0 && count == acronym.len()
}

fn unit_has_initial(unit: &str, initial: char) -> bool {
    let raw_first = unit.chars().next();
    if raw_first.is_some_and(|c| chars_eq_ignore_case(c, initial)) {
        return true;
    }
    comparable(unit, false)
        .chars()
        .next()
        .is_some_and(|c| chars_eq_ignore_case(c, initial))
}
