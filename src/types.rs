use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{ClueError, Result};

/// Language family deciding how text is split into comparable units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageFamily {
    /// Whitespace-delimited words (English, Spanish, French, ...).
    Latin,
    /// Words like `Latin`, plus carry-over of split words between clues.
    Korean,
    /// Single characters, matched in groups of up to three.
    Japanese,
}

impl LanguageFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageFamily::Latin => "latin",
            LanguageFamily::Korean => "korean",
            LanguageFamily::Japanese => "japanese",
        }
    }
}

impl fmt::Display for LanguageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LanguageFamily {
    type Err = ClueError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "latin" => Ok(LanguageFamily::Latin),
            "korean" => Ok(LanguageFamily::Korean),
            "japanese" => Ok(LanguageFamily::Japanese),
            other => Err(ClueError::Config(format!("unknown language family '{other}'"))),
        }
    }
}

/// Tokenized original lyrics of one song in one language.
///
/// Built once per (song, language) and never mutated afterwards; cursors
/// stored in [`MatchState`] index into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitSequence {
    Words(Vec<String>),
    Chars(Vec<char>),
}

impl UnitSequence {
    pub fn len(&self) -> usize {
        match self {
            UnitSequence::Words(words) => words.len(),
            UnitSequence::Chars(chars) => chars.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UnitSequence::Words(_) => "word",
            UnitSequence::Chars(_) => "character",
        }
    }

    pub fn as_words(&self) -> Result<&[String]> {
        match self {
            UnitSequence::Words(words) => Ok(words),
            UnitSequence::Chars(_) => Err(ClueError::UnitKindMismatch {
                expected: "word",
                actual: self.kind(),
            }),
        }
    }

    pub fn as_chars(&self) -> Result<&[char]> {
        match self {
            UnitSequence::Chars(chars) => Ok(chars),
            UnitSequence::Words(_) => Err(ClueError::UnitKindMismatch {
                expected: "character",
                actual: self.kind(),
            }),
        }
    }

    /// Render `count` units starting at `start`, clamped to the sequence bounds.
    pub fn excerpt(&self, start: usize, count: usize) -> String {
        let start = start.min(self.len());
        let end = start.saturating_add(count).min(self.len());
        match self {
            UnitSequence::Words(words) => words[start..end].join(" "),
            UnitSequence::Chars(chars) => chars[start..end].iter().collect(),
        }
    }
}

/// Resumable search position for one (song, language) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchState {
    /// Index of the last unit consumed by a successful match.
    pub last_matched: Option<usize>,
    /// Unconsumed tail of the word at `last_matched` (Korean only).
    pub remainder: String,
}

impl MatchState {
    /// First unit index the next search may inspect.
    pub fn search_start(&self) -> usize {
        self.last_matched.map_or(0, |idx| idx + 1)
    }

    pub(crate) fn at(last_matched: usize, remainder: impl Into<String>) -> Self {
        Self {
            last_matched: Some(last_matched),
            remainder: remainder.into(),
        }
    }
}

/// Successful relocation of a clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Reconstructed original text.
    pub text: String,
    /// State to use for the next clue of the same song and language.
    pub state: MatchState,
}

impl Match {
    pub(crate) fn new(text: String, state: MatchState) -> Self {
        Self { text, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_start_follows_last_match() {
        let mut state = MatchState::default();
        assert_eq!(state.search_start(), 0);
        state.last_matched = Some(4);
        assert_eq!(state.search_start(), 5);
    }

    #[test]
    fn excerpt_clamps_to_bounds() {
        let words = UnitSequence::Words(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(words.excerpt(1, 10), "b c");
        assert_eq!(words.excerpt(7, 2), "");

        let chars = UnitSequence::Chars("こんにちは".chars().collect());
        assert_eq!(chars.excerpt(2, 2), "にち");
    }

    #[test]
    fn unit_kind_mismatch_is_reported() {
        let chars = UnitSequence::Chars(vec!['a']);
        assert!(matches!(
            chars.as_words(),
            Err(ClueError::UnitKindMismatch { expected: "word", .. })
        ));
    }

    #[test]
    fn parses_family_names() {
        assert_eq!("Korean".parse::<LanguageFamily>().unwrap(), LanguageFamily::Korean);
        assert!("klingon".parse::<LanguageFamily>().is_err());
    }
}
