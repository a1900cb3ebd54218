use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    error::{ClueError, Result},
    tokenizer::{normalize_apostrophes, normalize_text},
};

/// Copyright-safe stand-in for one lyric line.
///
/// Serialized as a JSON array of one, two or three strings:
/// `[unit]`, `[acronym, unit]` or `[acronym, first, last]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Clue {
    Single(String),
    Pair { acronym: String, unit: String },
    Triple {
        acronym: String,
        first: String,
        last: String,
    },
}

impl Clue {
    pub fn single(unit: impl Into<String>) -> Self {
        Clue::Single(unit.into())
    }

    pub fn pair(acronym: impl Into<String>, unit: impl Into<String>) -> Self {
        Clue::Pair {
            acronym: acronym.into(),
            unit: unit.into(),
        }
    }

    pub fn triple(
        acronym: impl Into<String>,
        first: impl Into<String>,
        last: impl Into<String>,
    ) -> Self {
        Clue::Triple {
            acronym: acronym.into(),
            first: first.into(),
            last: last.into(),
        }
    }

    /// Build a clue from its persisted parts, rejecting empty components.
    pub fn from_parts(parts: &[String]) -> Result<Self> {
        if parts.iter().any(String::is_empty) {
            return Err(ClueError::malformed(parts, "empty component"));
        }
        match parts {
            [unit] => Ok(Clue::single(unit.as_str())),
            [acronym, unit] => Ok(Clue::pair(acronym.as_str(), unit.as_str())),
            [acronym, first, last] => Ok(Clue::triple(
                acronym.as_str(),
                first.as_str(),
                last.as_str(),
            )),
            _ => Err(ClueError::malformed(
                parts,
                format!("expected 1 to 3 parts, got {}", parts.len()),
            )),
        }
    }

    pub fn to_parts(&self) -> Vec<String> {
        match self {
            Clue::Single(unit) => vec![unit.clone()],
            Clue::Pair { acronym, unit } => vec![acronym.clone(), unit.clone()],
            Clue::Triple {
                acronym,
                first,
                last,
            } => vec![acronym.clone(), first.clone(), last.clone()],
        }
    }

    /// Acronym, with the implicit one of a single-unit clue.
    pub fn acronym(&self) -> &str {
        match self {
            Clue::Single(unit) => unit
                .char_indices()
                .nth(1)
                .map_or(unit.as_str(), |(idx, _)| &unit[..idx]),
            Clue::Pair { acronym, .. } | Clue::Triple { acronym, .. } => acronym,
        }
    }

    pub fn first(&self) -> &str {
        match self {
            Clue::Single(unit) | Clue::Pair { unit, .. } => unit,
            Clue::Triple { first, .. } => first,
        }
    }

    pub fn last(&self) -> &str {
        match self {
            Clue::Single(unit) | Clue::Pair { unit, .. } => unit,
            Clue::Triple { last, .. } => last,
        }
    }

    pub fn acronym_len(&self) -> usize {
        self.acronym().chars().count()
    }

    /// Copy with every part run through the normalization applied to the
    /// original lyrics (canonical composition, half-width punctuation).
    pub fn normalized(&self) -> Clue {
        self.map_parts(normalize_text)
    }

    /// [`Clue::normalized`] plus the apostrophe folding of the word path.
    pub fn normalized_words(&self) -> Clue {
        self.map_parts(|part| normalize_apostrophes(&normalize_text(part)).into_owned())
    }

    fn map_parts(&self, f: impl Fn(&str) -> String) -> Clue {
        match self {
            Clue::Single(unit) => Clue::single(f(unit)),
            Clue::Pair { acronym, unit } => Clue::pair(f(acronym), f(unit)),
            Clue::Triple {
                acronym,
                first,
                last,
            } => Clue::triple(f(acronym), f(first), f(last)),
        }
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_parts())
    }
}

impl Serialize for Clue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_parts().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Clue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let parts = Vec::<String>::deserialize(deserializer)?;
        Clue::from_parts(&parts).map_err(serde::de::Error::custom)
    }
}
