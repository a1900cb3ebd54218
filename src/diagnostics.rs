use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;
use strsim::normalized_levenshtein;

use super::{
    clue::Clue,
    encoder::JAPANESE_GROUP_LEN,
    error::{ClueError, Result},
    tokenizer::comparable,
    types::{MatchState, UnitSequence},
};

// Below this a "nearest" unit is noise rather than a hint at drift.
pub const DRIFT_SIMILARITY_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    NotFound,
    SourceUnavailable,
    UnknownLanguage,
    MalformedClue,
    UnitKindMismatch,
    Other,
}

impl FailureReason {
    pub fn from_error(err: &ClueError) -> Self {
        match err {
            ClueError::SourceUnavailable { .. } | ClueError::Read { .. } => {
                FailureReason::SourceUnavailable
            }
            ClueError::UnknownLanguage(_) => FailureReason::UnknownLanguage,
            ClueError::MalformedClue { .. } => FailureReason::MalformedClue,
            ClueError::UnitKindMismatch { .. } => FailureReason::UnitKindMismatch,
            _ => FailureReason::Other,
        }
    }
}

/// Unit closest to the clue's first part after the search start; points at
/// the place the segment was probably meant to match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftHint {
    pub offset: usize,
    pub unit: String,
    pub similarity: f64,
}

/// One segment that could not be restored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRecord {
    pub song: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics_url: Option<String>,
    pub clue: Vec<String>,
    pub search_start: usize,
    pub excerpt: String,
    pub total_units: usize,
    pub reason: FailureReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest: Option<DriftHint>,
}

impl FailureRecord {
    pub fn new(
        song: impl Into<String>,
        language: impl Into<String>,
        clue: Vec<String>,
        reason: FailureReason,
    ) -> Self {
        Self {
            song: song.into(),
            language: language.into(),
            lyrics_url: None,
            clue,
            search_start: 0,
            excerpt: String::new(),
            total_units: 0,
            reason,
            detail: None,
            nearest: None,
        }
    }

    pub fn from_error(
        song: impl Into<String>,
        language: impl Into<String>,
        clue: Vec<String>,
        err: &ClueError,
    ) -> Self {
        Self::new(song, language, clue, FailureReason::from_error(err)).with_detail(err.to_string())
    }

    pub fn with_lyrics_url(mut self, url: Option<String>) -> Self {
        self.lyrics_url = url;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Describe where the search ran: the units the clue would have covered
    /// from the search start, and the nearest near-match.
    pub fn with_search_window(mut self, clue: &Clue, units: &UnitSequence, state: &MatchState) -> Self {
        let start = state.search_start();
        let span = match units {
            UnitSequence::Words(_) => clue.acronym_len(),
            UnitSequence::Chars(_) => clue.acronym_len() * JAPANESE_GROUP_LEN,
        };
        self.search_start = start;
        self.total_units = units.len();
        self.excerpt = units.excerpt(start, span);
        self.nearest = nearest_unit(clue, units, start);
        self
    }
}

/// Best fuzzy match of the clue's first part at or after `start`.
pub fn nearest_unit(clue: &Clue, units: &UnitSequence, start: usize) -> Option<DriftHint> {
    let mut best: Option<DriftHint> = None;
    let mut consider = |offset: usize, unit: String, similarity: f64| {
        if similarity < DRIFT_SIMILARITY_THRESHOLD {
            return;
        }
        if best.as_ref().is_none_or(|b| similarity > b.similarity) {
            best = Some(DriftHint {
                offset,
                unit,
                similarity,
            });
        }
    };

    match units {
        UnitSequence::Words(words) => {
            let target = comparable(clue.first(), false);
            if target.is_empty() {
                return None;
            }
            for (offset, word) in words.iter().enumerate().skip(start) {
                let similarity = normalized_levenshtein(&comparable(word, false), &target);
                consider(offset, word.clone(), similarity);
            }
        }
        UnitSequence::Chars(chars) => {
            let target = clue.first();
            let width = target.chars().count();
            if width == 0 || chars.len() < width {
                return None;
            }
            for offset in start..=chars.len() - width {
                let window: String = chars[offset..offset + width].iter().collect();
                let similarity = normalized_levenshtein(&window, target);
                consider(offset, window, similarity);
            }
        }
    }
    best
}

/// Write records as JSON lines.
pub fn write_failures(path: &Path, failures: &[FailureRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in failures {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{tokenize_chars, tokenize_words};

    #[test]
    fn search_window_uses_acronym_length() {
        let words = UnitSequence::Words(tokenize_words("one two three four five"));
        let record = FailureRecord::new("s", "US", vec![], FailureReason::NotFound)
            .with_search_window(&Clue::triple("ttf", "two", "four"), &words, &MatchState::at(0, ""));
        assert_eq!(record.search_start, 1);
        assert_eq!(record.excerpt, "two three four");
        assert_eq!(record.total_units, 5);

        let chars = UnitSequence::Chars(tokenize_chars("こんにちは世界"));
        let record = FailureRecord::new("s", "JP", vec![], FailureReason::NotFound)
            .with_search_window(&Clue::triple("こ", "こんに", "こんに"), &chars, &MatchState::default());
        assert_eq!(record.excerpt, "こんに");
    }

    #[test]
    fn nearest_unit_points_at_drifted_word() {
        let words = UnitSequence::Words(tokenize_words("I remembered you, goodbye"));
        let hint = nearest_unit(&Clue::triple("Rg", "Remember", "goodbye"), &words, 0).unwrap();
        assert_eq!(hint.offset, 1);
        assert_eq!(hint.unit, "remembered");
        assert!(hint.similarity >= DRIFT_SIMILARITY_THRESHOLD);

        assert!(nearest_unit(&Clue::pair("x", "xylophone"), &words, 0).is_none());
    }

    #[test]
    fn nearest_unit_scans_character_windows() {
        let chars = UnitSequence::Chars(tokenize_chars("ああこんばんは"));
        let hint = nearest_unit(&Clue::triple("こは", "こんに", "は"), &chars, 0).unwrap();
        assert_eq!(hint.offset, 2);
        assert_eq!(hint.unit, "こんば");
    }

    #[test]
    fn maps_errors_to_reasons() {
        let record = FailureRecord::from_error(
            "s",
            "CN",
            vec!["a".to_string()],
            &ClueError::UnknownLanguage("CN".to_string()),
        );
        assert_eq!(record.reason, FailureReason::UnknownLanguage);
        assert_eq!(record.detail.as_deref(), Some("unknown language code 'CN'"));
    }

    #[test]
    fn writes_json_lines() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("failures.jsonl");
        let records = vec![
            FailureRecord::new("a", "US", vec!["H".into(), "Hi".into()], FailureReason::NotFound),
            FailureRecord::new("b", "JP", vec![], FailureReason::SourceUnavailable)
                .with_lyrics_url(Some("https://example.com".to_string())),
        ];
        write_failures(&path, &records).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["reason"], "not_found");
        assert!(lines[0].get("lyrics_url").is_none());
        assert_eq!(lines[1]["lyrics_url"], "https://example.com");
    }
}
