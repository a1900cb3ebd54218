use std::path::PathBuf;

/// Result type used throughout the crate.
pub type Result<T, E = ClueError> = std::result::Result<T, E>;

/// Errors raised while encoding or restoring lyric clues.
///
/// Inside a restoration run none of these abort the run: they are turned into
/// failure records and the next segment is processed.
#[derive(Debug, thiserror::Error)]
pub enum ClueError {
    /// The language code has no registered strategy.
    #[error("unknown language code '{0}'")]
    UnknownLanguage(String),

    /// A clue did not have one of the accepted shapes.
    #[error("malformed clue {parts:?}: {reason}")]
    MalformedClue { parts: Vec<String>, reason: String },

    /// The original lyrics for a song/language could not be loaded.
    #[error("original lyrics unavailable for song '{song}', language '{language}': {reason}")]
    SourceUnavailable {
        song: String,
        language: String,
        reason: String,
    },

    /// A locator received a unit sequence of the wrong kind.
    #[error("expected {expected} units, got {actual}")]
    UnitKindMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl ClueError {
    pub(crate) fn malformed(parts: &[String], reason: impl Into<String>) -> Self {
        ClueError::MalformedClue {
            parts: parts.to_vec(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ClueError;

    #[test]
    fn display_messages_are_human_readable() {
        assert_eq!(
            ClueError::UnknownLanguage("CN".to_string()).to_string(),
            "unknown language code 'CN'"
        );
        assert_eq!(
            ClueError::SourceUnavailable {
                song: "song".to_string(),
                language: "KR".to_string(),
                reason: "missing".to_string(),
            }
            .to_string(),
            "original lyrics unavailable for song 'song', language 'KR': missing"
        );
        let malformed = ClueError::malformed(&["".to_string()], "empty unit");
        assert!(malformed.to_string().starts_with("malformed clue"));
    }

    #[test]
    fn io_error_converts() {
        let err: ClueError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ClueError::Io(_)));
    }
}
