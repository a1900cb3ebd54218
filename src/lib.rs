//! Copyright-safe lyric clues.
//!
//! Each lyric line of a dataset is replaced by a short clue (an acronym plus
//! its first and last unit). Given a locally held copy of the original
//! lyrics, the clues are found again in order and the full lines restored.

mod cache;
mod clue;
mod config;
mod dataset;
mod diagnostics;
mod encoder;
mod error;
mod locate;
mod pipeline;
mod restore;
mod source;
mod tokenizer;
mod types;

pub use cache::{CacheEntry, OriginalTextCache};
pub use clue::Clue;
pub use config::Config;
pub use dataset::{Dataset, LanguageEntry, LyricText, Segment, SongRecord, encode_dataset};
pub use diagnostics::{DriftHint, FailureReason, FailureRecord, nearest_unit, write_failures};
pub use encoder::{encode_line, encode_text};
pub use error::{ClueError, Result};
pub use locate::{MAX_GROUP_LEN, locate_chars, locate_korean, locate_words};
pub use pipeline::{JapaneseStrategy, KoreanStrategy, LanguageRegistry, LanguageStrategy, WordStrategy};
pub use restore::{RestoreContext, RestoreStats};
pub use source::{FsSourceText, MemorySourceText, SourceText};
pub use tokenizer::{normalize_text, tokenize, tokenize_chars, tokenize_words};
pub use types::{LanguageFamily, Match, MatchState, UnitSequence};
