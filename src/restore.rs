use std::collections::HashMap;

use super::{
    cache::OriginalTextCache,
    clue::Clue,
    dataset::{Dataset, LanguageEntry, LyricText, Segment, SongRecord},
    diagnostics::{FailureReason, FailureRecord},
    error::{ClueError, Result},
    pipeline::LanguageRegistry,
    source::SourceText,
    types::{MatchState, UnitSequence},
};

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreStats {
    pub songs: usize,
    pub restored: usize,
    pub failed: usize,
}

/// Everything a restoration run needs: language table, source of original
/// lyrics, the tokenized-original cache and the collected failures.
pub struct RestoreContext {
    registry: LanguageRegistry,
    source: Box<dyn SourceText>,
    cache: OriginalTextCache,
    failures: Vec<FailureRecord>,
    stats: RestoreStats,
}

impl RestoreContext {
    pub fn new(registry: LanguageRegistry, source: impl SourceText + 'static) -> Self {
        Self {
            registry,
            source: Box::new(source),
            cache: OriginalTextCache::new(),
            failures: Vec::new(),
            stats: RestoreStats::default(),
        }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &OriginalTextCache {
        &self.cache
    }

    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    pub fn take_failures(&mut self) -> Vec<FailureRecord> {
        std::mem::take(&mut self.failures)
    }

    pub fn stats(&self) -> RestoreStats {
        self.stats
    }

    /// Restore every song in file order. Every song is present in the output,
    /// even when none of its lines could be restored.
    pub fn restore_dataset(&mut self, dataset: &Dataset) -> Dataset {
        let restored: Dataset = dataset
            .iter()
            .map(|(id, record)| (id.to_string(), self.restore_song(id, record)))
            .collect();
        tracing::info!(
            songs = self.stats.songs,
            restored = self.stats.restored,
            failed = self.stats.failed,
            "Restoration finished"
        );
        restored
    }

    /// Restore one song. Search positions start from scratch for each song.
    pub fn restore_song(&mut self, song: &str, record: &SongRecord) -> SongRecord {
        let mut states: HashMap<String, MatchState> = HashMap::new();
        let mut restored = record.header();
        let failed_before = self.failures.len();

        for group in &record.lyrics {
            let mut restored_group = Vec::new();
            for segment in group {
                let restored_segment = self.restore_segment(song, record, segment, &mut states);
                if !restored_segment.is_empty() {
                    restored_group.push(restored_segment);
                }
            }
            if !restored_group.is_empty() {
                restored.lyrics.push(restored_group);
            }
        }

        self.stats.songs += 1;
        tracing::info!(
            song,
            groups = restored.lyrics.len(),
            failures = self.failures.len() - failed_before,
            "Restored song"
        );
        restored
    }

    fn restore_segment(
        &mut self,
        song: &str,
        record: &SongRecord,
        segment: &Segment,
        states: &mut HashMap<String, MatchState>,
    ) -> Segment {
        let mut restored = Segment::new();
        for (language, entry) in segment {
            let state = states.get(language.as_str()).cloned().unwrap_or_default();
            match self.restore_entry(song, language, entry.text.as_ref(), state) {
                Ok((text, state)) => {
                    states.insert(language.clone(), state);
                    restored.insert(language.clone(), entry.restored(text));
                    self.stats.restored += 1;
                }
                Err(failure) => self.record_failure(failure, record, entry),
            }
        }
        restored
    }

    /// Restore all clues of one entry, joined by newlines. Either every clue
    /// is found or the entry fails and the language state is left as it was.
    fn restore_entry(
        &mut self,
        song: &str,
        language: &str,
        text: Option<&LyricText>,
        mut state: MatchState,
    ) -> std::result::Result<(String, MatchState), FailureRecord> {
        let clue_parts = match text {
            Some(LyricText::Clues(parts)) if !parts.is_empty() => parts,
            other => {
                let err = ClueError::MalformedClue {
                    parts: Vec::new(),
                    reason: format!("expected a non-empty list of clues, got {}", describe(other)),
                };
                return Err(FailureRecord::from_error(song, language, Vec::new(), &err));
            }
        };

        let units = self
            .units(song, language)
            .map_err(|err| FailureRecord::from_error(song, language, clue_parts[0].clone(), &err))?;
        let strategy = self
            .registry
            .strategy(language)
            .map_err(|err| FailureRecord::from_error(song, language, clue_parts[0].clone(), &err))?;

        let mut lines = Vec::with_capacity(clue_parts.len());
        for parts in clue_parts {
            let fail = |err: &ClueError| FailureRecord::from_error(song, language, parts.clone(), err);
            let clue = Clue::from_parts(parts).map_err(|err| fail(&err))?;
            match strategy.locate(&clue, &units, &state) {
                Ok(Some(found)) => {
                    tracing::debug!(
                        song,
                        language,
                        %clue,
                        last_matched = ?found.state.last_matched,
                        "Matched clue"
                    );
                    lines.push(found.text);
                    state = found.state;
                }
                Ok(None) => {
                    return Err(not_found(song, language, parts, &clue, &units, &state));
                }
                Err(err) => return Err(fail(&err)),
            }
        }
        Ok((lines.join("\n"), state))
    }

    fn units(&mut self, song: &str, language: &str) -> Result<std::sync::Arc<UnitSequence>> {
        let strategy = self.registry.strategy(language)?;
        self.cache
            .units(song, language, strategy, self.source.as_ref())
    }

    fn record_failure(&mut self, failure: FailureRecord, record: &SongRecord, entry: &LanguageEntry) {
        let lyrics_url = record.lyrics_url(&failure.language).map(str::to_string);
        let failure = failure.with_lyrics_url(lyrics_url);
        tracing::warn!(
            song = %failure.song,
            language = %failure.language,
            lyrics_url = failure.lyrics_url.as_deref().unwrap_or("N/A"),
            reason = ?failure.reason,
            clue = ?failure.clue,
            line_number = ?entry.line_number,
            search_start = failure.search_start,
            excerpt = %failure.excerpt,
            total_units = failure.total_units,
            "Could not restore segment"
        );
        self.stats.failed += 1;
        self.failures.push(failure);
    }
}

fn not_found(
    song: &str,
    language: &str,
    parts: &[String],
    clue: &Clue,
    units: &UnitSequence,
    state: &MatchState,
) -> FailureRecord {
    FailureRecord::new(song, language, parts.to_vec(), FailureReason::NotFound)
        .with_search_window(clue, units, state)
}

fn describe(text: Option<&LyricText>) -> &'static str {
    match text {
        None => "no 'text' field",
        Some(LyricText::Plain(_)) => "plain text",
        Some(LyricText::Clues(_)) => "an empty list",
        Some(LyricText::Other(_)) => "an unsupported value",
    }
}
