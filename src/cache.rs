use std::{collections::HashMap, sync::Arc};

use super::{
    error::{ClueError, Result},
    pipeline::LanguageStrategy,
    source::SourceText,
    tokenizer::has_family_script,
    types::UnitSequence,
};

#[derive(Debug, Clone)]
pub enum CacheEntry {
    Ready(Arc<UnitSequence>),
    /// Load failed; the reason is replayed on every later lookup.
    Unavailable(String),
}

/// Tokenized originals, loaded at most once per (song, language).
#[derive(Debug, Default)]
pub struct OriginalTextCache {
    entries: HashMap<(String, String), CacheEntry>,
}

impl OriginalTextCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units(
        &mut self,
        song: &str,
        language: &str,
        strategy: &dyn LanguageStrategy,
        source: &dyn SourceText,
    ) -> Result<Arc<UnitSequence>> {
        let key = (song.to_string(), language.to_string());
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| load_entry(song, language, strategy, source));

        match entry {
            CacheEntry::Ready(units) => Ok(Arc::clone(units)),
            CacheEntry::Unavailable(reason) => Err(ClueError::SourceUnavailable {
                song: song.to_string(),
                language: language.to_string(),
                reason: reason.clone(),
            }),
        }
    }

    pub fn get(&self, song: &str, language: &str) -> Option<&CacheEntry> {
        self.entries.get(&(song.to_string(), language.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn load_entry(
    song: &str,
    language: &str,
    strategy: &dyn LanguageStrategy,
    source: &dyn SourceText,
) -> CacheEntry {
    let raw = match source.load(song, language) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(song, language, "Original lyrics unavailable: {err}");
            return CacheEntry::Unavailable(err.to_string());
        }
    };

    let family = strategy.family();
    if !raw.trim().is_empty() && !has_family_script(&raw, family) {
        tracing::warn!(
            song,
            language,
            %family,
            "Original lyrics contain no characters of the expected script"
        );
    }

    let units = strategy.tokenize(&raw);
    tracing::debug!(
        song,
        language,
        units = units.len(),
        kind = units.kind(),
        "Loaded original lyrics"
    );
    CacheEntry::Ready(Arc::new(units))
}
