use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use super::error::{ClueError, Result};

pub const LYRICS_FILE_NAME: &str = "lyrics.txt";

/// Provider of the raw original lyrics of a song in one language.
pub trait SourceText {
    fn load(&self, song: &str, language: &str) -> Result<String>;
}

/// Lyrics laid out on disk as `<base>/<song>/<component>/lyrics.txt`.
///
/// `component` is the language code unless an alias maps it elsewhere
/// (`US_og` reads the `US` directory).
#[derive(Debug, Clone)]
pub struct FsSourceText {
    base_dir: PathBuf,
    aliases: BTreeMap<String, String>,
}

impl FsSourceText {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            aliases: default_aliases(),
        }
    }

    pub fn with_alias(mut self, code: impl Into<String>, component: impl Into<String>) -> Self {
        self.aliases.insert(code.into(), component.into());
        self
    }

    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.aliases
            .extend(aliases.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn component<'a>(&'a self, language: &'a str) -> &'a str {
        self.aliases
            .get(language)
            .map_or(language, String::as_str)
    }

    pub fn lyrics_path(&self, song: &str, language: &str) -> PathBuf {
        self.base_dir
            .join(song)
            .join(self.component(language))
            .join(LYRICS_FILE_NAME)
    }
}

impl SourceText for FsSourceText {
    fn load(&self, song: &str, language: &str) -> Result<String> {
        let path = self.lyrics_path(song, language);
        fs::read_to_string(&path).map_err(|source| ClueError::Read { path, source })
    }
}

/// In-memory lyrics keyed by (song, language).
#[derive(Debug, Clone, Default)]
pub struct MemorySourceText {
    lyrics: HashMap<(String, String), String>,
}

impl MemorySourceText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lyrics(
        mut self,
        song: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(song, language, text);
        self
    }

    pub fn insert(
        &mut self,
        song: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.lyrics
            .insert((song.into(), language.into()), text.into());
    }
}

impl SourceText for MemorySourceText {
    fn load(&self, song: &str, language: &str) -> Result<String> {
        self.lyrics
            .get(&(song.to_string(), language.to_string()))
            .cloned()
            .ok_or_else(|| ClueError::SourceUnavailable {
                song: song.to_string(),
                language: language.to_string(),
                reason: "no lyrics registered".to_string(),
            })
    }
}

pub fn default_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([("US_og".to_string(), "US".to_string())])
}
