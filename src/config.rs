use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use super::{
    error::{ClueError, Result},
    pipeline::LanguageRegistry,
    source::FsSourceText,
    types::LanguageFamily,
};

pub const DEFAULT_INPUT: &str = "mavl_dataset.json";
pub const DEFAULT_SOURCE_DIR: &str = "mavl_datasets";
pub const DEFAULT_OUTPUT: &str = "mavl_dataset_restored.json";
pub const DEFAULT_FAILURE_LOG: &str = "restore_lyrics_failures.jsonl";
pub const DEFAULT_ENCODE_OUTPUT: &str = "copyright_protected_lyrics.json";

/// Run configuration, read from TOML. Missing keys keep their defaults.
///
/// ```toml
/// source_dir = "/data/lyrics"
///
/// [languages]
/// DE = "latin"
///
/// [aliases]
/// ES_og = "ES"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dataset read by `restore` (clues) and `encode` (plain text).
    pub input: PathBuf,
    /// Root of `<song>/<language>/lyrics.txt`.
    pub source_dir: PathBuf,
    pub output: PathBuf,
    pub failure_log: PathBuf,
    pub encode_output: PathBuf,
    /// Language codes added to the stock table, or moved to another family.
    pub languages: BTreeMap<String, LanguageFamily>,
    /// Extra code to directory mappings on top of `US_og` -> `US`.
    pub aliases: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            failure_log: PathBuf::from(DEFAULT_FAILURE_LOG),
            encode_output: PathBuf::from(DEFAULT_ENCODE_OUTPUT),
            languages: BTreeMap::new(),
            aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ClueError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Defaults when no file was given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn registry(&self) -> LanguageRegistry {
        let mut registry = LanguageRegistry::default();
        for (code, family) in &self.languages {
            registry.register(code.as_str(), *family);
        }
        registry
    }

    pub fn source(&self) -> FsSourceText {
        FsSourceText::new(&self.source_dir).with_aliases(self.aliases.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_dataset_tooling() {
        let config = Config::default();
        assert_eq!(config.input, PathBuf::from("mavl_dataset.json"));
        assert_eq!(config.source_dir, PathBuf::from("mavl_datasets"));
        assert_eq!(config.output, PathBuf::from("mavl_dataset_restored.json"));
        assert_eq!(config.encode_output, PathBuf::from("copyright_protected_lyrics.json"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            source_dir = "/data/lyrics"

            [languages]
            DE = "latin"
            JA = "japanese"

            [aliases]
            ES_og = "ES"
            "#,
        )
        .unwrap();
        assert_eq!(config.source_dir, PathBuf::from("/data/lyrics"));
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));

        let registry = config.registry();
        assert_eq!(registry.strategy("DE").unwrap().family(), LanguageFamily::Latin);
        assert_eq!(registry.strategy("JA").unwrap().family(), LanguageFamily::Japanese);
        assert!(registry.strategy("KR").is_ok());

        let source = config.source();
        assert_eq!(source.component("ES_og"), "ES");
        assert_eq!(source.component("US_og"), "US");
    }

    #[test]
    fn rejects_unknown_keys_and_families() {
        assert!(Config::from_toml_str("inptu = \"x.json\"").is_err());
        assert!(Config::from_toml_str("[languages]\nXX = \"klingon\"").is_err());
    }

    #[test]
    fn loads_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("lyric-clues.toml");
        fs::write(&path, "output = \"out.json\"\n").unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.output, PathBuf::from("out.json"));
        assert!(Config::load(&temp_dir.path().join("missing.toml")).is_err());
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
