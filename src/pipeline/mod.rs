use std::collections::{BTreeMap, HashMap};

mod strategies;

pub use strategies::{JapaneseStrategy, KoreanStrategy, WordStrategy};

use super::{
    clue::Clue,
    error::{ClueError, Result},
    types::{LanguageFamily, Match, MatchState, UnitSequence},
};

/// Per-family behavior: how originals are tokenized, how a line is turned
/// into a clue and how a clue is found again.
pub trait LanguageStrategy: Send + Sync {
    fn family(&self) -> LanguageFamily;

    fn tokenize(&self, raw: &str) -> UnitSequence;

    fn encode(&self, line: &str) -> Option<Clue>;

    /// `Ok(None)` when the clue cannot be found; errors only for units of the
    /// wrong kind.
    fn locate(&self, clue: &Clue, units: &UnitSequence, state: &MatchState)
    -> Result<Option<Match>>;
}

/// Language code to family table, plus one strategy per family.
pub struct LanguageRegistry {
    codes: BTreeMap<String, LanguageFamily>,
    strategies: HashMap<LanguageFamily, Box<dyn LanguageStrategy>>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
            .register_family_strategy(WordStrategy)
            .register_family_strategy(KoreanStrategy)
            .register_family_strategy(JapaneseStrategy)
            .with_language("US", LanguageFamily::Latin)
            .with_language("US_og", LanguageFamily::Latin)
            .with_language("ES", LanguageFamily::Latin)
            .with_language("FR", LanguageFamily::Latin)
            .with_language("KR", LanguageFamily::Korean)
            .with_language("JP", LanguageFamily::Japanese)
    }
}

impl LanguageRegistry {
    /// Empty registry; see [`LanguageRegistry::default`] for the stock table.
    pub fn new() -> Self {
        Self {
            codes: BTreeMap::new(),
            strategies: HashMap::new(),
        }
    }

    pub fn register_family_strategy<T>(mut self, strategy: T) -> Self
    where
        T: LanguageStrategy + 'static,
    {
        self.strategies.insert(strategy.family(), Box::new(strategy));
        self
    }

    pub fn with_language(mut self, code: impl Into<String>, family: LanguageFamily) -> Self {
        self.register(code, family);
        self
    }

    pub fn register(&mut self, code: impl Into<String>, family: LanguageFamily) {
        self.codes.insert(code.into(), family);
    }

    pub fn family(&self, code: &str) -> Option<LanguageFamily> {
        self.codes.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    pub fn strategy(&self, code: &str) -> Result<&dyn LanguageStrategy> {
        self.family(code)
            .and_then(|family| self.strategies.get(&family))
            .map(|strategy| &**strategy)
            .ok_or_else(|| ClueError::UnknownLanguage(code.to_string()))
    }

    /// Registered codes in lexical order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_dataset_languages() {
        let registry = LanguageRegistry::default();
        for (code, family) in [
            ("US", LanguageFamily::Latin),
            ("US_og", LanguageFamily::Latin),
            ("ES", LanguageFamily::Latin),
            ("FR", LanguageFamily::Latin),
            ("KR", LanguageFamily::Korean),
            ("JP", LanguageFamily::Japanese),
        ] {
            assert_eq!(registry.strategy(code).unwrap().family(), family, "code {code}");
        }
        assert_eq!(registry.codes().count(), 6);
    }

    #[test]
    fn unknown_codes_are_errors() {
        let registry = LanguageRegistry::default();
        assert!(matches!(
            registry.strategy("CN"),
            Err(ClueError::UnknownLanguage(code)) if code == "CN"
        ));
        assert!(registry.strategy("us").is_err());
    }

    #[test]
    fn extra_codes_reuse_family_strategies() {
        let mut registry = LanguageRegistry::default();
        registry.register("DE", LanguageFamily::Latin);
        assert_eq!(registry.strategy("DE").unwrap().family(), LanguageFamily::Latin);
    }

    #[test]
    fn code_without_family_strategy_is_unknown() {
        let registry = LanguageRegistry::new()
            .register_family_strategy(WordStrategy)
            .with_language("JP", LanguageFamily::Japanese);
        assert!(registry.strategy("JP").is_err());
    }
}
