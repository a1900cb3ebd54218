use super::{
    super::{
        clue::Clue,
        encoder::{encode_japanese, encode_words},
        error::Result,
        locate::{locate_chars, locate_korean, locate_words},
        tokenizer::{tokenize_chars, tokenize_words},
        types::{LanguageFamily, Match, MatchState, UnitSequence},
    },
    LanguageStrategy,
};

/// Latin-script languages: words, leftmost-first search.
pub struct WordStrategy;

impl LanguageStrategy for WordStrategy {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Latin
    }

    fn tokenize(&self, raw: &str) -> UnitSequence {
        UnitSequence::Words(tokenize_words(raw))
    }

    fn encode(&self, line: &str) -> Option<Clue> {
        encode_words(line)
    }

    fn locate(&self, clue: &Clue, units: &UnitSequence, state: &MatchState) -> Result<Option<Match>> {
        Ok(locate_words(clue, units.as_words()?, state))
    }
}

/// Korean: words, with carry-over of partially matched words.
pub struct KoreanStrategy;

impl LanguageStrategy for KoreanStrategy {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Korean
    }

    fn tokenize(&self, raw: &str) -> UnitSequence {
        UnitSequence::Words(tokenize_words(raw))
    }

    fn encode(&self, line: &str) -> Option<Clue> {
        encode_words(line)
    }

    fn locate(&self, clue: &Clue, units: &UnitSequence, state: &MatchState) -> Result<Option<Match>> {
        Ok(locate_korean(clue, units.as_words()?, state))
    }
}

/// Japanese: characters, grouped by three.
pub struct JapaneseStrategy;

impl LanguageStrategy for JapaneseStrategy {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Japanese
    }

    fn tokenize(&self, raw: &str) -> UnitSequence {
        UnitSequence::Chars(tokenize_chars(raw))
    }

    fn encode(&self, line: &str) -> Option<Clue> {
        encode_japanese(line)
    }

    fn locate(&self, clue: &Clue, units: &UnitSequence, state: &MatchState) -> Result<Option<Match>> {
        Ok(locate_chars(clue, units.as_chars()?, state))
    }
}
