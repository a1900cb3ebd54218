use super::{CluePart, acronym_fits};
use crate::{
    clue::Clue,
    types::{Match, MatchState},
};

/// Leftmost-first search of a word clue.
///
/// A span validates only when it holds one word per acronym character, so
/// for a start `i` the sole candidate end is `i + len(acronym) - 1`.
pub fn locate_words(clue: &Clue, words: &[String], state: &MatchState) -> Option<Match> {
    let clue = clue.normalized_words();
    let first = CluePart::new(clue.first());
    let last = CluePart::new(clue.last());
    let acronym: Vec<char> = clue.acronym().chars().collect();
    if acronym.is_empty() {
        return None;
    }

    for i in state.search_start()..words.len() {
        if !first.matches(&words[i]) {
            continue;
        }
        let j = i + acronym.len() - 1;
        let Some(end_word) = words.get(j) else {
            // Every later start has an even later end.
            return None;
        };
        if !last.matches(end_word) {
            continue;
        }
        let span = &words[i..=j];
        if acronym_fits(&acronym, span.iter().map(String::as_str)) {
            return Some(Match::new(span.join(" "), MatchState::at(j, "")));
        }
    }
    None
}
