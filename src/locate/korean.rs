use std::iter;

use super::{CluePart, acronym_fits};
use crate::{
    clue::Clue,
    types::{Match, MatchState},
};

/// Word search with carry-over of split words.
///
/// Korean lines often end mid-word in the clue (`사랑한` for `사랑한다`). The
/// unconsumed tail is handed to the next clue through
/// [`MatchState::remainder`] and may open the next span.
pub fn locate_korean(clue: &Clue, words: &[String], state: &MatchState) -> Option<Match> {
    let clue = clue.normalized_words();
    let first = CluePart::new(clue.first());
    let last = CluePart::new(clue.last());
    let acronym: Vec<char> = clue.acronym().chars().collect();
    if acronym.is_empty() {
        return None;
    }
    let single = acronym.len() == 1 && first.same_key(&last);
    let start = state.search_start();

    if !state.remainder.is_empty() {
        let found = from_remainder(&first, &last, &acronym, single, words, state);
        if found.is_some() {
            return found;
        }
    }

    if single {
        if let Some((prefix, rest)) = words.get(start).and_then(|w| last.split_prefix(w)) {
            if acronym_fits(&acronym, [prefix]) {
                return Some(Match::new(prefix.to_string(), MatchState::at(start, rest)));
            }
        }
    }

    for i in start..words.len() {
        if !first.matches(&words[i]) {
            continue;
        }
        if single {
            if acronym_fits(&acronym, [words[i].as_str()]) {
                return Some(Match::new(words[i].clone(), MatchState::at(i, "")));
            }
            continue;
        }
        if acronym.len() < 2 {
            return None;
        }

        let j = i + acronym.len() - 1;
        let end_word = words.get(j)?;
        let Some((piece, rest)) = last.match_end(end_word) else {
            continue;
        };
        let span = words[i..j].iter().map(String::as_str).chain(iter::once(piece));
        if acronym_fits(&acronym, span.clone()) {
            let text = span.collect::<Vec<_>>().join(" ");
            return Some(Match::new(text, MatchState::at(j, rest)));
        }
    }
    None
}

/// Try to open the span with the leftover of the previous split word. The
/// word cursor stays where it is unless the span reaches into later words.
fn from_remainder(
    first: &CluePart<'_>,
    last: &CluePart<'_>,
    acronym: &[char],
    single: bool,
    words: &[String],
    state: &MatchState,
) -> Option<Match> {
    let remainder = state.remainder.as_str();
    let start = state.search_start();

    if first.matches(remainder) {
        if single {
            return acronym_fits(acronym, [remainder]).then(|| {
                Match::new(
                    remainder.to_string(),
                    MatchState {
                        last_matched: state.last_matched,
                        remainder: String::new(),
                    },
                )
            });
        }
        if acronym.len() < 2 {
            return None;
        }
        let j = start + acronym.len() - 2;
        let (piece, rest) = last.match_end(words.get(j)?)?;
        let span = iter::once(remainder)
            .chain(words[start..j].iter().map(String::as_str))
            .chain(iter::once(piece));
        if !acronym_fits(acronym, span.clone()) {
            return None;
        }
        let text = span.collect::<Vec<_>>().join(" ");
        return Some(Match::new(text, MatchState::at(j, rest)));
    }

    if single {
        let (prefix, rest) = first.split_prefix(remainder)?;
        if acronym_fits(acronym, [prefix]) {
            return Some(Match::new(
                prefix.to_string(),
                MatchState {
                    last_matched: state.last_matched,
                    remainder: rest.to_string(),
                },
            ));
        }
    }
    None
}
