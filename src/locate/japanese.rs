use crate::{
    clue::Clue,
    encoder::JAPANESE_GROUP_LEN,
    types::{Match, MatchState},
};

/// Longest group tried as a first or last group at each offset.
pub const MAX_GROUP_LEN: usize = JAPANESE_GROUP_LEN;

/// Search a Japanese clue over the character stream of the original lyrics.
///
/// The whole window is first scanned for a span whose re-chunked groups of 3
/// spell the acronym. Only when none exists is it scanned again accepting
/// drifted group boundaries. Within a pass, candidates are visited by start
/// offset, first-group length, end offset, then last-group length.
pub fn locate_chars(clue: &Clue, chars: &[char], state: &MatchState) -> Option<Match> {
    let clue = clue.normalized();
    let acronym: Vec<char> = clue.acronym().chars().collect();
    let first: Vec<char> = clue.first().chars().collect();
    let last: Vec<char> = clue.last().chars().collect();
    if acronym.is_empty() || first.is_empty() || last.is_empty() {
        return None;
    }

    let query = CharQuery {
        acronym: &acronym,
        first: &first,
        last: &last,
    };
    query
        .scan(chars, state, Validation::Chunked)
        .or_else(|| query.scan(chars, state, Validation::Drifted))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Validation {
    /// Groups of 3 from the span start, as the encoder cuts them.
    Chunked,
    /// Any split into `len(acronym)` groups of 1 to 3 characters.
    Drifted,
}

struct CharQuery<'a> {
    acronym: &'a [char],
    first: &'a [char],
    last: &'a [char],
}

impl CharQuery<'_> {
    fn scan(&self, chars: &[char], state: &MatchState, validation: Validation) -> Option<Match> {
        let n = chars.len();
        let max_span = self.acronym.len() * MAX_GROUP_LEN;

        for i in state.search_start()..n {
            for first_len in 1..=MAX_GROUP_LEN {
                if i + first_len > n || chars[i..i + first_len] != self.first[..] {
                    continue;
                }

                if self.first == self.last && self.acronym == [chars[i]] {
                    let end = i + first_len - 1;
                    return Some(Match::new(collect(&chars[i..=end]), MatchState::at(end, "")));
                }

                for j in i + first_len..n {
                    if j + 1 - i > max_span {
                        break;
                    }
                    for last_len in 1..=MAX_GROUP_LEN {
                        if j + last_len > n || chars[j..j + last_len] != self.last[..] {
                            continue;
                        }
                        let span = &chars[i..j + last_len];
                        if self.fits(span, first_len, last_len, validation) {
                            let end = j + last_len - 1;
                            return Some(Match::new(collect(span), MatchState::at(end, "")));
                        }
                    }
                }
            }
        }
        None
    }

    fn fits(&self, span: &[char], first_len: usize, last_len: usize, validation: Validation) -> bool {
        match validation {
            Validation::Chunked => span
                .chunks(MAX_GROUP_LEN)
                .map(|group| group[0])
                .eq(self.acronym.iter().copied()),
            Validation::Drifted => drifted_partition_fits(span, self.acronym, first_len, last_len),
        }
    }
}

fn drifted_partition_fits(
    span: &[char],
    acronym: &[char],
    first_len: usize,
    last_len: usize,
) -> bool {
    let groups = acronym.len();
    if groups < 2 || span.len() < first_len + last_len {
        return false;
    }
    let tail = span.len() - last_len;
    if span[0] != acronym[0] || span[tail] != acronym[groups - 1] {
        return false;
    }

    // reachable[p]: the middle groups placed so far end exactly at offset p
    let mut reachable = vec![false; tail + 1];
    reachable[first_len] = true;
    for &initial in &acronym[1..groups - 1] {
        let mut next = vec![false; tail + 1];
        for pos in (0..tail).filter(|&p| reachable[p] && span[p] == initial) {
            for len in 1..=MAX_GROUP_LEN {
                if pos + len <= tail {
                    next[pos + len] = true;
                }
            }
        }
        reachable = next;
    }
    reachable[tail]
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}
