use super::{
    clue::Clue,
    tokenizer::{merge_special_only, split_words, tokenize_chars, trim_special},
    types::LanguageFamily,
};

pub const JAPANESE_GROUP_LEN: usize = 3;

/// Encode every non-empty line of `text`, in order.
pub fn encode_text(text: &str, family: LanguageFamily) -> Vec<Clue> {
    text.trim()
        .split('\n')
        .filter_map(|line| encode_line(line, family))
        .collect()
}

/// Encode a single line; `None` when nothing is left after normalization.
pub fn encode_line(line: &str, family: LanguageFamily) -> Option<Clue> {
    match family {
        LanguageFamily::Latin | LanguageFamily::Korean => encode_words(line),
        LanguageFamily::Japanese => encode_japanese(line),
    }
}

/// Word families: acronym of word initials plus the first and last word.
pub fn encode_words(line: &str) -> Option<Clue> {
    let words = merge_special_only(
        split_words(line)
            .iter()
            .map(|word| trim_special(word).to_string()),
    );

    match words.as_slice() {
        [] => None,
        [only] => {
            let initial = only.chars().next()?;
            Some(Clue::pair(initial.to_string(), only.as_str()))
        }
        [first, .., last] => {
            let acronym: String = words.iter().filter_map(|w| w.chars().next()).collect();
            Some(Clue::triple(acronym, first.as_str(), last.as_str()))
        }
    }
}

/// Japanese: characters grouped by three, acronym of group initials.
pub fn encode_japanese(line: &str) -> Option<Clue> {
    let chars = tokenize_chars(line);
    let groups: Vec<&[char]> = chars.chunks(JAPANESE_GROUP_LEN).collect();
    let first = groups.first()?;
    let last = groups.last()?;
    let acronym: String = groups.iter().map(|g| g[0]).collect();
    Some(Clue::triple(
        acronym,
        first.iter().collect::<String>(),
        last.iter().collect::<String>(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_latin_line() {
        let clue = encode_line(
            "Remember me though I have to say goodbye",
            LanguageFamily::Latin,
        );
        assert_eq!(clue, Some(Clue::triple("RmtIhtsg", "Remember", "goodbye")));
    }

    #[test]
    fn encodes_single_word_line_as_pair() {
        assert_eq!(
            encode_line("Hello", LanguageFamily::Latin),
            Some(Clue::pair("H", "Hello"))
        );
        assert_eq!(
            encode_line("  \"Hello!\"  ", LanguageFamily::Latin),
            Some(Clue::pair("H", "Hello"))
        );
    }

    #[test]
    fn trims_punctuation_around_words() {
        let clue = encode_line("\"Oh, my love\" (yeah)", LanguageFamily::Latin);
        assert_eq!(clue, Some(Clue::triple("Omly", "Oh", "yeah")));
    }

    #[test]
    fn keeps_leading_punctuation_unit() {
        assert_eq!(
            encode_line("- the end", LanguageFamily::Latin),
            Some(Clue::triple("-te", "-", "end"))
        );
    }

    #[test]
    fn skips_empty_lines() {
        assert_eq!(encode_line("   ", LanguageFamily::Latin), None);
        assert_eq!(encode_line("\u{200b}\u{3000}", LanguageFamily::Japanese), None);
        let clues = encode_text("first line\n\n\nsecond\n", LanguageFamily::Latin);
        assert_eq!(
            clues,
            vec![Clue::triple("fl", "first", "line"), Clue::pair("s", "second")]
        );
    }

    #[test]
    fn korean_uses_word_encoding() {
        assert_eq!(
            encode_line("너를 사랑해", LanguageFamily::Korean),
            Some(Clue::triple("너사", "너를", "사랑해"))
        );
    }

    #[test]
    fn encodes_japanese_in_groups_of_three() {
        assert_eq!(
            encode_line("こんにちは", LanguageFamily::Japanese),
            Some(Clue::triple("こち", "こんに", "ちは"))
        );
        assert_eq!(
            encode_line("君の 名は。", LanguageFamily::Japanese),
            Some(Clue::triple("君は", "君の名", "は。"))
        );
        assert_eq!(
            encode_line("愛", LanguageFamily::Japanese),
            Some(Clue::triple("愛", "愛", "愛"))
        );
    }
}
