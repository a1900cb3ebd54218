use unicode_script::{Script as UniScript, UnicodeScript};

use crate::types::LanguageFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentScript {
    Han,
    Kana,
    Hangul,
    Latin,
    Other,
}

pub fn classify_script(c: char) -> SegmentScript {
    match c.script() {
        UniScript::Han => SegmentScript::Han,
        UniScript::Hiragana | UniScript::Katakana => SegmentScript::Kana,
        UniScript::Hangul => SegmentScript::Hangul,
        UniScript::Latin => SegmentScript::Latin,
        _ => SegmentScript::Other,
    }
}

/// Whether `text` contains at least one character written in a script the
/// family is expected to use. Used to flag source files that were scraped
/// from the wrong page.
pub fn has_family_script(text: &str, family: LanguageFamily) -> bool {
    text.chars().map(classify_script).any(|script| match family {
        LanguageFamily::Latin => script == SegmentScript::Latin,
        LanguageFamily::Korean => script == SegmentScript::Hangul,
        LanguageFamily::Japanese => matches!(script, SegmentScript::Kana | SegmentScript::Han),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_scripts() {
        assert_eq!(classify_script('あ'), SegmentScript::Kana);
        assert_eq!(classify_script('カ'), SegmentScript::Kana);
        assert_eq!(classify_script('愛'), SegmentScript::Han);
        assert_eq!(classify_script('사'), SegmentScript::Hangul);
        assert_eq!(classify_script('é'), SegmentScript::Latin);
        assert_eq!(classify_script('!'), SegmentScript::Other);
    }

    #[test]
    fn detects_family_scripts() {
        assert!(has_family_script("사랑해 baby", LanguageFamily::Korean));
        assert!(!has_family_script("only english", LanguageFamily::Korean));
        assert!(has_family_script("愛してる", LanguageFamily::Japanese));
        assert!(has_family_script("señor", LanguageFamily::Latin));
    }
}
