use unicode_segmentation::UnicodeSegmentation;

/// The token used both as a word separator and as a standalone word.
pub const SPACE: &str = " ";

/// Characters that scramble leaves untouched when punctuation is preserved.
pub const PUNCTUATION: &[&str] = &[".", ",", "!", "?", ";", ":", "'", "\"", "-", "(", ")", "[", "]", "{", "}"];

/// A text split into characters and into words.
///
/// Both sequences borrow from the original text. Concatenating `words` always yields the
/// original text back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSplit<'a> {
    /// Extended grapheme clusters, in order.
    pub chars: Vec<&'a str>,

    /// Runs of non-space characters, with each space as its own token.
    pub words: Vec<&'a str>,

    pub char_indices: Vec<usize>,
    pub word_indices: Vec<usize>,
}

impl<'a> TextSplit<'a> {
    pub fn new(text: &'a str) -> Self {
        let chars: Vec<&str> = text.graphemes(true).collect();
        let mut words = Vec::new();
        let mut word_start = 0;
        // Each space is its own word even when a combining mark follows it.
        for (offset, c) in text.char_indices() {
            if c == ' ' {
                if word_start < offset {
                    words.push(&text[word_start..offset]);
                }
                words.push(&text[offset..offset + SPACE.len()]);
                word_start = offset + SPACE.len();
            }
        }
        if word_start < text.len() {
            words.push(&text[word_start..]);
        }

        let char_indices = (0..chars.len()).collect();
        let word_indices = (0..words.len()).collect();
        Self { chars, words, char_indices, word_indices }
    }

    /// Number of characters that are not a space.
    pub fn non_space_chars(&self) -> usize {
        self.chars.iter().filter(|c| !is_space(c)).count()
    }

    /// Number of words that are not a space token.
    pub fn non_space_words(&self) -> usize {
        self.words.iter().filter(|w| !is_space(w)).count()
    }
}

/// Split `text` into characters and words.
pub fn split_text(text: &str) -> TextSplit<'_> {
    TextSplit::new(text)
}

/// Whether a unit is exactly one space.
pub fn is_space(unit: &str) -> bool {
    unit == SPACE
}

pub fn is_punctuation(unit: &str) -> bool {
    PUNCTUATION.contains(&unit)
}

/// Whether a character must keep its value instead of scrambling.
pub fn should_preserve(unit: &str, preserve_spaces: bool, preserve_punctuation: bool) -> bool {
    (preserve_spaces && is_space(unit)) || (preserve_punctuation && is_punctuation(unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn single_space() {
        let split = split_text("a b");
        assert_eq!(split.chars, vec!["a", " ", "b"]);
        assert_eq!(split.words, vec!["a", " ", "b"]);
        assert_eq!(split.char_indices, vec![0, 1, 2]);
        assert_eq!(split.word_indices, vec![0, 1, 2]);
    }

    #[test]
    fn empty() {
        let split = split_text("");
        assert!(split.chars.is_empty());
        assert!(split.words.is_empty());
    }

    #[rstest]
    #[case("  lead", vec![" ", " ", "lead"])]
    #[case("trail  ", vec!["trail", " ", " "])]
    #[case("two  gaps", vec!["two", " ", " ", "gaps"])]
    #[case("Second Order Thinking", vec!["Second", " ", "Order", " ", "Thinking"])]
    #[case(" ", vec![" "])]
    #[case("a \u{301}b", vec!["a", " ", "\u{301}b"])]
    fn space_tokens(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_text(text).words, expected);
    }

    #[rstest]
    #[case("")]
    #[case("hello")]
    #[case("  spaced   out ")]
    #[case("tab\tis not a space")]
    #[case("café crème")]
    #[case("flags 🇦🇷🇧🇷 and é")]
    #[case("a \u{301}b")]
    fn words_reconstruct_text(#[case] text: &str) {
        assert_eq!(split_text(text).words.concat(), text);
        assert_eq!(split_text(text).chars.concat(), text);
    }

    #[test]
    fn graphemes_are_not_code_points() {
        // "e" followed by a combining acute accent, and a two code point flag.
        let split = split_text("e\u{301}🇦🇷");
        assert_eq!(split.chars, vec!["e\u{301}", "🇦🇷"]);
    }

    #[test]
    fn non_space_counts() {
        let split = split_text(" ab c ");
        assert_eq!(split.non_space_chars(), 3);
        assert_eq!(split.non_space_words(), 2);
    }

    #[rstest]
    #[case(" ", true, false, true)]
    #[case(" ", false, true, false)]
    #[case(".", false, true, true)]
    #[case("}", false, true, true)]
    #[case(".", true, false, false)]
    #[case("a", true, true, false)]
    #[case("@", true, true, false)]
    fn preserve(#[case] unit: &str, #[case] spaces: bool, #[case] punctuation: bool, #[case] expected: bool) {
        assert_eq!(should_preserve(unit, spaces, punctuation), expected);
    }
}
