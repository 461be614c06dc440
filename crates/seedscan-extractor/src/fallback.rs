//! Plain-word fallback
//!
//! Used when no numbered list could be assembled: takes the first words of
//! the text in reading order, ignoring anything that is not purely
//! alphabetic.

use seedscan_core::{is_lowercase_word, Phrase};

/// Lowercase the text and split it into alphabetic words.
///
/// Characters that are neither ASCII alphanumeric nor whitespace become
/// word breaks, so `apple,banana` and `caf\u{e9}` split apart. Tokens
/// holding digits are discarded.
pub fn alphabetic_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| is_lowercase_word(word))
        .map(str::to_string)
        .collect()
}

/// Return the first `phrase_length` alphabetic words, if there are enough
pub fn fallback_extract(text: &str, phrase_length: usize) -> Option<Phrase> {
    let words = alphabetic_words(text);
    tracing::debug!("Fallback found {} alphabetic words", words.len());

    if words.len() < phrase_length {
        return None;
    }

    Some(Phrase::new(words.into_iter().take(phrase_length).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_twelve_words() {
        let text = "apple banana cherry date elderberry fig grape honeydew \
                    kiwi lemon mango nectarine extra words";
        let phrase = fallback_extract(text, 12).unwrap();

        assert_eq!(
            phrase.to_string(),
            "apple banana cherry date elderberry fig grape honeydew kiwi lemon mango nectarine"
        );
    }

    #[test]
    fn test_punctuation_splits_and_numbers_are_dropped() {
        let words = alphabetic_words("1. Apple,Banana  x2 (cherry)\n\tDATE_fig");
        assert_eq!(words, vec!["apple", "banana", "cherry", "date", "fig"]);
    }

    #[test]
    fn test_non_ascii_letters_break_words() {
        let words = alphabetic_words("caf\u{e9} na\u{ef}ve \u{fb01}sh plain");
        assert_eq!(words, vec!["caf", "na", "ve", "sh", "plain"]);
    }

    #[test]
    fn test_accented_word_keeps_its_slot() {
        let text = "one two three four five caf\u{e9} seven eight nine ten eleven twelve";
        let phrase = fallback_extract(text, 12).unwrap();

        assert_eq!(phrase.len(), 12);
        assert_eq!(phrase.words()[5], "caf");
        assert_eq!(phrase.words()[11], "twelve");
    }

    #[test]
    fn test_too_few_words() {
        assert!(fallback_extract("hello world", 12).is_none());
        assert!(fallback_extract("", 12).is_none());
    }
}
