//! Candidate collection
//!
//! Scans OCR text for numeral/word pairs using one pattern per numbering
//! style. Styles are tried independently and in a fixed order: each pass
//! starts from an empty candidate set, and the first pass that recovers
//! every position wins. When none does, the last pass tried is returned
//! even if an earlier one found more, since later styles are the more
//! specific ones.

use regex::Regex;

use seedscan_core::{Candidate, CandidateSet, NumberingStyle, PHRASE_LENGTH};

/// Regex for a numbering style.
///
/// Group 1 is the numeral, group 2 the word. Letters are matched as
/// explicit ASCII ranges so case folding never admits non-ASCII lookalikes.
fn style_pattern(style: NumberingStyle) -> &'static str {
    match style {
        NumberingStyle::Spaced => r"([0-9]+)\s+([A-Za-z]+)",
        NumberingStyle::Dotted => r"([0-9]+)\.\s*([A-Za-z]+)",
        NumberingStyle::Parenthesized => r"([0-9]+)\)\s*([A-Za-z]+)",
    }
}

/// Candidates recovered by a single style pass
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Style whose pass produced `candidates`
    pub style: Option<NumberingStyle>,
    pub candidates: CandidateSet,
}

/// Multi-style numbered list scanner
pub struct NumberedListCollector {
    /// Compiled patterns in priority order
    strategies: Vec<(NumberingStyle, Regex)>,
    /// Highest accepted numeral, and the early-exit threshold
    max_position: u32,
}

impl NumberedListCollector {
    /// Create a collector for the canonical 12-word list
    pub fn new() -> Self {
        Self::with_length(PHRASE_LENGTH as u32)
    }

    /// Create a collector accepting numerals in `[1, max_position]`
    pub fn with_length(max_position: u32) -> Self {
        let mut collector = Self {
            strategies: Vec::new(),
            max_position,
        };

        for style in NumberingStyle::ALL {
            collector.add_strategy(style);
        }
        collector
    }

    /// Add a style pattern
    fn add_strategy(&mut self, style: NumberingStyle) {
        if let Ok(regex) = Regex::new(style_pattern(style)) {
            self.strategies.push((style, regex));
        }
    }

    /// Styles this collector will try, in order
    pub fn styles(&self) -> Vec<NumberingStyle> {
        self.strategies.iter().map(|(style, _)| *style).collect()
    }

    /// Run one style over the whole text
    pub fn scan(&self, style: NumberingStyle, text: &str) -> CandidateSet {
        let mut candidates = CandidateSet::new();

        let Some((_, regex)) = self.strategies.iter().find(|(s, _)| *s == style) else {
            return candidates;
        };

        for caps in regex.captures_iter(text) {
            // Numerals too large for u32 are out of range anyway
            let Ok(position) = caps[1].parse::<u32>() else {
                continue;
            };
            if let Some(candidate) = Candidate::new(position, &caps[2], self.max_position) {
                candidates.insert(candidate);
            }
        }

        candidates
    }

    /// Collect candidates, reporting which style produced them
    pub fn collect_detailed(&self, text: &str) -> Collection {
        let mut last = Collection::default();

        for (style, _) in &self.strategies {
            let candidates = self.scan(*style, text);
            tracing::debug!(
                "Style {} recovered {} positions",
                style,
                candidates.len()
            );

            let complete = candidates.len() >= self.max_position as usize;
            last = Collection {
                style: Some(*style),
                candidates,
            };
            if complete {
                break;
            }
        }

        last
    }

    /// Collect candidates from OCR text
    pub fn collect(&self, text: &str) -> CandidateSet {
        self.collect_detailed(text).candidates
    }
}

impl Default for NumberedListCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect candidates with the canonical 12-word collector
pub fn collect(text: &str) -> CandidateSet {
    NumberedListCollector::new().collect(text)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SPACED: &str = "1 alpha 2 beta 3 gamma 4 delta 5 echo 6 foxtrot \
                          7 golf 8 hotel 9 india 10 juliet 11 kilo 12 lima";

    #[test]
    fn test_spaced_list_short_circuits() {
        let collection = NumberedListCollector::new().collect_detailed(SPACED);

        assert_eq!(collection.style, Some(NumberingStyle::Spaced));
        assert_eq!(collection.candidates.len(), 12);
        assert_eq!(collection.candidates.get(1), Some("alpha"));
        assert_eq!(collection.candidates.get(10), Some("juliet"));
        assert_eq!(collection.candidates.get(12), Some("lima"));
    }

    #[test]
    fn test_dotted_list() {
        let text = "1. Apple! 2. Banana? 3.cherry 4. date 5. elder 6. fig \
                    7. grape 8. honey 9. kiwi 10. lemon 11. mango 12. nectar";
        let collection = NumberedListCollector::new().collect_detailed(text);

        assert_eq!(collection.style, Some(NumberingStyle::Dotted));
        assert_eq!(collection.candidates.len(), 12);
        assert_eq!(collection.candidates.get(1), Some("apple"));
        assert_eq!(collection.candidates.get(2), Some("banana"));
        assert_eq!(collection.candidates.get(3), Some("cherry"));
    }

    #[test]
    fn test_parenthesized_list() {
        let text = "1) one 2) two 3) three 4) four 5) five 6) six \
                    7) seven 8) eight 9) nine 10) ten 11) eleven 12)twelve";
        let collection = NumberedListCollector::new().collect_detailed(text);

        assert_eq!(collection.style, Some(NumberingStyle::Parenthesized));
        assert_eq!(collection.candidates.len(), 12);
        assert_eq!(collection.candidates.get(12), Some("twelve"));
    }

    #[test]
    fn test_out_of_range_numerals_are_dropped() {
        let collector = NumberedListCollector::new();
        let set = collector.scan(
            NumberingStyle::Spaced,
            "0 zero 13 thirteen 99999999999999999999 huge 4 four",
        );

        assert_eq!(set.positions(), vec![4]);
        assert_eq!(set.get(4), Some("four"));
    }

    #[test]
    fn test_first_occurrence_wins_within_style() {
        let collector = NumberedListCollector::new();
        let set = collector.scan(NumberingStyle::Spaced, "3 first 3 second 3 third");

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(3), Some("first"));
    }

    #[test]
    fn test_styles_do_not_merge() {
        // Alternating separators: no single style reaches 12
        let text = "1. alpha 2 beta 3. gamma 4 delta 5. echo 6 foxtrot \
                    7. golf 8 hotel 9. india 10 juliet 11. kilo 12 lima";
        let collector = NumberedListCollector::new();

        assert_eq!(collector.scan(NumberingStyle::Spaced, text).len(), 6);
        assert_eq!(collector.scan(NumberingStyle::Dotted, text).len(), 6);

        // The last style tried is returned, not the best one
        let collection = collector.collect_detailed(text);
        assert_eq!(collection.style, Some(NumberingStyle::Parenthesized));
        assert!(collection.candidates.is_empty());
    }

    #[test]
    fn test_last_attempted_beats_larger_partial() {
        // Eleven spaced entries, one parenthesized
        let text = "1 a 2 b 3 c 4 d 5 e 6 f 7 g 8 h 9 i 10 j 11 k 5) z";
        let collection = NumberedListCollector::new().collect_detailed(text);

        assert_eq!(collection.style, Some(NumberingStyle::Parenthesized));
        assert_eq!(collection.candidates.positions(), vec![5]);
        assert_eq!(collection.candidates.get(5), Some("z"));
    }

    #[test]
    fn test_custom_length() {
        let text = (1..=24)
            .map(|i| format!("{i} w"))
            .collect::<Vec<_>>()
            .join(" ");
        let collection = NumberedListCollector::with_length(24).collect_detailed(&text);

        assert_eq!(collection.style, Some(NumberingStyle::Spaced));
        assert_eq!(collection.candidates.len(), 24);
    }

    #[test]
    fn test_empty_text() {
        assert!(collect("").is_empty());
        assert_eq!(
            NumberedListCollector::new().styles(),
            NumberingStyle::ALL.to_vec()
        );
    }
}
