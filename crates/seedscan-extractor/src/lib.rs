//! SeedScan Extractor - Numbered word list recovery
//!
//! Recovers an ordered word sequence (canonically 12 words) from noisy OCR
//! text of a photographed numbered list. Extraction runs in three stages:
//!
//! 1. [`collector`] scans for numeral/word pairs, one numbering style at a time
//! 2. [`assembler`] accepts the candidates if enough positions were recovered
//! 3. [`fallback`] otherwise takes the first alphabetic words in reading order
//!
//! Everything here is a pure function of the input text. Recovered words are
//! secrets and are never written to logs.

pub mod assembler;
pub mod collector;
pub mod fallback;

pub use assembler::assemble;
pub use collector::{collect, Collection, NumberedListCollector};
pub use fallback::fallback_extract;

use serde::Serialize;

use seedscan_core::{ConfigError, ExtractionConfig, NumberingStyle, Phrase, Result, ScanError};

/// Which stage produced a phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionSource {
    /// Assembled from a numbered list
    Numbered {
        style: NumberingStyle,
        /// Distinct positions recovered
        support: usize,
    },
    /// First words of the text, numbering ignored
    Fallback,
}

/// A successfully recovered phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub phrase: Phrase,
    pub source: ExtractionSource,
}

/// Collector, assembler and fallback bound to one configuration
pub struct PhraseExtractor {
    config: ExtractionConfig,
    collector: NumberedListCollector,
}

impl PhraseExtractor {
    /// Create an extractor, rejecting inconsistent thresholds
    pub fn new(config: ExtractionConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ExtractionConfig) -> Self {
        let max_position = u32::try_from(config.phrase_length).unwrap_or(u32::MAX);
        Self {
            collector: NumberedListCollector::with_length(max_position),
            config,
        }
    }

    /// Recover a phrase from OCR text
    pub fn extract(&self, text: &str) -> Result<Extraction> {
        let collection = self.collector.collect_detailed(text);
        let support = collection.candidates.len();

        if let Some(phrase) = assemble(&collection.candidates, &self.config) {
            if let Some(style) = collection.style {
                tracing::debug!(
                    "Assembled {}-word phrase from {} numbering",
                    phrase.len(),
                    style
                );
                return Ok(Extraction {
                    phrase,
                    source: ExtractionSource::Numbered { style, support },
                });
            }
        }

        if let Some(phrase) = fallback_extract(text, self.config.phrase_length) {
            tracing::debug!("Numbered assembly failed, using plain-word fallback");
            return Ok(Extraction {
                phrase,
                source: ExtractionSource::Fallback,
            });
        }

        tracing::debug!("No phrase recovered (numbered support {})", support);
        Err(ScanError::NoSequenceFound {
            expected: self.config.phrase_length,
        })
    }

    /// Recover a phrase and join it with single spaces
    pub fn extract_phrase(&self, text: &str) -> Result<String> {
        self.extract(text).map(|extraction| extraction.phrase.to_string())
    }
}

impl Default for PhraseExtractor {
    fn default() -> Self {
        Self::build(ExtractionConfig::default())
    }
}

/// Recover the canonical 12-word phrase from OCR text.
///
/// Fails with [`ScanError::NoSequenceFound`], whose message is the
/// human-readable reason, when neither stage finds 12 usable words.
pub fn extract_phrase(text: &str) -> Result<String> {
    PhraseExtractor::default().extract_phrase(text)
}

// ============================================================================
// Reporting
// ============================================================================

/// Caller-facing outcome: `{"phrase": ...}` or `{"failed": true, "reason": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractionReport {
    Found {
        phrase: Phrase,
        source: ExtractionSource,
    },
    Failed {
        failed: bool,
        reason: String,
    },
}

impl ExtractionReport {
    pub fn from_result(result: &Result<Extraction>) -> Self {
        match result {
            Ok(extraction) => Self::Found {
                phrase: extraction.phrase.clone(),
                source: extraction.source,
            },
            Err(e) => Self::Failed {
                failed: true,
                reason: e.to_string(),
            },
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use seedscan_core::SequencePolicy;

    const EXPECTED: &str =
        "alpha beta gamma delta echo foxtrot golf hotel india juliet kilo lima";

    #[test]
    fn test_numbered_extraction() {
        let text = "Your recovery phrase:\n1 alpha 2 beta 3 gamma 4 delta\n\
                    5 echo 6 foxtrot 7 golf 8 hotel\n9 india 10 juliet 11 kilo 12 lima\n";
        let extraction = PhraseExtractor::default().extract(text).unwrap();

        assert_eq!(extraction.phrase.to_string(), EXPECTED);
        assert_eq!(
            extraction.source,
            ExtractionSource::Numbered {
                style: NumberingStyle::Spaced,
                support: 12
            }
        );
    }

    #[test]
    fn test_out_of_order_numbering() {
        let text = "7. golf 1. alpha 8. hotel 2. beta 9. india 3. gamma \
                    10. juliet 4. delta 11. kilo 5. echo 12. lima 6. foxtrot";
        assert_eq!(extract_phrase(text).unwrap(), EXPECTED);
    }

    #[test]
    fn test_mixed_separators_fall_back() {
        let text = "1. alpha 2 beta 3. gamma 4 delta 5. echo 6 foxtrot \
                    7. golf 8 hotel 9. india 10 juliet 11. kilo 12 lima";
        let extraction = PhraseExtractor::default().extract(text).unwrap();

        assert_eq!(extraction.source, ExtractionSource::Fallback);
        assert_eq!(extraction.phrase.to_string(), EXPECTED);
    }

    #[test]
    fn test_plain_words_fallback() {
        let text = "apple banana cherry date elderberry fig grape honeydew \
                    kiwi lemon mango nectarine extra words";
        assert_eq!(
            extract_phrase(text).unwrap(),
            "apple banana cherry date elderberry fig grape honeydew kiwi lemon mango nectarine"
        );
    }

    #[test]
    fn test_no_sequence_found() {
        let err = extract_phrase("hello world").unwrap_err();
        assert!(matches!(err, ScanError::NoSequenceFound { expected: 12 }));
        assert_eq!(err.to_string(), "no 12-word sequence found");

        assert!(extract_phrase("").is_err());
    }

    #[test]
    fn test_strict_gap_uses_fallback() {
        // Numeral 6 lost; the words are still in reading order
        let text = "1 alpha 2 beta 3 gamma 4 delta 5 echo foxtrot \
                    7 golf 8 hotel 9 india 10 juliet 11 kilo 12 lima";
        let extraction = PhraseExtractor::default().extract(text).unwrap();

        assert_eq!(extraction.source, ExtractionSource::Fallback);
        assert_eq!(extraction.phrase.to_string(), EXPECTED);
    }

    #[test]
    fn test_lenient_gap_returns_short_phrase() {
        let text = "1) alpha 2) beta 3) gamma 4) delta 5) echo 6) ... \
                    7) golf 8) hotel 9) india 10) juliet 11) kilo 12) lima";
        let extractor = PhraseExtractor::new(ExtractionConfig {
            sequence_policy: SequencePolicy::Lenient,
            ..Default::default()
        })
        .unwrap();
        let extraction = extractor.extract(text).unwrap();

        assert_eq!(
            extraction.source,
            ExtractionSource::Numbered {
                style: NumberingStyle::Parenthesized,
                support: 11
            }
        );
        assert_eq!(extraction.phrase.len(), 11);
        assert!(!extraction.phrase.words().contains(&"foxtrot".to_string()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractionConfig {
            phrase_length: 12,
            min_support: 20,
            ..Default::default()
        };
        assert!(PhraseExtractor::new(config).is_err());
    }

    #[test]
    fn test_report_shapes() {
        let found = ExtractionReport::from_result(&PhraseExtractor::default().extract(
            "1 alpha 2 beta 3 gamma 4 delta 5 echo 6 foxtrot \
             7 golf 8 hotel 9 india 10 juliet 11 kilo 12 lima",
        ));
        assert!(found.is_found());
        let json: serde_json::Value = serde_json::from_str(&found.to_json().unwrap()).unwrap();
        assert_eq!(json["phrase"], EXPECTED);
        assert_eq!(json["source"]["kind"], "numbered");
        assert_eq!(json["source"]["style"], "spaced");

        let failed = ExtractionReport::from_result(&PhraseExtractor::default().extract("nope"));
        assert!(!failed.is_found());
        let json: serde_json::Value = serde_json::from_str(&failed.to_json().unwrap()).unwrap();
        assert_eq!(json["failed"], true);
        assert_eq!(json["reason"], "no 12-word sequence found");
    }
}
