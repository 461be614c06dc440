//! Sequence assembly
//!
//! Turns a candidate set into a phrase when enough positions were
//! recovered. Gaps are never filled in.

use seedscan_core::{CandidateSet, ExtractionConfig, Phrase, SequencePolicy};

/// Assemble an ordered phrase from numbered candidates.
///
/// Requires at least `min_support` distinct positions. Under
/// [`SequencePolicy::Strict`] every position in `[1, phrase_length]` must
/// also be present; under [`SequencePolicy::Lenient`] a list with gaps is
/// returned short.
pub fn assemble(candidates: &CandidateSet, config: &ExtractionConfig) -> Option<Phrase> {
    let words: Vec<String> = candidates
        .tokens_in_order()
        .into_iter()
        .take(config.phrase_length)
        .collect();
    let support = words.len();

    if support < config.min_support {
        tracing::debug!(
            "Numbered support {}/{} below threshold {}",
            support,
            config.phrase_length,
            config.min_support
        );
        return None;
    }

    if config.sequence_policy == SequencePolicy::Strict && support < config.phrase_length {
        tracing::debug!(
            "Strict policy rejects numbered list with {} missing positions",
            config.phrase_length - support
        );
        return None;
    }

    Some(Phrase::new(words))
}
