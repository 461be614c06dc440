//! SeedScan Core - Domain types, errors, and configuration
//!
//! This crate defines the shared abstractions used throughout SeedScan:
//! - Candidate numbered entries and the candidate set they accumulate into
//! - Numbering styles recognised in OCR output
//! - The recovered phrase type
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{
    AppConfig, ConfigError, ExtractionConfig, LoggingConfig, OcrConfig, QrConfig, SequencePolicy,
};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Lowest numeral accepted as a list position
pub const MIN_POSITION: u32 = 1;

/// Canonical number of words in a numbered phrase
pub const PHRASE_LENGTH: usize = 12;

/// Recovered positions required before a numbered list is trusted
pub const MIN_SUPPORT: usize = 10;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for SeedScan operations
#[derive(Error, Debug)]
pub enum ScanError {
    /// Neither numbered assembly nor the plain-word fallback produced a phrase
    #[error("no {expected}-word sequence found")]
    NoSequenceFound { expected: usize },

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("QR encoding error: {0}")]
    Qr(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;

// ============================================================================
// Numbering Styles
// ============================================================================

/// How a numeral is separated from the word that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingStyle {
    /// `1 apple 2 banana`
    Spaced,
    /// `1. apple 2. banana`
    Dotted,
    /// `1) apple 2) banana`
    Parenthesized,
}

impl NumberingStyle {
    /// All styles in the order they are tried
    pub const ALL: [NumberingStyle; 3] = [Self::Spaced, Self::Dotted, Self::Parenthesized];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaced => "spaced",
            Self::Dotted => "dotted",
            Self::Parenthesized => "parenthesized",
        }
    }
}

impl fmt::Display for NumberingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Candidates
// ============================================================================

/// A numeral/word pair read from OCR text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The numeral that preceded the word
    pub position: u32,
    /// Lowercase ASCII letters, never empty
    pub token: String,
}

impl Candidate {
    /// Validate a raw numeral/word pair.
    ///
    /// Returns `None` when the position lies outside `[1, max_position]` or
    /// the token is not a non-empty run of ASCII letters once lowercased.
    /// Rejection is ordinary filtering, not an error.
    pub fn new(position: u32, raw_token: &str, max_position: u32) -> Option<Self> {
        if !(MIN_POSITION..=max_position).contains(&position) {
            return None;
        }

        let token = raw_token.trim().to_lowercase();
        if !is_lowercase_word(&token) {
            return None;
        }

        Some(Self { position, token })
    }
}

/// True for a non-empty string made only of `a-z`
pub fn is_lowercase_word(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_lowercase())
}

/// Position-keyed candidates with first-seen-wins insertion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    entries: BTreeMap<u32, String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate unless its position is already taken.
    ///
    /// Returns `true` if the candidate was stored.
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        if self.entries.contains_key(&candidate.position) {
            return false;
        }
        self.entries.insert(candidate.position, candidate.token);
        true
    }

    /// Number of distinct positions recovered
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: u32) -> Option<&str> {
        self.entries.get(&position).map(String::as_str)
    }

    /// Recovered positions in ascending order
    pub fn positions(&self) -> Vec<u32> {
        self.entries.keys().copied().collect()
    }

    /// Tokens ordered by position
    pub fn tokens_in_order(&self) -> Vec<String> {
        self.entries.values().cloned().collect()
    }
}

// ============================================================================
// Phrase
// ============================================================================

/// An ordered word sequence recovered from OCR text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    words: Vec<String>,
}

impl Phrase {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words.join(" "))
    }
}

impl Serialize for Phrase {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
