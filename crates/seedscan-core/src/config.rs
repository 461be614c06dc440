//! SeedScan Configuration Management
//!
//! Handles configuration from environment variables and TOML config files
//! with defaults that reproduce the canonical 12-word behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{MIN_SUPPORT, PHRASE_LENGTH};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Phrase extraction configuration
    pub extraction: ExtractionConfig,

    /// OCR engine configuration
    pub ocr: OcrConfig,

    /// QR rendering configuration
    pub qr: QrConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Extraction
        if let Ok(value) = std::env::var("SEEDSCAN_PHRASE_LENGTH") {
            config.extraction.phrase_length = parse_var("SEEDSCAN_PHRASE_LENGTH", value)?;
        }
        if let Ok(value) = std::env::var("SEEDSCAN_MIN_SUPPORT") {
            config.extraction.min_support = parse_var("SEEDSCAN_MIN_SUPPORT", value)?;
        }
        if let Ok(policy) = std::env::var("SEEDSCAN_SEQUENCE_POLICY") {
            config.extraction.sequence_policy = policy.parse()?;
        }

        // OCR
        if let Ok(language) = std::env::var("SEEDSCAN_OCR_LANGUAGE") {
            config.ocr.language = language;
        }
        if let Ok(path) = std::env::var("SEEDSCAN_TESSERACT") {
            config.ocr.executable_path = Some(path);
        }
        if let Ok(value) = std::env::var("SEEDSCAN_OCR_TIMEOUT") {
            config.ocr.timeout_secs = parse_var("SEEDSCAN_OCR_TIMEOUT", value)?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        Ok(self.merge_overrides(env_config))
    }

    /// Take every value from `overrides` that differs from the defaults
    fn merge_overrides(mut self, overrides: Self) -> Self {
        let extraction = ExtractionConfig::default();
        if overrides.extraction.phrase_length != extraction.phrase_length {
            self.extraction.phrase_length = overrides.extraction.phrase_length;
        }
        if overrides.extraction.min_support != extraction.min_support {
            self.extraction.min_support = overrides.extraction.min_support;
        }
        if overrides.extraction.sequence_policy != extraction.sequence_policy {
            self.extraction.sequence_policy = overrides.extraction.sequence_policy;
        }

        let ocr = OcrConfig::default();
        if overrides.ocr.language != ocr.language {
            self.ocr.language = overrides.ocr.language;
        }
        if overrides.ocr.executable_path.is_some() {
            self.ocr.executable_path = overrides.ocr.executable_path;
        }
        if overrides.ocr.timeout_secs != ocr.timeout_secs {
            self.ocr.timeout_secs = overrides.ocr.timeout_secs;
        }

        if overrides.logging.level != LoggingConfig::default().level {
            self.logging.level = overrides.logging.level;
        }

        self
    }

    /// Read an optional config file, apply env overrides, and validate
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_override()?;
        config.extraction.validate()?;
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Phrase extraction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of words in a complete phrase (also the highest accepted numeral)
    pub phrase_length: usize,

    /// Distinct numbered positions required before assembly is attempted
    pub min_support: usize,

    /// Whether a numbered result with gaps may be returned short
    pub sequence_policy: SequencePolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            phrase_length: PHRASE_LENGTH,
            min_support: MIN_SUPPORT,
            sequence_policy: SequencePolicy::Strict,
        }
    }
}

impl ExtractionConfig {
    /// Check the thresholds are consistent with each other
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phrase_length == 0 || u32::try_from(self.phrase_length).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "phrase_length".to_string(),
                value: self.phrase_length.to_string(),
            });
        }
        if self.min_support == 0 || self.min_support > self.phrase_length {
            return Err(ConfigError::InvalidValue {
                key: "min_support".to_string(),
                value: self.min_support.to_string(),
            });
        }
        Ok(())
    }
}

/// Acceptance policy for numbered lists with missing positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequencePolicy {
    /// Only a list covering every position is accepted
    #[default]
    Strict,
    /// Any list meeting `min_support` is accepted, gaps are left out
    Lenient,
}

impl std::str::FromStr for SequencePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(ConfigError::InvalidValue {
                key: "SEEDSCAN_SEQUENCE_POLICY".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// OCR engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language code(s) for OCR (e.g., "eng", "eng+deu")
    pub language: String,

    /// Page segmentation mode (PSM)
    pub psm: Option<u8>,

    /// OCR engine mode (OEM)
    pub oem: Option<u8>,

    /// Path to tesseract executable
    pub executable_path: Option<String>,

    /// Recognition timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            psm: None,
            oem: None,
            executable_path: None,
            timeout_secs: 60,
        }
    }
}

/// QR rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// Minimum rendered width/height in pixels
    pub size: u32,

    /// Draw the standard 4-module quiet zone around the code
    pub quiet_zone: bool,

    /// Color of dark modules
    pub dark_color: String,

    /// Color of light modules
    pub light_color: String,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            size: 256,
            quiet_zone: true,
            dark_color: "#000000".to_string(),
            light_color: "#ffffff".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
