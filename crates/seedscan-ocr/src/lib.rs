//! SeedScan OCR - Optical Character Recognition integration
//!
//! Turns a photo or screenshot of a word list into raw text. The text is
//! handed to `seedscan-extractor` unchanged; nothing here interprets it.
//!
//! Engines are async. [`recognize_with_timeout`] drops the recognition
//! future when the deadline passes, and [`TesseractEngine`] spawns its child
//! with `kill_on_drop`, so a timed-out Tesseract process is killed rather
//! than left running.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use seedscan_core::{OcrConfig, ScanError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("OCR execution failed: {0}")]
    ExecutionFailed(String),

    #[error("OCR timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<OcrError> for ScanError {
    fn from(err: OcrError) -> Self {
        ScanError::Ocr(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OcrError>;

/// OCR result for a single image
#[derive(Debug, Clone)]
pub struct OcrResult {
    /// Recognized text content
    pub text: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Language the engine was asked for
    pub language: Option<String>,
}

impl OcrResult {
    /// Create a new OCR result
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: 1.0,
            language: None,
        }
    }

    /// Set confidence score
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Trait for OCR engines
///
/// Dropping the future returned by `recognize` must stop the work.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text in an image file
    async fn recognize(&self, image_path: &Path) -> Result<OcrResult>;

    /// Check if the engine is available on the system
    async fn is_available(&self) -> bool;

    /// Get the engine name
    fn name(&self) -> &str;
}

// ============================================================================
// Tesseract OCR Engine
// ============================================================================

/// Tesseract CLI wrapper
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    /// Create a new Tesseract engine with default config
    pub fn new() -> Self {
        Self {
            config: OcrConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: OcrConfig) -> Self {
        Self { config }
    }

    /// Get the tesseract executable path
    fn executable(&self) -> &str {
        self.config
            .executable_path
            .as_deref()
            .unwrap_or("tesseract")
    }

    /// Build command arguments
    fn build_args(&self, image_path: &Path) -> Vec<String> {
        let mut args = vec![
            image_path.display().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.config.language.clone(),
        ];

        if let Some(psm) = self.config.psm {
            args.push("--psm".to_string());
            args.push(psm.to_string());
        }

        if let Some(oem) = self.config.oem {
            args.push("--oem".to_string());
            args.push(oem.to_string());
        }

        args
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize(&self, image_path: &Path) -> Result<OcrResult> {
        if !image_path.is_file() {
            return Err(OcrError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("image not found: {}", image_path.display()),
            )));
        }

        if !self.is_available().await {
            return Err(OcrError::EngineNotAvailable(
                "Tesseract is not installed or not in PATH".to_string(),
            ));
        }

        let args = self.build_args(image_path);
        tracing::debug!("Running {} with {} args", self.executable(), args.len());

        let output = Command::new(self.executable())
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| OcrError::ExecutionFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ExecutionFailed(format!(
                "Tesseract failed: {stderr}"
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!("Tesseract returned {} characters", text.len());

        // Plain stdout output carries no confidence; hOCR would
        Ok(OcrResult::new(text)
            .with_confidence(0.9)
            .with_language(self.config.language.clone()))
    }

    async fn is_available(&self) -> bool {
        Command::new(self.executable())
            .arg("--version")
            .kill_on_drop(true)
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

// ============================================================================
// OCR Manager
// ============================================================================

/// OCR manager that handles multiple engines
pub struct OcrManager {
    engines: Vec<Arc<dyn OcrEngine>>,
}

impl OcrManager {
    /// Create a manager with no engines registered
    pub fn empty() -> Self {
        Self {
            engines: Vec::new(),
        }
    }

    /// Create a manager with Tesseract registered if it is installed
    pub async fn from_config(config: &OcrConfig) -> Self {
        let mut manager = Self::empty();

        let tesseract = TesseractEngine::with_config(config.clone());
        if tesseract.is_available().await {
            manager.register(tesseract);
        } else {
            tracing::warn!("Tesseract not found, OCR unavailable");
        }

        manager
    }

    /// Register an OCR engine
    pub fn register<E: OcrEngine + 'static>(&mut self, engine: E) {
        self.engines.push(Arc::new(engine));
    }

    /// Check if any OCR engine is available
    pub fn is_available(&self) -> bool {
        !self.engines.is_empty()
    }

    /// Get available engines
    pub fn available_engines(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.name()).collect()
    }

    /// The engine used for recognition
    pub fn primary(&self) -> Result<Arc<dyn OcrEngine>> {
        self.engines
            .first()
            .cloned()
            .ok_or_else(|| OcrError::EngineNotAvailable("No OCR engines available".to_string()))
    }

    /// Recognize text using the first registered engine
    pub async fn recognize(&self, image_path: &Path, timeout: Duration) -> Result<OcrResult> {
        let engine = self.primary()?;
        recognize_with_timeout(engine.as_ref(), image_path, timeout).await
    }
}

/// Run an engine, abandoning and stopping it once `timeout` elapses
pub async fn recognize_with_timeout(
    engine: &dyn OcrEngine,
    image_path: &Path,
    timeout: Duration,
) -> Result<OcrResult> {
    match tokio::time::timeout(timeout, engine.recognize(image_path)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("{} timed out after {:?}", engine.name(), timeout);
            Err(OcrError::Timeout(timeout))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
