//! SeedScan QR - QR encoding of recovered phrases
//!
//! Lets a recovered phrase be moved to another device by scanning instead
//! of retyping. Rendering is independent of how the phrase was extracted.

use qrcode::render::{svg, unicode};
use qrcode::QrCode;
use thiserror::Error;

use seedscan_core::{QrConfig, ScanError};

#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR generation failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Nothing to encode")]
    Empty,
}

impl From<QrError> for ScanError {
    fn from(err: QrError) -> Self {
        ScanError::Qr(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QrError>;

/// Renders phrases as QR codes
pub struct QrRenderer {
    config: QrConfig,
}

impl QrRenderer {
    pub fn new(config: QrConfig) -> Self {
        Self { config }
    }

    fn encode(&self, text: &str) -> Result<QrCode> {
        if text.is_empty() {
            return Err(QrError::Empty);
        }
        Ok(QrCode::new(text.as_bytes())?)
    }

    /// Render as an SVG document
    pub fn to_svg(&self, text: &str) -> Result<String> {
        let code = self.encode(text)?;

        let svg_string = code
            .render::<svg::Color>()
            .min_dimensions(self.config.size, self.config.size)
            .dark_color(svg::Color(&self.config.dark_color))
            .light_color(svg::Color(&self.config.light_color))
            .quiet_zone(self.config.quiet_zone)
            .build();

        Ok(svg_string)
    }

    /// Render with unicode half blocks for display in a terminal
    pub fn to_terminal(&self, text: &str) -> Result<String> {
        let code = self.encode(text)?;

        let rendered = code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(self.config.quiet_zone)
            .build();

        Ok(rendered)
    }
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self::new(QrConfig::default())
    }
}
