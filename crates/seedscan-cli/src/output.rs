//! Result presentation
//!
//! stdout carries only results; hints and logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use seedscan_core::{AppConfig, Result};
use seedscan_extractor::{Extraction, ExtractionReport};
use seedscan_qr::QrRenderer;

/// How a recovered phrase is shown
#[derive(Debug, Default)]
pub struct OutputOptions {
    pub qr: bool,
    pub svg: Option<PathBuf>,
    pub json: bool,
}

pub fn print_raw(text: &str) {
    eprintln!("--- recognized text ---");
    eprintln!("{text}");
    eprintln!("-----------------------");
}

fn failure_hint(expected: usize) -> String {
    format!(
        "Make sure the image shows a numbered list (1. word 2. word ... {expected}. word) \
         and the text is clear and readable."
    )
}

/// Print the outcome and choose the exit status
pub fn report(
    result: &Result<Extraction>,
    options: &OutputOptions,
    config: &AppConfig,
) -> anyhow::Result<ExitCode> {
    let report = ExtractionReport::from_result(result);

    if options.json {
        println!("{}", report.to_json()?);
    } else {
        match result {
            Ok(extraction) => println!("{}", extraction.phrase),
            Err(e) => {
                eprintln!("{e}");
                eprintln!("{}", failure_hint(config.extraction.phrase_length));
            }
        }
    }

    let Ok(extraction) = result else {
        return Ok(ExitCode::FAILURE);
    };

    let phrase = extraction.phrase.to_string();
    let renderer = QrRenderer::new(config.qr.clone());

    if options.qr {
        println!("{}", renderer.to_terminal(&phrase)?);
    }

    if let Some(path) = &options.svg {
        let svg = renderer.to_svg(&phrase)?;
        std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Wrote QR code to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}
