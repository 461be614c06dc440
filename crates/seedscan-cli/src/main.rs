//! SeedScan CLI - Command-line interface
//!
//! Usage:
//!   seedscan scan <image> [--qr] [--svg <path>] [--json] [--show-raw]
//!   seedscan text [path]
//!   seedscan engines

mod output;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seedscan_core::{AppConfig, SequencePolicy};
use seedscan_extractor::PhraseExtractor;
use seedscan_ocr::{recognize_with_timeout, OcrManager};

use crate::output::OutputOptions;

#[derive(Parser)]
#[command(name = "seedscan")]
#[command(about = "Recover a numbered word list from a photo or OCR text")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of words to recover
    #[arg(long, global = true)]
    phrase_length: Option<usize>,

    /// Accept numbered lists with a few missing positions
    #[arg(long, global = true)]
    lenient: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run OCR on an image and extract the phrase
    Scan {
        /// Path to the image
        image: PathBuf,

        /// Print the text recognized by OCR
        #[arg(long)]
        show_raw: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Extract the phrase from already recognized text
    Text {
        /// Text file to read; stdin when absent or "-"
        path: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List available OCR engines
    Engines,
}

#[derive(Args)]
struct OutputArgs {
    /// Print the phrase as a QR code
    #[arg(long)]
    qr: bool,

    /// Write the phrase as an SVG QR code
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    /// Print a JSON report instead of plain text
    #[arg(long)]
    json: bool,
}

impl From<OutputArgs> for OutputOptions {
    fn from(args: OutputArgs) -> Self {
        Self {
            qr: args.qr,
            svg: args.svg,
            json: args.json,
        }
    }
}

fn init_tracing(config: &AppConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.clone()).context("loading configuration")?;

    if let Some(length) = cli.phrase_length {
        config.extraction.phrase_length = length;
        config.extraction.min_support = config.extraction.min_support.min(length);
    }
    if cli.lenient {
        config.extraction.sequence_policy = SequencePolicy::Lenient;
    }
    config.extraction.validate()?;

    Ok(config)
}

fn read_text(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config, cli.verbose);

    let extractor = PhraseExtractor::new(config.extraction.clone())?;

    match cli.command {
        Commands::Scan {
            image,
            show_raw,
            output: opts,
        } => {
            let manager = OcrManager::from_config(&config.ocr).await;
            let engine = manager.primary()?;
            tracing::info!("Recognizing {} with {}", image.display(), engine.name());

            let timeout = Duration::from_secs(config.ocr.timeout_secs);
            let ocr = recognize_with_timeout(engine.as_ref(), &image, timeout).await?;
            if show_raw {
                output::print_raw(&ocr.text);
            }

            let result = extractor.extract(&ocr.text);
            output::report(&result, &OutputOptions::from(opts), &config)
        }
        Commands::Text { path, output: opts } => {
            let text = read_text(path.as_deref())?;
            let result = extractor.extract(&text);
            output::report(&result, &OutputOptions::from(opts), &config)
        }
        Commands::Engines => {
            let manager = OcrManager::from_config(&config.ocr).await;
            if manager.is_available() {
                for name in manager.available_engines() {
                    println!("{name}");
                }
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("No OCR engines available. Install tesseract or set SEEDSCAN_TESSERACT.");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_flags() {
        let cli = Cli::parse_from([
            "seedscan", "scan", "seed.png", "--qr", "--json", "--show-raw", "--lenient",
        ]);
        assert!(cli.lenient);
        match cli.command {
            Commands::Scan {
                image,
                show_raw,
                output,
            } => {
                assert_eq!(image, PathBuf::from("seed.png"));
                assert!(show_raw);
                assert!(output.qr);
                assert!(output.json);
                assert!(output.svg.is_none());
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_load_config_applies_flags() {
        let cli = Cli::parse_from(["seedscan", "--phrase-length", "8", "--lenient", "engines"]);
        let config = load_config(&cli).unwrap();

        assert_eq!(config.extraction.phrase_length, 8);
        assert_eq!(config.extraction.min_support, 8);
        assert_eq!(config.extraction.sequence_policy, SequencePolicy::Lenient);
    }

    #[test]
    fn test_read_text_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1 alpha").unwrap();

        assert_eq!(read_text(Some(file.path())).unwrap(), "1 alpha");
        assert!(read_text(Some(Path::new("/nonexistent/ocr.txt"))).is_err());
    }
}
