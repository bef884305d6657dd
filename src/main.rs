//! Accent Word Bank - command line entry point
//!
//! Parses arguments, sets up logging, resolves the run settings and drives the
//! extract-then-export pipeline.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::Colorize;
use log::{info, LevelFilter};

use accent_word_bank::app;
use accent_word_bank::config::{self, CliOverrides, Settings};
use accent_word_bank::utils::output_formatter;

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "accent_word_bank",
    version,
    about = "Counts words containing accented characters across RTF documents",
    long_about = "Extracts every word containing one of the target characters from each RTF
document, counts occurrences per document, and writes a semicolon-delimited table
with one row per word and one count column per document.

With no arguments, reads file1.rtf and file2.rtf and writes word_bank.csv."
)]
struct Args {
    /// RTF documents to process, in column order (default: file1.rtf file2.rtf)
    files: Vec<PathBuf>,

    /// Group label for the document at the same position (can be used multiple times)
    #[arg(long = "label", action = ArgAction::Append)]
    labels: Vec<String>,

    /// Output CSV path (default: word_bank.csv)
    #[arg(long = "output", short = 'o')]
    output: Option<PathBuf>,

    /// Target characters, given as one string (default: àèéìòù)
    #[arg(long = "chars")]
    chars: Option<String>,

    /// Path to JSON configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Suppress the summary printed at the end of the run
    #[arg(long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Set logging level (default: INFO)
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,

    /// Log file path (default: accent_word_bank.log)
    #[arg(long = "log-file", default_value = "accent_word_bank.log")]
    log_file: String,
}

/// Main entry point function
fn main() -> Result<()> {
    let start_time = Instant::now();
    let args = Args::parse();

    setup_logging(&args);

    let settings = load_settings(&args)?;
    info!(
        "Processing {} documents for characters {:?}",
        settings.inputs.len(),
        settings.target_characters
    );

    // Export failures are fatal; per-file failures are already in the log
    let report = app::run_pipeline(&settings)?;

    for outcome in &report.files {
        if let Some(line) = output_formatter::format_file_error(outcome) {
            eprintln!("{}", line.red());
        }
    }

    if !args.quiet {
        print!(
            "{}",
            output_formatter::format_summary(&report, &settings.output, start_time.elapsed())
        );
    }

    Ok(())
}

/// Set up logging to the log file
fn setup_logging(args: &Args) {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(args.log_level);

    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Ok(file) = File::create(&args.log_file) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
}

/// Resolve settings from defaults, the optional config file and the arguments
fn load_settings(args: &Args) -> Result<Settings> {
    let file_config = match &args.config {
        Some(path) => Some(config::load_config(path)?),
        None => None,
    };

    let overrides = CliOverrides {
        inputs: args.files.clone(),
        labels: args.labels.clone(),
        output: args.output.clone(),
        chars: args.chars.clone(),
    };

    Ok(Settings::resolve(file_config, overrides)?)
}
