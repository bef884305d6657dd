//! Accent Word Bank - counts words containing accented characters in RTF documents
//!
//! This library extracts words containing a set of target characters from RTF
//! documents, tallies occurrences per document, and exports the tallies as a
//! semicolon-delimited table.

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types for convenience
pub use crate::config::Settings;
pub use crate::core::extractor::{extract, ExtractError};
pub use crate::core::word_bank::WordBank;
pub use crate::utils::output_formatter::export;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pipeline driver: extract every input in order, then export
pub mod app {
    use std::path::PathBuf;

    use anyhow::Context;
    use log::error;

    use crate::config::{ConfigError, Settings};
    use crate::core::extractor::{extract, ExtractError};
    use crate::core::word_bank::WordBank;
    use crate::utils::output_formatter::export;

    /// What happened to one input document
    #[derive(Debug)]
    pub struct FileOutcome {
        pub path: PathBuf,
        pub label: String,
        pub words_added: usize,
        pub error: Option<ExtractError>,
    }

    /// Result of a whole run
    #[derive(Debug)]
    pub struct PipelineReport {
        pub word_bank: WordBank,
        pub files: Vec<FileOutcome>,
    }

    /// Extract every configured input into a fresh word bank.
    ///
    /// The first input's label seeds the bank; each later input starts a new
    /// group before extraction. A failing input is logged and recorded in its
    /// outcome, and the remaining inputs are still processed.
    ///
    /// # Arguments
    ///
    /// * `settings` - Resolved run settings
    ///
    /// # Returns
    ///
    /// The filled word bank together with per-file outcomes, or
    /// `ConfigError::NoInputs` when there is nothing to seed the first group with
    pub fn collect_words(settings: &Settings) -> Result<PipelineReport, ConfigError> {
        let first = settings.inputs.first().ok_or(ConfigError::NoInputs)?;
        let mut word_bank = WordBank::new(first.label.clone());
        let mut files = Vec::with_capacity(settings.inputs.len());

        for (index, input) in settings.inputs.iter().enumerate() {
            if index > 0 {
                word_bank.start_new_group(input.label.clone());
            }

            let outcome = match extract(&input.path, &settings.target_characters, &mut word_bank) {
                Ok(words_added) => FileOutcome {
                    path: input.path.clone(),
                    label: input.label.clone(),
                    words_added,
                    error: None,
                },
                Err(e) => {
                    error!("Error processing {}: {}", input.path.display(), e);
                    FileOutcome {
                        path: input.path.clone(),
                        label: input.label.clone(),
                        words_added: 0,
                        error: Some(e),
                    }
                }
            };
            files.push(outcome);
        }

        Ok(PipelineReport { word_bank, files })
    }

    /// Run the full pipeline and write the output table
    ///
    /// # Arguments
    ///
    /// * `settings` - Resolved run settings
    ///
    /// # Returns
    ///
    /// The run report, or the export error, which is fatal
    pub fn run_pipeline(settings: &Settings) -> anyhow::Result<PipelineReport> {
        let report = collect_words(settings)?;
        export(&report.word_bank, &settings.target_characters, &settings.output)
            .with_context(|| format!("Failed to export {}", settings.output.display()))?;
        Ok(report)
    }
}
