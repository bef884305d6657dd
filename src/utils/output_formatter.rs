//! Output formatter for word bank results
//!
//! Exports the word bank as a semicolon-delimited table and builds the console
//! summary printed at the end of a run.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::app::{FileOutcome, PipelineReport};
use crate::core::extractor::{first_target, ExtractError};
use crate::core::word_bank::WordBank;

/// Field delimiter of the exported table
pub const CSV_DELIMITER: u8 = b';';

/// Header row: `Word`, `Character`, then one column per group label
pub fn csv_header(word_bank: &WordBank) -> Vec<String> {
    let mut header = vec!["Word".to_string(), "Character".to_string()];
    header.extend(word_bank.groups().iter().cloned());
    header
}

/// Build one data row per word, in first-insertion order
///
/// # Arguments
///
/// * `word_bank` - Word bank to walk
/// * `target_characters` - Characters searched for the `Character` column
///
/// # Returns
///
/// Rows of string fields, without the header
pub fn csv_rows(word_bank: &WordBank, target_characters: &[char]) -> Vec<Vec<String>> {
    let group_count = word_bank.groups().len();

    word_bank
        .entries()
        .map(|(word, counts)| {
            let mut row = Vec::with_capacity(group_count + 2);
            row.push(word.to_string());
            row.push(
                first_target(word, target_characters)
                    .map(String::from)
                    .unwrap_or_default(),
            );

            for group_index in 0..group_count {
                row.push(
                    counts
                        .get(&group_index)
                        .map(|count| count.to_string())
                        .unwrap_or_default(),
                );
            }

            row
        })
        .collect()
}

/// Write the word bank as a semicolon-delimited table to any writer
///
/// # Arguments
///
/// * `word_bank` - Word bank to export
/// * `target_characters` - Characters searched for the `Character` column
/// * `writer` - Destination of the table
///
/// # Returns
///
/// Result indicating success or failure
pub fn write_csv<W: Write>(
    word_bank: &WordBank,
    target_characters: &[char],
    writer: W,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer
        .write_record(csv_header(word_bank))
        .context("Failed to write CSV header")?;

    for row in csv_rows(word_bank, target_characters) {
        writer
            .write_record(&row)
            .context("Failed to write CSV record")?;
    }

    // Flush the writer to ensure all data is written
    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

/// Export the word bank to a CSV file at `output_path`, replacing any existing file
pub fn export(word_bank: &WordBank, target_characters: &[char], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create CSV output file: {}", output_path.display()))?;

    write_csv(word_bank, target_characters, file)?;
    log::info!(
        "Exported {} words in {} groups to {}",
        word_bank.len(),
        word_bank.groups().len(),
        output_path.display()
    );

    Ok(())
}

/// Build the end-of-run console summary
///
/// # Arguments
///
/// * `report` - Outcome of the pipeline
/// * `output_path` - Where the table was written
/// * `elapsed` - Wall time of the run
///
/// # Returns
///
/// Formatted string for console output
pub fn format_summary(report: &PipelineReport, output_path: &Path, elapsed: Duration) -> String {
    let mut output = String::new();
    let bank = &report.word_bank;

    let failed = report
        .files
        .iter()
        .filter(|outcome| outcome.error.is_some())
        .count();

    output.push_str(&format!("\n{}\n", "Extraction Complete".bold()));
    output.push_str(&format!(
        "{} {}\n",
        "Files processed:".green(),
        report.files.len() - failed
    ));
    if failed > 0 {
        output.push_str(&format!("{} {}\n", "Files failed:".red(), failed));
    }
    output.push_str(&format!("{} {}\n", "Distinct words:".green(), bank.len()));

    for (index, label) in bank.groups().iter().enumerate() {
        output.push_str(&format!(
            "  {}: {}\n",
            label.cyan().bold(),
            bank.total_in_group(index)
        ));
    }

    output.push_str(&format!("{} {}\n", "Output:".green(), output_path.display()));
    output.push_str(&format!(
        "{} {:.2} seconds\n",
        "Time elapsed:".green(),
        elapsed.as_secs_f64()
    ));

    output
}

/// One console line describing a failed file
pub fn format_file_error(outcome: &FileOutcome) -> Option<String> {
    let error = outcome.error.as_ref()?;
    let line = match error {
        ExtractError::NotFound { path } => {
            format!("Error: {} does not exist.", path.display())
        }
        other => format!(
            "Error processing file {}: {}",
            outcome.path.display(),
            other
        ),
    };

    Some(line)
}
