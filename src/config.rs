//! Run configuration
//!
//! Settings come from built-in defaults, then an optional JSON config file,
//! then command line overrides, in that order.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

/// Accented letters counted by default
pub const DEFAULT_TARGET_CHARACTERS: [char; 6] = ['à', 'è', 'é', 'ì', 'ò', 'ù'];

/// Default input documents
pub const DEFAULT_INPUTS: [&str; 2] = ["file1.rtf", "file2.rtf"];

/// Default output table
pub const DEFAULT_OUTPUT: &str = "word_bank.csv";

/// Error while building the run configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("target character entry {0:?} must be exactly one character")]
    InvalidCharacter(String),

    #[error("no input documents given")]
    NoInputs,
}

/// One document to extract, with the group label its counts go to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputSpec {
    pub path: PathBuf,
    #[serde(default)]
    pub label: Option<String>,
}

/// Contents of a JSON configuration file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub target_characters: Option<Vec<String>>,
    #[serde(default)]
    pub inputs: Option<Vec<InputSpec>>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub inputs: Vec<PathBuf>,
    pub labels: Vec<String>,
    pub output: Option<PathBuf>,
    pub chars: Option<String>,
}

/// A document paired with its resolved group label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub path: PathBuf,
    pub label: String,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub inputs: Vec<Input>,
    pub target_characters: Vec<char>,
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            inputs: DEFAULT_INPUTS
                .iter()
                .enumerate()
                .map(|(index, path)| Input {
                    path: PathBuf::from(path),
                    label: default_label(index),
                })
                .collect(),
            target_characters: DEFAULT_TARGET_CHARACTERS.to_vec(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Settings {
    /// Layer a config file and command line overrides on top of the defaults
    ///
    /// # Arguments
    ///
    /// * `file` - Parsed configuration file, if one was given
    /// * `cli` - Command line overrides
    ///
    /// # Returns
    ///
    /// The resolved settings, or a `ConfigError` if they are unusable
    pub fn resolve(file: Option<FileConfig>, cli: CliOverrides) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        if let Some(file) = file {
            if let Some(entries) = file.target_characters {
                settings.target_characters = parse_target_entries(&entries)?;
            }
            if let Some(inputs) = file.inputs {
                settings.inputs = inputs
                    .into_iter()
                    .enumerate()
                    .map(|(index, spec)| Input {
                        path: spec.path,
                        label: spec.label.unwrap_or_else(|| default_label(index)),
                    })
                    .collect();
            }
            if let Some(output) = file.output {
                settings.output = output;
            }
        }

        if !cli.inputs.is_empty() {
            settings.inputs = cli
                .inputs
                .into_iter()
                .enumerate()
                .map(|(index, path)| Input {
                    path,
                    label: default_label(index),
                })
                .collect();
        }
        for (input, label) in settings.inputs.iter_mut().zip(cli.labels.iter()) {
            input.label = label.clone();
        }
        if cli.labels.len() > settings.inputs.len() {
            warn!(
                "{} labels given for {} inputs; extra labels ignored",
                cli.labels.len(),
                settings.inputs.len()
            );
        }

        if let Some(chars) = cli.chars {
            settings.target_characters = chars.chars().collect();
        }
        if let Some(output) = cli.output {
            settings.output = output;
        }

        if settings.inputs.is_empty() {
            return Err(ConfigError::NoInputs);
        }
        if settings.target_characters.is_empty() {
            warn!("No target characters configured; no words will be counted");
        }

        Ok(settings)
    }
}

/// Group label used when none is given for the input at `index`
pub fn default_label(index: usize) -> String {
    match index {
        0 => "First File".to_string(),
        1 => "Second File".to_string(),
        n => format!("File {}", n + 1),
    }
}

/// Convert config file entries into characters, one per entry
fn parse_target_entries(entries: &[String]) -> Result<Vec<char>, ConfigError> {
    entries
        .iter()
        .map(|entry| {
            let mut chars = entry.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(ConfigError::InvalidCharacter(entry.clone())),
            }
        })
        .collect()
}

/// Load a JSON configuration file
///
/// # Arguments
///
/// * `path` - Path to the configuration file
///
/// # Returns
///
/// The parsed configuration
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&config_str).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_program() {
        let settings = Settings::resolve(None, CliOverrides::default()).expect("Failed to resolve");

        assert_eq!(
            settings.inputs,
            vec![
                Input {
                    path: PathBuf::from("file1.rtf"),
                    label: "First File".to_string(),
                },
                Input {
                    path: PathBuf::from("file2.rtf"),
                    label: "Second File".to_string(),
                },
            ]
        );
        assert_eq!(settings.target_characters, vec!['à', 'è', 'é', 'ì', 'ò', 'ù']);
        assert_eq!(settings.output, PathBuf::from("word_bank.csv"));
    }

    #[test]
    fn test_default_labels() {
        assert_eq!(default_label(0), "First File");
        assert_eq!(default_label(1), "Second File");
        assert_eq!(default_label(2), "File 3");
    }

    #[test]
    fn test_file_config_then_cli() {
        let file: FileConfig = serde_json::from_str(
            r#"{
                "target_characters": ["à", "ù"],
                "inputs": [{"path": "a.rtf", "label": "A"}, {"path": "b.rtf"}],
                "output": "from_file.csv"
            }"#,
        )
        .expect("Failed to parse config");

        let cli = CliOverrides {
            labels: vec!["Uno".to_string()],
            output: Some(PathBuf::from("from_cli.csv")),
            ..CliOverrides::default()
        };

        let settings = Settings::resolve(Some(file), cli).expect("Failed to resolve");
        assert_eq!(settings.target_characters, vec!['à', 'ù']);
        assert_eq!(settings.inputs[0].label, "Uno");
        assert_eq!(settings.inputs[1].label, "Second File");
        assert_eq!(settings.inputs[1].path, PathBuf::from("b.rtf"));
        assert_eq!(settings.output, PathBuf::from("from_cli.csv"));
    }

    #[test]
    fn test_cli_inputs_and_chars() {
        let cli = CliOverrides {
            inputs: vec![PathBuf::from("x.rtf"), PathBuf::from("y.rtf"), PathBuf::from("z.rtf")],
            chars: Some("äö".to_string()),
            ..CliOverrides::default()
        };

        let settings = Settings::resolve(None, cli).expect("Failed to resolve");
        let labels: Vec<&str> = settings.inputs.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["First File", "Second File", "File 3"]);
        assert_eq!(settings.target_characters, vec!['ä', 'ö']);
    }

    #[test]
    fn test_invalid_target_entry() {
        let file = FileConfig {
            target_characters: Some(vec!["àè".to_string()]),
            ..FileConfig::default()
        };

        assert!(matches!(
            Settings::resolve(Some(file), CliOverrides::default()),
            Err(ConfigError::InvalidCharacter(entry)) if entry == "àè"
        ));
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let file = FileConfig {
            inputs: Some(Vec::new()),
            ..FileConfig::default()
        };

        assert!(matches!(
            Settings::resolve(Some(file), CliOverrides::default()),
            Err(ConfigError::NoInputs)
        ));
    }

    #[test]
    fn test_load_config_errors() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let missing = dir.path().join("missing.json");
        assert!(matches!(load_config(&missing), Err(ConfigError::NotFound(_))));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").expect("Failed to write config");
        assert!(matches!(load_config(&broken), Err(ConfigError::Parse { .. })));
    }
}
