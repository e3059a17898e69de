use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants;
use crate::error::{ConvertError, Result};
use crate::sql;

/// Settings for one conversion run.
///
/// Every field has a default in [`constants`]; `converter.toml` may override
/// any subset of them.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConverterConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub table_name: String,
    pub column_name: String,
    /// `None` or an empty string disables the part-of-speech filter.
    pub target_part_of_speech: Option<String>,
    pub batch_size: usize,
    pub max_word_length: usize,
    pub progress_interval: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(constants::DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(constants::DEFAULT_OUTPUT_PATH),
            table_name: constants::DEFAULT_TABLE_NAME.to_string(),
            column_name: constants::DEFAULT_COLUMN_NAME.to_string(),
            target_part_of_speech: Some(constants::DEFAULT_TARGET_POS.to_string()),
            batch_size: constants::DEFAULT_BATCH_SIZE,
            max_word_length: constants::DEFAULT_MAX_WORD_LENGTH,
            progress_interval: constants::DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ConverterConfig {
    /// Load `converter.toml` from the working directory, falling back to the
    /// built-in defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(constants::CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Self::default().validated();
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: ConverterConfig = toml::from_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        config.validated()
    }

    /// The active part-of-speech filter, if any.
    pub fn target_pos(&self) -> Option<&str> {
        self.target_part_of_speech
            .as_deref()
            .filter(|pos| !pos.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ConvertError::Config(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        if self.max_word_length == 0 {
            return Err(ConvertError::Config(
                "max_word_length must be greater than zero".to_string(),
            ));
        }
        for (field, value) in [
            ("table_name", &self.table_name),
            ("column_name", &self.column_name),
        ] {
            if !sql::is_identifier(value) {
                return Err(ConvertError::Config(format!(
                    "{} '{}' is not a plain SQL identifier",
                    field, value
                )));
            }
        }
        Ok(())
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_constants() {
        let config = ConverterConfig::default();
        assert_eq!(config.table_name, "dictionary");
        assert_eq!(config.column_name, "name");
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.max_word_length, 100);
        assert_eq!(config.target_pos(), Some("명"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConverterConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ConverterConfig::default());
    }

    #[test]
    fn test_partial_overlay() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "batch_size = 50").unwrap();
        writeln!(file, "table_name = \"words\"").unwrap();
        writeln!(file, "target_part_of_speech = \"\"").unwrap();

        let config = ConverterConfig::load_from(file.path()).unwrap();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.table_name, "words");
        assert_eq!(config.column_name, "name");
        assert_eq!(config.target_pos(), None);
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let config = ConverterConfig {
            batch_size: 0,
            ..ConverterConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_rejects_unsafe_identifiers() {
        let config = ConverterConfig {
            table_name: "dictionary; DROP TABLE users".to_string(),
            ..ConverterConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConvertError::Config(_))));

        let config = ConverterConfig {
            column_name: "1name".to_string(),
            ..ConverterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "batch_size = \"lots\"").unwrap();
        let result = ConverterConfig::load_from(file.path());
        assert!(matches!(result, Err(ConvertError::Toml(_))));
    }
}
