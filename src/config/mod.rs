#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::logger::{LogFormat, LOG_LEVELS};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_DATA_FILE: &str = "data/records.json";
pub const DEFAULT_LOG_FILE: &str = "hospital.log";

/// Resolved settings: defaults, then the TOML file, then command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            log_level: None,
            log_format: LogFormat::Compact,
            verbose: false,
        }
    }
}

impl AppConfig {
    pub fn from_toml(toml: &TomlConfig) -> Self {
        let mut config = Self {
            data_file: PathBuf::from(&toml.storage.data_file),
            log_level: toml.log_level().map(str::to_string),
            log_format: toml.log_format(),
            ..Self::default()
        };

        if let Some(logging) = &toml.logging {
            if logging.stderr.unwrap_or(false) {
                config.log_file = None;
            } else if let Some(file) = &logging.file {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        config
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_file", &self.data_file.to_string_lossy())?;
        if let Some(log_file) = &self.log_file {
            validate_path("log_file", &log_file.to_string_lossy())?;
        }
        if let Some(level) = &self.log_level {
            validate_one_of("log_level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    fn log_format(&self) -> LogFormat {
        self.log_format
    }

    fn verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data_file(), Path::new("data/records.json"));
        assert_eq!(config.log_file(), Some(Path::new("hospital.log")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let toml = TomlConfig::from_toml_str(
            r#"
[storage]
data_file = "/tmp/ward/records.json"

[logging]
level = "warn"
stderr = true
"#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&toml);
        assert_eq!(config.data_file, PathBuf::from("/tmp/ward/records.json"));
        assert_eq!(config.log_file, None);
        assert_eq!(config.log_level(), Some("warn"));
    }

    #[test]
    fn test_invalid_level_fails_validation() {
        let config = AppConfig {
            log_level: Some("chatty".to_string()),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
