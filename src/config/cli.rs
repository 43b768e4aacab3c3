use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "hospital")]
#[command(about = "Hospital patient and doctor records manager")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON file holding patients, doctors and assignments
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Append-only log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log to stderr instead of a file
    #[arg(long, conflicts_with = "log_file")]
    pub log_stderr: bool,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Layers explicit flags over the TOML file (if any) and validates the result.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let toml = TomlConfig::from_file(path)?;
                toml.validate()?;
                AppConfig::from_toml(&toml)
            }
            None => AppConfig::default(),
        };

        if let Some(data_file) = &self.data_file {
            config.data_file = data_file.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
        if self.log_stderr {
            config.log_file = None;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config.verbose = self.verbose;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_resolve_defaults() {
        let cli = CliConfig::parse_from(["hospital"]);
        assert_eq!(cli.resolve().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_flags_override_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_file = \"from-toml.json\"\n\n[logging]\nformat = \"json\"\n")
            .unwrap();
        let config_path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from(["hospital", "--config", config_path.as_str()]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.data_file, PathBuf::from("from-toml.json"));
        assert_eq!(config.log_format, LogFormat::Json);

        let cli = CliConfig::parse_from([
            "hospital",
            "--config",
            config_path.as_str(),
            "--data-file",
            "override.json",
            "--log-stderr",
            "--verbose",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.data_file, PathBuf::from("override.json"));
        assert_eq!(config.log_file, None);
        assert!(config.verbose);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = CliConfig::parse_from(["hospital", "--config", "/nonexistent/hospital.toml"]);
        assert!(cli.resolve().is_err());
    }
}
