use crate::domain::ports::ConfigProvider;
use crate::utils::error::{HospitalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(HospitalError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: compact, json".to_string(),
            }),
        }
    }
}

/// Local wall-clock timestamps, e.g. `2024-05-01 09:30:12,045`.
struct LogTimestamp;

impl FormatTime for LogTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"))
    }
}

fn build_filter(level: Option<&str>, verbose: bool) -> EnvFilter {
    let default_directive = match (level, verbose) {
        (Some(level), _) => format!("hospital_records={}", level),
        (None, true) => "hospital_records=debug,info".to_string(),
        (None, false) => "hospital_records=info".to_string(),
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs the global subscriber. Logs are appended to the configured log
/// file, or written to stderr when none is set.
pub fn init_logger<C: ConfigProvider>(config: &C) -> Result<()> {
    let filter = build_filter(config.log_level(), config.verbose());

    let installed = match config.log_file() {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_timer(LogTimestamp)
                .with_target(false);

            match config.log_format() {
                LogFormat::Compact => tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.compact())
                    .try_init(),
                LogFormat::Json => tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.json())
                    .try_init(),
            }
        }
        None => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(LogTimestamp)
                .with_target(false);

            match config.log_format() {
                LogFormat::Compact => tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.compact())
                    .try_init(),
                LogFormat::Json => tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.json())
                    .try_init(),
            }
        }
    };

    installed.map_err(|e| HospitalError::ConfigError {
        message: format!("Failed to install logger: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}

