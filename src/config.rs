//! Run configuration, read from an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory that receives the scenario database files.
    pub output_dir: PathBuf,
    /// Date treated as "today" by date-relative scenarios. Defaults to the
    /// local date at run time.
    pub as_of: Option<NaiveDate>,
    /// Text printed for NULL cells, unless a scenario overrides it.
    pub null_placeholder: String,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            as_of: None,
            null_placeholder: "NULL".into(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml(&text)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Layer command-line flags over the loaded values. Each `-v` raises
    /// the log level one step: `info`, then `debug`.
    pub fn apply_overrides(
        &mut self,
        output_dir: Option<PathBuf>,
        as_of: Option<NaiveDate>,
        verbose: u8,
    ) {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        if as_of.is_some() {
            self.as_of = as_of;
        }
        match verbose {
            0 => {}
            1 => self.logging.level = "info".into(),
            _ => self.logging.level = "debug".into(),
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human-oriented events.
    Pretty,
    /// One line per event.
    Compact,
    Json,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber. Logs go to stderr so reports on
    /// stdout stay clean; `RUST_LOG` overrides the configured level.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format {
            LogFormat::Json => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            LogFormat::Pretty => {
                fmt()
                    .pretty()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            LogFormat::Compact => {
                fmt()
                    .compact()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = Config::from_toml(
            r#"
            output_dir = "target/reports"
            as_of = "2025-10-01"
            null_placeholder = "-"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("target/reports"));
        assert_eq!(config.as_of(), NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_eq!(config.null_placeholder, "-");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn log_format_names_select_formatters() {
        let pretty = Config::from_toml("[logging]\nformat = \"pretty\"").unwrap();
        assert_eq!(pretty.logging.format, LogFormat::Pretty);
        let compact = Config::from_toml("[logging]\nformat = \"compact\"").unwrap();
        assert_eq!(compact.logging.format, LogFormat::Compact);
        assert!(Config::from_toml("[logging]\nformat = \"fancy\"").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = Config::from_toml(
            r#"
            output_dir = "from-file"
            as_of = "2025-10-01"
            "#,
        )
        .unwrap();

        config.apply_overrides(None, None, 0);
        assert_eq!(config.output_dir, PathBuf::from("from-file"));
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2025, 10, 1));
        assert_eq!(config.logging.level, "warn");

        let as_of = NaiveDate::from_ymd_opt(2024, 2, 29);
        config.apply_overrides(Some(PathBuf::from("from-flag")), as_of, 1);
        assert_eq!(config.output_dir, PathBuf::from("from-flag"));
        assert_eq!(config.as_of, as_of);
        assert_eq!(config.logging.level, "info");

        config.apply_overrides(None, None, 3);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.as_of, as_of);
    }

    #[test]
    fn rejects_bad_dates() {
        let err = Config::from_toml(r#"as_of = "yesterday""#).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/seed-report.toml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
