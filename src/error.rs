use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while initializing, seeding or reporting on a database.
#[derive(Debug, Error)]
pub enum Error {
    #[error("sqlite error")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to reset database file {path}")]
    Reset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("seed for table {table}: {reason}")]
    InvalidSeed { table: String, reason: String },

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("failed to read config {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to write report")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn wrapped_causes_are_not_repeated_in_the_message() {
        let err = Error::from(rusqlite::Error::InvalidQuery);
        let cause = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert_eq!(err.to_string(), "sqlite error");
        assert!(!cause.is_empty());

        let err = Error::ConfigRead {
            path: PathBuf::from("seed-report.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read config seed-report.toml");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("missing"));

        let chain = format!("{:#}", anyhow::Error::new(Error::from(rusqlite::Error::InvalidQuery)));
        assert_eq!(chain.matches(&cause).count(), 1);
    }
}
