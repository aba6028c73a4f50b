//! Error types for workshops-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a spreadsheet row into a [`WorkshopRecord`].
///
/// [`WorkshopRecord`]: crate::types::WorkshopRecord
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The date cell is neither the two-day literal nor `DD/MM/YYYY`.
    #[error("malformed date '{value}' for {acronym}; expected DD/MM/YYYY")]
    MalformedDate { acronym: String, value: String },

    /// A cell the pipeline cannot proceed without is blank.
    #[error("{field} not set for {acronym}")]
    MissingRequiredField { acronym: String, field: String },
}

/// Errors raised while loading [`SyncConfig`].
///
/// [`SyncConfig`]: crate::config::SyncConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure reading the config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, with the offending file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
