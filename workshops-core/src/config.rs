//! Run configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.workshops/
//!   config.yaml   (optional; every field has a built-in default)
//! ```
//!
//! # API pattern
//!
//! - `fn_at(home: &Path, …)`: explicit home, used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable settings for one batch run. Loaded once at start-up and passed
/// by reference to everything that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Spreadsheet holding the coordination sheet.
    pub spreadsheet_id: String,
    /// A1-notation range read from the spreadsheet.
    pub range: String,
    /// Namespace that owns every workshop repository.
    pub organization: String,
    /// `owner/name` of the repository forked for new workshops.
    pub template_repository: String,
    /// Phrase in the template README replaced with the workshop name.
    pub readme_placeholder: String,
    /// Permission granted to each book chair.
    pub collaborator_permission: String,
    /// Optional directory of `.tera` files overriding the embedded templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    pub columns: ColumnNames,
    pub event: EventConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: "1qGfDoY4YUJuZ4dGjvut37xeRdbserDUQ_DqXrTabRTY".to_string(),
            range: "Ark1!A:AC".to_string(),
            organization: "emnlp-2022".to_string(),
            template_repository: "emnlp-2022/workshop-template".to_string(),
            readme_placeholder: "EMNLP 2022 workshop template".to_string(),
            collaborator_permission: "admin".to_string(),
            template_dir: None,
            columns: ColumnNames::default(),
            event: EventConfig::default(),
        }
    }
}

/// Header names of the columns the parser reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub acronym: String,
    pub name: String,
    pub website: String,
    pub organizers: String,
    pub date: String,
    pub book_chair: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            acronym: "acronym".to_string(),
            name: "name".to_string(),
            website: "website".to_string(),
            organizers: "organizers".to_string(),
            date: "date".to_string(),
            book_chair: "book chair github username".to_string(),
        }
    }
}

/// Conference-wide constants embedded in the rendered metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Date cell value that stands for the two-day slot.
    pub two_day_literal: String,
    pub two_day_start: NaiveDate,
    pub two_day_end: NaiveDate,
    pub location: String,
    pub cover_subtitle: String,
    pub publisher: String,
    pub volume_name: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            two_day_literal: "7 & 8 December".to_string(),
            two_day_start: NaiveDate::from_ymd_opt(2022, 12, 7).unwrap_or_default(),
            two_day_end: NaiveDate::from_ymd_opt(2022, 12, 8).unwrap_or_default(),
            location: "Abu Dhabi, United Arab Emirates (Hybrid)".to_string(),
            cover_subtitle: "Proceedings of the Workshop".to_string(),
            publisher: "Association for Computational Linguistics".to_string(),
            volume_name: "1".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// `<home>/.workshops/config.yaml`. No I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".workshops").join("config.yaml")
}

/// Load the config file at `path`. Missing fields take their defaults.
pub fn load_from(path: &Path) -> Result<SyncConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `<home>/.workshops/config.yaml`, or the defaults when it is absent.
pub fn load_at(home: &Path) -> Result<SyncConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(SyncConfig::default());
    }
    load_from(&path)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<SyncConfig, ConfigError> {
    load_at(&home()?)
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
