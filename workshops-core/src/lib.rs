//! Workshops core library: domain types, row parsing and run configuration.
//!
//! - [`types`]: newtypes, [`SheetRow`] and [`WorkshopRecord`]
//! - [`record`]: row → record parsing
//! - [`config`]: [`SyncConfig`] load / defaults
//! - [`error`]: [`RecordError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod record;
pub mod types;

pub use config::SyncConfig;
pub use error::{ConfigError, RecordError};
pub use types::{Organizer, RepoFullName, SheetRow, Username, WorkshopRecord};
