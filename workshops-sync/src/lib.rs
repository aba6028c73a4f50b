//! # workshops-sync
//!
//! Repository planning, version-guarded file writes and the batch driver.
//!
//! Call [`batch::run`] with the sheet rows and a [`RepositoryHost`] to bring
//! every workshop repository in line with the coordination sheet, or drive a
//! single record through [`Planner::ensure_repository`].

pub mod batch;
pub mod error;
pub mod host;
pub mod planner;
pub mod writer;

pub use batch::{BatchSummary, RecordFailure, RecordOutcome, RecordReport, SkipReason};
pub use error::{HostError, SyncError};
pub use host::{RemoteFile, RepoLookup, RepositoryHost};
pub use planner::{Confirm, ExistingPolicy, PlanOutcome, Planner};
pub use writer::{sync_file, FileWrite};
