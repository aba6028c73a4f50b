//! Batch driver: every sheet row, one at a time, each ending in a reported
//! outcome.
//!
//! Per-record errors stop at this boundary. A failed row never prevents the
//! rows after it from being processed.

use std::fmt;

use thiserror::Error;

use workshops_core::{record, RecordError, RepoFullName, SheetRow, SyncConfig};
use workshops_renderer::Renderer;

use crate::error::SyncError;
use crate::host::RepositoryHost;
use crate::planner::{Confirm, ExistingPolicy, PlanOutcome, Planner};
use crate::writer::FileWrite;

/// Why a row produced no remote changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A required cell (the book chair) is blank.
    MissingRequiredField { field: String },
    /// The repository exists and existing repositories are skipped.
    ExistingRepository,
    /// The operator declined the create/update prompt.
    Declined,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingRequiredField { field } => write!(f, "{field} not set"),
            SkipReason::ExistingRepository => write!(f, "repository already exists"),
            SkipReason::Declined => write!(f, "declined"),
        }
    }
}

/// Why a row failed.
#[derive(Debug, Error)]
pub enum RecordFailure {
    #[error(transparent)]
    Parse(RecordError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Final state of one row.
#[derive(Debug)]
pub enum RecordOutcome {
    Created {
        repository: RepoFullName,
        writes: Vec<FileWrite>,
    },
    Updated {
        repository: RepoFullName,
        writes: Vec<FileWrite>,
    },
    Skipped { reason: SkipReason },
    Failed { error: RecordFailure },
}

impl RecordOutcome {
    /// Short label: `created`, `updated`, `skipped` or `failed`.
    pub fn label(&self) -> &'static str {
        match self {
            RecordOutcome::Created { .. } => "created",
            RecordOutcome::Updated { .. } => "updated",
            RecordOutcome::Skipped { .. } => "skipped",
            RecordOutcome::Failed { .. } => "failed",
        }
    }

    /// File writes performed, empty unless created or updated.
    pub fn writes(&self) -> &[FileWrite] {
        match self {
            RecordOutcome::Created { writes, .. } | RecordOutcome::Updated { writes, .. } => {
                writes
            }
            _ => &[],
        }
    }
}

impl From<PlanOutcome> for RecordOutcome {
    fn from(outcome: PlanOutcome) -> Self {
        match outcome {
            PlanOutcome::Created { repository, writes } => {
                RecordOutcome::Created { repository, writes }
            }
            PlanOutcome::Updated { repository, writes } => {
                RecordOutcome::Updated { repository, writes }
            }
            PlanOutcome::SkippedExisting { .. } => RecordOutcome::Skipped {
                reason: SkipReason::ExistingRepository,
            },
            PlanOutcome::Declined { .. } => RecordOutcome::Skipped {
                reason: SkipReason::Declined,
            },
        }
    }
}

/// Outcome of one row, keyed by the acronym cell.
#[derive(Debug)]
pub struct RecordReport {
    pub acronym: String,
    pub outcome: RecordOutcome,
}

/// Outcome counts across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_reports(reports: &[RecordReport]) -> Self {
        let mut summary = BatchSummary::default();
        for report in reports {
            match report.outcome {
                RecordOutcome::Created { .. } => summary.created += 1,
                RecordOutcome::Updated { .. } => summary.updated += 1,
                RecordOutcome::Skipped { .. } => summary.skipped += 1,
                RecordOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Run the whole batch.
///
/// Only start-up problems (a broken user template directory) are returned as
/// `Err`; everything that goes wrong for an individual row is reported in
/// that row's [`RecordOutcome`].
pub fn run<H: RepositoryHost + ?Sized>(
    rows: &[SheetRow],
    config: &SyncConfig,
    host: &H,
    confirm: &mut dyn Confirm,
    skip_existing: bool,
) -> Result<Vec<RecordReport>, SyncError> {
    let renderer = Renderer::new(config)?;
    let planner = Planner::new(host, &renderer, config);
    let policy = ExistingPolicy::from_skip_existing(skip_existing);

    let mut reports = Vec::with_capacity(rows.len());
    for row in rows {
        let acronym = row.get(&config.columns.acronym).to_string();
        let outcome = process_row(&planner, row, config, confirm, policy);
        log_outcome(&acronym, &outcome);
        reports.push(RecordReport { acronym, outcome });
    }
    Ok(reports)
}

fn process_row<H: RepositoryHost + ?Sized>(
    planner: &Planner<'_, H>,
    row: &SheetRow,
    config: &SyncConfig,
    confirm: &mut dyn Confirm,
    policy: ExistingPolicy,
) -> RecordOutcome {
    let record = match record::parse(row, config) {
        Ok(record) => record,
        Err(RecordError::MissingRequiredField { field, .. }) => {
            return RecordOutcome::Skipped {
                reason: SkipReason::MissingRequiredField { field },
            };
        }
        Err(err) => {
            return RecordOutcome::Failed {
                error: RecordFailure::Parse(err),
            };
        }
    };

    match planner.ensure_repository(&record, confirm, policy) {
        Ok(outcome) => outcome.into(),
        Err(err) => RecordOutcome::Failed { error: err.into() },
    }
}

fn log_outcome(acronym: &str, outcome: &RecordOutcome) {
    match outcome {
        RecordOutcome::Created { repository, .. } => {
            tracing::info!("{acronym}: created {repository}")
        }
        RecordOutcome::Updated { repository, .. } => {
            tracing::info!("{acronym}: updated {repository}")
        }
        RecordOutcome::Skipped { reason } => tracing::warn!("{acronym}: skipped ({reason})"),
        RecordOutcome::Failed { error } => tracing::warn!("{acronym}: failed: {error}"),
    }
}
