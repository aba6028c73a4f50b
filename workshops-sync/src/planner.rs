//! Per-record repository planning.
//!
//! ```text
//! LOOKUP ─┬─ NotFound ─ confirm? ─┬─ no  ─────────────── Declined
//!         │                       └─ yes ─ fork ─┐
//!         └─ Found ──┬─ skip_existing ────────── SkippedExisting
//!                    └─ confirm? ─┬─ no  ──────── Declined
//!                                 └─ yes ────────┴─ apply ─ Created | Updated
//! ```
//!
//! `apply` order is fixed: read README → render → settings → collaborators →
//! tracked files. A failure stops the sequence where it happened; earlier
//! writes are not rolled back.

use workshops_core::{RepoFullName, SyncConfig, WorkshopRecord};
use workshops_renderer::{Renderer, TrackedFile};

use crate::error::{HostError, SyncError};
use crate::host::{RepoLookup, RepositoryHost};
use crate::writer::{sync_file, FileWrite};

// ---------------------------------------------------------------------------
// Confirmation gate
// ---------------------------------------------------------------------------

/// Yes/no gate consulted before creating or updating a repository.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

// ---------------------------------------------------------------------------
// Policy / outcome
// ---------------------------------------------------------------------------

/// What to do when the target repository already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingPolicy {
    /// Ask before updating.
    #[default]
    Confirm,
    /// Leave existing repositories untouched.
    Skip,
}

impl ExistingPolicy {
    pub fn from_skip_existing(skip_existing: bool) -> Self {
        if skip_existing {
            ExistingPolicy::Skip
        } else {
            ExistingPolicy::Confirm
        }
    }
}

/// Terminal state of a successful planner run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    Created {
        repository: RepoFullName,
        writes: Vec<FileWrite>,
    },
    Updated {
        repository: RepoFullName,
        writes: Vec<FileWrite>,
    },
    /// Repository exists and the batch runs with `--skip-existing`.
    SkippedExisting { repository: RepoFullName },
    /// The confirmation gate said no. Nothing was touched.
    Declined {
        repository: RepoFullName,
        existed: bool,
    },
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

/// Brings one workshop repository in line with its record.
pub struct Planner<'a, H: RepositoryHost + ?Sized> {
    host: &'a H,
    renderer: &'a Renderer,
    config: &'a SyncConfig,
}

impl<'a, H: RepositoryHost + ?Sized> Planner<'a, H> {
    pub fn new(host: &'a H, renderer: &'a Renderer, config: &'a SyncConfig) -> Self {
        Planner {
            host,
            renderer,
            config,
        }
    }

    /// Look up `record`'s repository and create, update or skip it.
    pub fn ensure_repository(
        &self,
        record: &WorkshopRecord,
        confirm: &mut dyn Confirm,
        policy: ExistingPolicy,
    ) -> Result<PlanOutcome, SyncError> {
        let target = &record.repository;

        match self.host.find_repository(target)? {
            RepoLookup::Found(repo) => {
                if policy == ExistingPolicy::Skip {
                    tracing::info!("{repo} already exists, skipping");
                    return Ok(PlanOutcome::SkippedExisting { repository: repo });
                }
                if !confirm.confirm(&format!("{repo} already exists. Update?")) {
                    return Ok(PlanOutcome::Declined {
                        repository: repo,
                        existed: true,
                    });
                }
                tracing::info!("{repo} already exists, updating");
                let (repository, writes) = self.apply(repo, record)?;
                Ok(PlanOutcome::Updated { repository, writes })
            }
            RepoLookup::NotFound => {
                if !confirm.confirm(&format!("Create {target}?")) {
                    return Ok(PlanOutcome::Declined {
                        repository: target.clone(),
                        existed: false,
                    });
                }
                let template = RepoFullName::from(self.config.template_repository.as_str());
                let fork = self.host.fork_repository(
                    &template,
                    &self.config.organization,
                    &record.acronym,
                )?;
                tracing::info!("forked {template} into {fork} for {target}");
                let (repository, writes) = self.apply(fork, record)?;
                Ok(PlanOutcome::Created { repository, writes })
            }
        }
    }

    fn apply(
        &self,
        repo: RepoFullName,
        record: &WorkshopRecord,
    ) -> Result<(RepoFullName, Vec<FileWrite>), SyncError> {
        let readme = self.host.get_file(&repo, TrackedFile::Readme.path())?;
        let rendered = self.renderer.render(record, &readme.content)?;

        let repo = self.host.edit_repository(&repo, &rendered.settings)?;

        for username in &record.book_chairs {
            self.host
                .add_collaborator(&repo, username, &self.config.collaborator_permission)
                .map_err(|e| match e {
                    HostError::NotFound(_) => SyncError::UnknownCollaborator {
                        repository: repo.clone(),
                        username: username.clone(),
                    },
                    other => SyncError::Remote(other),
                })?;
            tracing::info!(
                "granted {} to {username} on {repo}",
                self.config.collaborator_permission
            );
        }

        let mut writes = Vec::with_capacity(TrackedFile::all().len());
        for file in TrackedFile::all() {
            writes.push(sync_file(self.host, &repo, *file, rendered.content(*file))?);
        }
        Ok((repo, writes))
    }
}
