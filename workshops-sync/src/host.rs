//! The repository-hosting collaborator.
//!
//! [`RepositoryHost`] is the only way the planner touches remote state. The
//! CLI provides the GitHub implementation; tests use an in-memory one.

use workshops_core::{RepoFullName, Username};
use workshops_renderer::RepoSettings;

use crate::error::HostError;

/// Result of resolving a repository by its full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoLookup {
    Found(RepoFullName),
    NotFound,
}

/// A file's current content plus the opaque token identifying that revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    pub content: String,
    pub version: String,
}

/// Operations consumed from the code-hosting platform.
///
/// Every call is blocking. Implementations map "does not exist" responses to
/// [`HostError::NotFound`] and stale version tokens to [`HostError::Conflict`].
pub trait RepositoryHost {
    /// Existence check. Absence is [`RepoLookup::NotFound`], not an error.
    fn find_repository(&self, repo: &RepoFullName) -> Result<RepoLookup, HostError>;

    /// Fork `template` into `organization` as `name`, returning the new
    /// repository.
    fn fork_repository(
        &self,
        template: &RepoFullName,
        organization: &str,
        name: &str,
    ) -> Result<RepoFullName, HostError>;

    /// Apply cosmetic settings. Returns the (possibly renamed) repository.
    fn edit_repository(
        &self,
        repo: &RepoFullName,
        settings: &RepoSettings,
    ) -> Result<RepoFullName, HostError>;

    /// Grant `username` access at `permission`.
    fn add_collaborator(
        &self,
        repo: &RepoFullName,
        username: &Username,
        permission: &str,
    ) -> Result<(), HostError>;

    fn get_file(&self, repo: &RepoFullName, path: &str) -> Result<RemoteFile, HostError>;

    /// Replace `path` with `content`, guarded by the version last read.
    fn update_file(
        &self,
        repo: &RepoFullName,
        path: &str,
        message: &str,
        content: &str,
        previous_version: &str,
    ) -> Result<(), HostError>;
}
