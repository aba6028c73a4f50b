//! Error types for workshops-sync.

use thiserror::Error;

use workshops_core::{RepoFullName, Username};
use workshops_renderer::RenderError;

/// Failures reported by a [`RepositoryHost`] implementation.
///
/// [`RepositoryHost`]: crate::host::RepositoryHost
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The addressed repository, file or account does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The version token supplied with a write no longer matches.
    #[error("version conflict on {0}")]
    Conflict(String),

    /// Any other non-success response.
    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    /// Connection, TLS or authentication failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// All errors that end a single record's sync.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// A book chair username the host does not know.
    #[error("unknown username '{username}' (for {repository})")]
    UnknownCollaborator {
        repository: RepoFullName,
        username: Username,
    },

    /// A tracked file changed remotely between read and write.
    #[error("{path} in {repository} changed remotely; rerun to pick up the new version")]
    Conflict {
        repository: RepoFullName,
        path: String,
    },

    /// Transport or service failure from the hosting platform.
    #[error("remote service error: {0}")]
    Remote(#[from] HostError),
}
