//! Version-guarded remote writer.
//!
//! ## `sync_file`
//!
//! 1. Render content (already done by caller).
//! 2. Fetch the file's current content and version token.
//! 3. Compare byte-for-byte → skip if identical.
//! 4. Write, passing the version token read in step 2.

use similar::TextDiff;

use workshops_core::RepoFullName;
use workshops_renderer::TrackedFile;

use crate::error::{HostError, SyncError};
use crate::host::RepositoryHost;

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileWrite {
    /// Remote content differed and was replaced.
    Updated { path: String },
    /// Remote content already equals the rendered content.
    Unchanged { path: String },
}

impl FileWrite {
    pub fn path(&self) -> &str {
        match self {
            FileWrite::Updated { path } | FileWrite::Unchanged { path } => path,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, FileWrite::Updated { .. })
    }
}

// ---------------------------------------------------------------------------
// sync_file
// ---------------------------------------------------------------------------

/// Make `file` in `repo` equal to `content`, writing only on mismatch.
pub fn sync_file<H: RepositoryHost + ?Sized>(
    host: &H,
    repo: &RepoFullName,
    file: TrackedFile,
    content: &str,
) -> Result<FileWrite, SyncError> {
    let path = file.path();
    let current = host.get_file(repo, path)?;

    if current.content == content {
        tracing::debug!("unchanged: {repo}/{path}");
        return Ok(FileWrite::Unchanged {
            path: path.to_string(),
        });
    }

    if tracing::log_enabled!(tracing::Level::Debug) {
        tracing::debug!("{}", unified_diff(path, &current.content, content));
    }

    let message = format!("update {path}");
    host.update_file(repo, path, &message, content, &current.version)
        .map_err(|e| match e {
            HostError::Conflict(_) => SyncError::Conflict {
                repository: repo.clone(),
                path: path.to_string(),
            },
            other => SyncError::Remote(other),
        })?;

    tracing::info!("wrote: {repo}/{path}");
    Ok(FileWrite::Updated {
        path: path.to_string(),
    })
}

/// Unified diff of `old` → `new` with `a/` / `b/` headers.
pub fn unified_diff(path: &str, old: &str, new: &str) -> String {
    let old_header = format!("a/{path}");
    let new_header = format!("b/{path}");
    TextDiff::from_lines(old, new)
        .unified_diff()
        .header(&old_header, &new_header)
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
