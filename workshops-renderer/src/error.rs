//! Error types for workshops-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while building the template set or rendering a record.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A template failed to parse or render (bad syntax, missing variable).
    #[error("template error: {0}")]
    Tera(#[from] tera::Error),

    /// The configured `template_dir` could not be read.
    #[error("cannot read template {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
