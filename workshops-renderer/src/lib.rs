//! # workshops-renderer
//!
//! Tera-based rendering of the files kept in sync on every workshop
//! repository.
//!
//! Call [`Renderer::render`] with a parsed record and the current README
//! text to obtain a [`RenderedMetadata`].

pub mod context;
pub mod engine;
pub mod error;

pub use context::MetadataContext;
pub use engine::{
    patch_readme, RenderedMetadata, Renderer, RepoSettings, TemplateEngine, TrackedFile,
};
pub use error::RenderError;
