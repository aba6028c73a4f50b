//! Tera rendering engine, [`TrackedFile`] and [`Renderer`].
//!
//! # Tracked files
//!
//! | File                 | Repository path            | Source                        |
//! |----------------------|----------------------------|-------------------------------|
//! | ConferenceDetails    | `conference_details.yml`   | `conference_details.yml.tera` |
//! | OrganizingCommittee  | `organizing_committee.yml` | `organizing_committee.yml.tera` |
//! | Readme               | `README.md`                | remote README + placeholder swap |

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tera::Tera;

use workshops_core::config::EventConfig;
use workshops_core::{SyncConfig, WorkshopRecord};

use crate::context::MetadataContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates (include_str!)
// ---------------------------------------------------------------------------

const CONFERENCE_DETAILS_TPL: &str = "conference_details.yml.tera";
const ORGANIZING_COMMITTEE_TPL: &str = "organizing_committee.yml.tera";

const TPLS: &[(&str, &str)] = &[
    (
        CONFERENCE_DETAILS_TPL,
        include_str!("templates/conference_details.yml.tera"),
    ),
    (
        ORGANIZING_COMMITTEE_TPL,
        include_str!("templates/organizing_committee.yml.tera"),
    ),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut templates = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert((*name).to_string(), (*content).to_string());
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    // `.yml.tera` names fall outside Tera's autoescape suffixes, so `&` in a
    // workshop name is rendered verbatim.
    let mut tera = Tera::default();
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TrackedFile
// ---------------------------------------------------------------------------

/// Files kept in sync on every workshop repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedFile {
    ConferenceDetails,
    OrganizingCommittee,
    Readme,
}

impl TrackedFile {
    /// All tracked files in write order.
    pub fn all() -> &'static [TrackedFile] {
        &[
            TrackedFile::ConferenceDetails,
            TrackedFile::OrganizingCommittee,
            TrackedFile::Readme,
        ]
    }

    /// Path of the file inside the repository.
    pub fn path(self) -> &'static str {
        match self {
            TrackedFile::ConferenceDetails => "conference_details.yml",
            TrackedFile::OrganizingCommittee => "organizing_committee.yml",
            TrackedFile::Readme => "README.md",
        }
    }
}

impl fmt::Display for TrackedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ---------------------------------------------------------------------------
// Rendered output
// ---------------------------------------------------------------------------

/// Cosmetic repository settings applied on every create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSettings {
    pub name: String,
    pub description: String,
    pub homepage: String,
    pub private: bool,
}

impl RepoSettings {
    pub fn from_record(record: &WorkshopRecord) -> Self {
        RepoSettings {
            name: record.acronym.clone(),
            description: record.name.clone(),
            homepage: record.website.clone(),
            private: true,
        }
    }
}

/// Everything derived from one record: file bodies plus repository settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMetadata {
    pub conference_details: String,
    pub organizing_committee: String,
    pub readme: String,
    pub settings: RepoSettings,
}

impl RenderedMetadata {
    /// Rendered body for `file`.
    pub fn content(&self, file: TrackedFile) -> &str {
        match file {
            TrackedFile::ConferenceDetails => &self.conference_details,
            TrackedFile::OrganizingCommittee => &self.organizing_committee,
            TrackedFile::Readme => &self.readme,
        }
    }
}

/// Replace every occurrence of `placeholder` in `template` with `name`.
///
/// One pass; a `name` that itself contains the placeholder is not rescanned.
pub fn patch_readme(template: &str, placeholder: &str, name: &str) -> String {
    if placeholder.is_empty() {
        return template.to_string();
    }
    template.replace(placeholder, name)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for the metadata templates with optional user overrides.
///
/// `user_template_dir` may contain `conference_details.yml.tera` and/or
/// `organizing_committee.yml.tera` replacing the embedded defaults.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render the two YAML documents: `(conference_details, organizing_committee)`.
    pub fn render(&self, ctx: &MetadataContext) -> Result<(String, String), RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        let details = self.tera.render(CONFERENCE_DETAILS_TPL, &tera_ctx)?;
        let committee = self.tera.render(ORGANIZING_COMMITTEE_TPL, &tera_ctx)?;
        Ok((details, committee))
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Pure record → [`RenderedMetadata`] renderer. Create once per run and reuse.
pub struct Renderer {
    engine: TemplateEngine,
    event: EventConfig,
    readme_placeholder: String,
}

impl Renderer {
    pub fn new(config: &SyncConfig) -> Result<Self, RenderError> {
        Ok(Renderer {
            engine: TemplateEngine::new(config.template_dir.as_deref())?,
            event: config.event.clone(),
            readme_placeholder: config.readme_placeholder.clone(),
        })
    }

    /// Render all tracked files for `record`. `readme_template` is the README
    /// text currently in the repository.
    pub fn render(
        &self,
        record: &WorkshopRecord,
        readme_template: &str,
    ) -> Result<RenderedMetadata, RenderError> {
        let ctx = MetadataContext::from_record(record, &self.event);
        let (conference_details, organizing_committee) = self.engine.render(&ctx)?;
        Ok(RenderedMetadata {
            conference_details,
            organizing_committee,
            readme: patch_readme(readme_template, &self.readme_placeholder, &record.name),
            settings: RepoSettings::from_record(record),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
