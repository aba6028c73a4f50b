//! In-memory [`RepositoryHost`] recording every call.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use workshops_core::{record, RepoFullName, SheetRow, SyncConfig, Username, WorkshopRecord};
use workshops_renderer::RepoSettings;
use workshops_sync::{HostError, RemoteFile, RepoLookup, RepositoryHost};

pub const TEMPLATE: &str = "emnlp-2022/workshop-template";
pub const TEMPLATE_README: &str = "# EMNLP 2022 workshop template\n\nSee the EMNLP 2022 workshop template docs.\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Find(String),
    Fork { template: String, organization: String, name: String },
    Edit { repo: String, settings: RepoSettings },
    AddCollaborator { repo: String, username: String, permission: String },
    GetFile { repo: String, path: String },
    UpdateFile { repo: String, path: String, message: String, content: String },
}

#[derive(Debug, Clone, Default)]
pub struct MemRepo {
    /// path → (content, version)
    pub files: BTreeMap<String, (String, String)>,
    pub settings: Option<RepoSettings>,
    pub collaborators: Vec<(String, String)>,
}

#[derive(Default)]
struct Inner {
    repos: BTreeMap<String, MemRepo>,
    known_users: BTreeSet<String>,
    calls: Vec<Call>,
    next_version: u64,
    conflict_on: Option<String>,
    transport_failure_on_fork: bool,
}

impl Inner {
    fn version(&mut self) -> String {
        self.next_version += 1;
        format!("v{}", self.next_version)
    }
}

#[derive(Default)]
pub struct MemoryHost {
    inner: RefCell<Inner>,
}

impl MemoryHost {
    /// Host holding only the template repository with the three tracked files.
    pub fn with_template() -> Self {
        let host = MemoryHost::default();
        host.add_repo(
            TEMPLATE,
            &[
                ("README.md", TEMPLATE_README),
                ("conference_details.yml", "book_title: TODO\n"),
                ("organizing_committee.yml", "- members: []\n"),
                ("papers.yml", "[]\n"),
            ],
        );
        host
    }

    pub fn add_repo(&self, full_name: &str, files: &[(&str, &str)]) {
        let mut inner = self.inner.borrow_mut();
        let mut repo = MemRepo::default();
        for (path, content) in files {
            let version = inner.version();
            repo.files
                .insert(path.to_string(), (content.to_string(), version));
        }
        inner.repos.insert(full_name.to_string(), repo);
    }

    pub fn add_user(&self, username: &str) {
        self.inner
            .borrow_mut()
            .known_users
            .insert(username.to_string());
    }

    /// Simulate someone else editing `path` remotely.
    pub fn set_file(&self, full_name: &str, path: &str, content: &str) {
        let mut inner = self.inner.borrow_mut();
        let version = inner.version();
        inner
            .repos
            .get_mut(full_name)
            .expect("repo exists")
            .files
            .insert(path.to_string(), (content.to_string(), version));
    }

    /// Make every update of `path` fail with a stale version token.
    pub fn conflict_on(&self, path: &str) {
        self.inner.borrow_mut().conflict_on = Some(path.to_string());
    }

    pub fn fail_forks(&self) {
        self.inner.borrow_mut().transport_failure_on_fork = true;
    }

    pub fn repo(&self, full_name: &str) -> Option<MemRepo> {
        self.inner.borrow().repos.get(full_name).cloned()
    }

    pub fn file(&self, full_name: &str, path: &str) -> Option<String> {
        self.repo(full_name)
            .and_then(|r| r.files.get(path).map(|(c, _)| c.clone()))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    pub fn update_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::UpdateFile { .. }))
            .count()
    }

    pub fn is_mutating(call: &Call) -> bool {
        matches!(
            call,
            Call::Fork { .. }
                | Call::Edit { .. }
                | Call::AddCollaborator { .. }
                | Call::UpdateFile { .. }
        )
    }

    pub fn mutation_count(&self) -> usize {
        self.calls().iter().filter(|c| Self::is_mutating(c)).count()
    }
}

impl RepositoryHost for MemoryHost {
    fn find_repository(&self, repo: &RepoFullName) -> Result<RepoLookup, HostError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::Find(repo.0.clone()));
        if inner.repos.contains_key(&repo.0) {
            Ok(RepoLookup::Found(repo.clone()))
        } else {
            Ok(RepoLookup::NotFound)
        }
    }

    fn fork_repository(
        &self,
        template: &RepoFullName,
        organization: &str,
        name: &str,
    ) -> Result<RepoFullName, HostError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::Fork {
            template: template.0.clone(),
            organization: organization.to_string(),
            name: name.to_string(),
        });
        if inner.transport_failure_on_fork {
            return Err(HostError::Transport("connection reset".into()));
        }
        let source = inner
            .repos
            .get(&template.0)
            .cloned()
            .ok_or_else(|| HostError::NotFound(template.0.clone()))?;
        let fork = RepoFullName::new(organization, name);
        inner.repos.insert(
            fork.0.clone(),
            MemRepo {
                files: source.files,
                settings: None,
                collaborators: vec![],
            },
        );
        Ok(fork)
    }

    fn edit_repository(
        &self,
        repo: &RepoFullName,
        settings: &RepoSettings,
    ) -> Result<RepoFullName, HostError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::Edit {
            repo: repo.0.clone(),
            settings: settings.clone(),
        });
        let mut entry = inner
            .repos
            .remove(&repo.0)
            .ok_or_else(|| HostError::NotFound(repo.0.clone()))?;
        entry.settings = Some(settings.clone());
        let owner = repo.0.split('/').next().unwrap_or_default();
        let renamed = RepoFullName::new(owner, &settings.name);
        inner.repos.insert(renamed.0.clone(), entry);
        Ok(renamed)
    }

    fn add_collaborator(
        &self,
        repo: &RepoFullName,
        username: &Username,
        permission: &str,
    ) -> Result<(), HostError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::AddCollaborator {
            repo: repo.0.clone(),
            username: username.0.clone(),
            permission: permission.to_string(),
        });
        if !inner.known_users.contains(&username.0) {
            return Err(HostError::NotFound(username.0.clone()));
        }
        let entry = inner
            .repos
            .get_mut(&repo.0)
            .ok_or_else(|| HostError::NotFound(repo.0.clone()))?;
        entry
            .collaborators
            .retain(|(user, _)| user != &username.0);
        entry
            .collaborators
            .push((username.0.clone(), permission.to_string()));
        Ok(())
    }

    fn get_file(&self, repo: &RepoFullName, path: &str) -> Result<RemoteFile, HostError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::GetFile {
            repo: repo.0.clone(),
            path: path.to_string(),
        });
        let (content, version) = inner
            .repos
            .get(&repo.0)
            .and_then(|r| r.files.get(path))
            .cloned()
            .ok_or_else(|| HostError::NotFound(format!("{}/{path}", repo.0)))?;
        Ok(RemoteFile {
            path: path.to_string(),
            content,
            version,
        })
    }

    fn update_file(
        &self,
        repo: &RepoFullName,
        path: &str,
        message: &str,
        content: &str,
        previous_version: &str,
    ) -> Result<(), HostError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::UpdateFile {
            repo: repo.0.clone(),
            path: path.to_string(),
            message: message.to_string(),
            content: content.to_string(),
        });
        if inner.conflict_on.as_deref() == Some(path) {
            return Err(HostError::Conflict(path.to_string()));
        }
        let version = inner.version();
        let file = inner
            .repos
            .get_mut(&repo.0)
            .and_then(|r| r.files.get_mut(path))
            .ok_or_else(|| HostError::NotFound(format!("{}/{path}", repo.0)))?;
        if file.1 != previous_version {
            return Err(HostError::Conflict(path.to_string()));
        }
        *file = (content.to_string(), version);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn example_row(acronym: &str, book_chair: &str) -> SheetRow {
    SheetRow::from_pairs([
        ("acronym", acronym),
        ("name", "Workshop on NLP for Science"),
        ("organizers", "Ana Silva and Ben Ortiz"),
        ("date", "08/12/2022"),
        ("website", "https://example.org"),
        ("book chair github username", book_chair),
    ])
}

pub fn example_record(book_chair: &str) -> WorkshopRecord {
    record::parse(&example_row("NLP4Science", book_chair), &SyncConfig::default())
        .expect("example row parses")
}

pub fn yes() -> impl FnMut(&str) -> bool {
    |_: &str| true
}

pub fn no() -> impl FnMut(&str) -> bool {
    |_: &str| false
}
