//! GitHub REST implementation of [`RepositoryHost`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use workshops_core::{RepoFullName, Username};
use workshops_renderer::RepoSettings;
use workshops_sync::{HostError, RemoteFile, RepoLookup, RepositoryHost};

use super::{agent, read_json, send};

const GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct RepoBody {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct ContentBody {
    path: String,
    sha: String,
    #[serde(default)]
    content: String,
}

/// Authenticated GitHub API handle. Read-only after construction.
pub struct GithubClient {
    agent: ureq::Agent,
    token: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Self {
        GithubClient {
            agent: agent(),
            token: token.into(),
        }
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        tracing::debug!("{method} {path}");
        self.agent
            .request(method, &format!("{GITHUB_API}{path}"))
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", "2022-11-28")
    }
}

impl RepositoryHost for GithubClient {
    fn find_repository(&self, repo: &RepoFullName) -> Result<RepoLookup, HostError> {
        match send(self.request("GET", &format!("/repos/{repo}")).call()) {
            Ok(response) => {
                let body: RepoBody = read_json(response)?;
                Ok(RepoLookup::Found(RepoFullName::from(body.full_name)))
            }
            Err(HostError::NotFound(_)) => Ok(RepoLookup::NotFound),
            Err(err) => Err(err),
        }
    }

    fn fork_repository(
        &self,
        template: &RepoFullName,
        organization: &str,
        name: &str,
    ) -> Result<RepoFullName, HostError> {
        let response = send(
            self.request("POST", &format!("/repos/{template}/forks"))
                .send_json(json!({ "organization": organization, "name": name })),
        )?;
        let body: RepoBody = read_json(response)?;
        Ok(RepoFullName::from(body.full_name))
    }

    fn edit_repository(
        &self,
        repo: &RepoFullName,
        settings: &RepoSettings,
    ) -> Result<RepoFullName, HostError> {
        let response = send(self.request("PATCH", &format!("/repos/{repo}")).send_json(json!({
            "name": settings.name,
            "description": settings.description,
            "homepage": settings.homepage,
            "private": settings.private,
        })))?;
        let body: RepoBody = read_json(response)?;
        Ok(RepoFullName::from(body.full_name))
    }

    fn add_collaborator(
        &self,
        repo: &RepoFullName,
        username: &Username,
        permission: &str,
    ) -> Result<(), HostError> {
        send(
            self.request("PUT", &format!("/repos/{repo}/collaborators/{username}"))
                .send_json(json!({ "permission": permission })),
        )?;
        Ok(())
    }

    fn get_file(&self, repo: &RepoFullName, path: &str) -> Result<RemoteFile, HostError> {
        let response = send(self.request("GET", &format!("/repos/{repo}/contents/{path}")).call())?;
        let body: ContentBody = read_json(response)?;
        Ok(RemoteFile {
            content: decode_content(&body.content)?,
            path: body.path,
            version: body.sha,
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
        send(
            self.request("PUT", &format!("/repos/{repo}/contents/{path}"))
                .send_json(json!({
                    "message": message,
                    "content": STANDARD.encode(content),
                    "sha": previous_version,
                })),
        )?;
        Ok(())
    }
}

/// Contents API bodies are base64 wrapped at 60 columns.
fn decode_content(encoded: &str) -> Result<String, HostError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| HostError::Decode(format!("file content is not base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| HostError::Decode(format!("file content is not UTF-8: {e}")))
}
