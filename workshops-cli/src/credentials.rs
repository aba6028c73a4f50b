//! Access tokens for the two services.
//!
//! Token acquisition and refresh happen elsewhere; this module only finds an
//! already-issued token.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::console::prompt_line;

pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const SHEETS_TOKEN_ENV: &str = "GOOGLE_ACCESS_TOKEN";
pub const SHEETS_TOKEN_FILE: &str = "token.json";

/// The subset of Google's authorized-user file we read.
#[derive(Debug, Deserialize)]
struct AuthorizedUser {
    #[serde(default)]
    token: Option<String>,
}

/// `$GITHUB_TOKEN`, else prompt on stdin.
pub fn github_token() -> Result<String> {
    if let Some(token) = env_token(GITHUB_TOKEN_ENV) {
        return Ok(token);
    }
    let token = prompt_line("Enter GitHub access token:").context("failed to read GitHub token")?;
    let token = token.trim().to_string();
    if token.is_empty() {
        bail!("no GitHub access token given");
    }
    Ok(token)
}

/// `$GOOGLE_ACCESS_TOKEN`, else the `token` field of `<dir>/token.json`.
pub fn sheets_token(dir: &Path) -> Result<String> {
    if let Some(token) = env_token(SHEETS_TOKEN_ENV) {
        return Ok(token);
    }
    let path = dir.join(SHEETS_TOKEN_FILE);
    if !path.exists() {
        bail!(
            "no Google Sheets token: set {SHEETS_TOKEN_ENV} or provide {}",
            path.display()
        );
    }
    token_from_file(&path)
}

fn token_from_file(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let user: AuthorizedUser = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    match user.token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => bail!("{} has no access token", path.display()),
    }
}

fn env_token(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_token_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SHEETS_TOKEN_FILE);
        std::fs::write(
            &path,
            r#"{"token": "ya29.abc", "refresh_token": "1//r", "scopes": ["https://www.googleapis.com/auth/spreadsheets.readonly"]}"#,
        )
        .unwrap();
        assert_eq!(token_from_file(&path).unwrap(), "ya29.abc");
    }

    #[test]
    fn file_without_token_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SHEETS_TOKEN_FILE);
        std::fs::write(&path, r#"{"refresh_token": "1//r"}"#).unwrap();
        let err = token_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("has no access token"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SHEETS_TOKEN_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert!(token_from_file(&path).is_err());
    }
}
