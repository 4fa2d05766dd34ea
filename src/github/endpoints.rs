// GitHub collaborator traits and their HTTP implementation.
// The resolver only talks to these traits, so tests can swap in stubs.

use async_trait::async_trait;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{RawContent, Repository};

/// Source of repository metadata.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the repository `owner/name`.
    async fn fetch_repository(&self, owner: &str, name: &str) -> Result<Repository>;
}

/// Source of raw file content, addressed by `{owner}/{name}/{branch}/{file}`.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch a path. Non-success statuses are returned, not raised; only
    /// network failures produce an error.
    async fn fetch(&self, path: &str) -> Result<RawContent>;
}

#[async_trait]
impl MetadataProvider for GitHubClient {
    async fn fetch_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let response = self.get(&format!("/repos/{}/{}", owner, name)).await?;
        let repository: Repository = response.json().await?;
        Ok(repository)
    }
}

#[async_trait]
impl ContentFetcher for GitHubClient {
    async fn fetch(&self, path: &str) -> Result<RawContent> {
        let response = self.get_raw(path).await?;
        let status = response.status();

        // Error bodies from the raw host are not useful; skip reading them.
        let body = if status.is_success() {
            response.text().await?
        } else {
            String::new()
        };

        Ok(RawContent {
            status: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
