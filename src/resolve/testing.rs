// In-memory collaborators for resolver tests.
// Both stubs record every call so tests can assert on upstream traffic.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde_json::Map;

use crate::error::{ResolutionError, Result};
use crate::github::{ContentFetcher, MetadataProvider, Owner, RawContent, Repository};

use super::Resolver;

pub fn repository(owner: &str, name: &str, private: bool) -> Repository {
    Repository {
        name: name.to_string(),
        owner: Owner {
            login: owner.to_string(),
            extra: Map::new(),
        },
        private,
        default_branch: "main".to_string(),
        html_url: format!("https://github.com/{}/{}", owner, name),
        description: None,
        extra: Map::new(),
    }
}

#[derive(Default)]
pub struct StubProvider {
    repos: Mutex<HashMap<String, Result<Repository>>>,
    calls: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(self, repo: Repository) -> Self {
        self.set_repo(repo);
        self
    }

    pub fn with_error(self, owner: &str, name: &str, err: ResolutionError) -> Self {
        self.repos
            .lock()
            .insert(format!("{}/{}", owner, name), Err(err));
        self
    }

    pub fn set_repo(&self, repo: Repository) {
        self.repos.lock().insert(repo.full_name(), Ok(repo));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let key = format!("{}/{}", owner, name);
        self.calls.lock().push(key.clone());
        tokio::task::yield_now().await;

        self.repos
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(ResolutionError::upstream(404, "Not Found")))
    }
}

/// Serves registered paths; anything else is a 404.
#[derive(Default)]
pub struct StubContent {
    files: Mutex<HashMap<String, (u16, String)>>,
    transport_failure: bool,
    calls: Mutex<Vec<String>>,
}

impl StubContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, status: u16, body: &str) -> Self {
        self.files
            .lock()
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    pub fn failing_transport(mut self) -> Self {
        self.transport_failure = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ContentFetcher for StubContent {
    async fn fetch(&self, path: &str) -> Result<RawContent> {
        self.calls.lock().push(path.to_string());
        tokio::task::yield_now().await;

        if self.transport_failure {
            return Err(ResolutionError::transport("connection reset"));
        }

        let (status, body) = self
            .files
            .lock()
            .get(path)
            .cloned()
            .unwrap_or((404, String::new()));
        let status_message = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Ok(RawContent {
            status,
            status_message,
            body,
        })
    }
}

/// Build a resolver over the stubs, returning handles for call inspection.
pub fn resolver(
    provider: StubProvider,
    content: StubContent,
) -> (Resolver, Arc<StubProvider>, Arc<StubContent>) {
    let provider = Arc::new(provider);
    let content = Arc::new(content);
    let resolver = Resolver::new(provider.clone(), content.clone());
    (resolver, provider, content)
}
