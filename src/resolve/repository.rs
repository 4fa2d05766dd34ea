// Repository metadata lookups.
// Serves cached records when live and re-checks private access on every call.

use tracing::debug;

use crate::error::{ResolutionError, Result};
use crate::github::Repository;

use super::Resolver;

/// Per-call authorization context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Access {
    /// Caller presented a valid API token.
    pub is_authenticated: bool,
    /// Endpoint permits private repositories.
    pub allow_private: bool,
}

impl Access {
    pub fn new(is_authenticated: bool, allow_private: bool) -> Self {
        Self {
            is_authenticated,
            allow_private,
        }
    }

    /// Single-repository lookups never expose private repositories.
    pub fn single_repository(is_authenticated: bool) -> Self {
        Self::new(is_authenticated, false)
    }

    /// Batch README lookups admit private repositories for authenticated callers.
    pub fn batch(is_authenticated: bool) -> Self {
        Self::new(is_authenticated, true)
    }

    /// Whether `repo` may be shown under this context.
    pub fn permits(&self, repo: &Repository) -> bool {
        !repo.private || (self.is_authenticated && self.allow_private)
    }
}

/// Options for a single repository lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Skip the cache read; the fresh record is still written back.
    pub force: bool,
    pub access: Access,
}

impl ResolveOptions {
    pub fn new(access: Access) -> Self {
        Self {
            force: false,
            access,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

fn cache_key(owner: &str, name: &str) -> String {
    format!("{}/{}", owner, name)
}

fn authorize(key: &str, repo: Repository, access: &Access) -> Result<Repository> {
    if access.permits(&repo) {
        Ok(repo)
    } else {
        debug!(%key, "refusing private repository");
        Err(ResolutionError::unauthorized(format!(
            "({}) Repository is private",
            key
        )))
    }
}

impl Resolver {
    /// Resolve `owner/name`, from cache unless `force` is set.
    ///
    /// Upstream failures are not cached. Concurrent misses for the same key
    /// each go upstream.
    pub async fn resolve_repository(
        &self,
        owner: &str,
        name: &str,
        options: &ResolveOptions,
    ) -> Result<Repository> {
        let key = cache_key(owner, name);

        if !options.force {
            if let Some(repo) = self.repos.get(&key) {
                debug!(%key, "repository cache hit");
                return authorize(&key, repo, &options.access);
            }
        }

        debug!(%key, force = options.force, "fetching repository");
        let repo = self.provider.fetch_repository(owner, name).await?;
        self.repos.insert(key.clone(), repo.clone());

        authorize(&key, repo, &options.access)
    }

    /// Resolve a repository, then its README on the default branch.
    pub async fn resolve_repository_readme(
        &self,
        owner: &str,
        name: &str,
        options: &ResolveOptions,
    ) -> Result<String> {
        let repo = self.resolve_repository(owner, name, options).await?;
        self.resolve_readme(&repo.owner.login, &repo.name, &repo.default_branch)
            .await
    }
}
