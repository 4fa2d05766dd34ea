// Repository resolution.
// Caches repository metadata and README bodies in front of the GitHub collaborators.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{DEFAULT_TTL, TtlCache};
use crate::github::{ContentFetcher, MetadataProvider, Repository};

pub mod batch;
pub mod readme;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{BatchRequest, ReadmeSummary};
pub use readme::{README_CANDIDATES, ReadmeEntry, ReadmeKey};
pub use repository::{Access, ResolveOptions};

/// Resolves repositories and READMEs through two independent TTL caches.
///
/// Construct once at startup and share behind an `Arc`.
pub struct Resolver {
    provider: Arc<dyn MetadataProvider>,
    fetcher: Arc<dyn ContentFetcher>,
    repos: TtlCache<String, Repository>,
    readmes: TtlCache<ReadmeKey, ReadmeEntry>,
}

impl Resolver {
    /// Create a resolver with the default 30 minute TTL.
    pub fn new(provider: Arc<dyn MetadataProvider>, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self::with_ttl(provider, fetcher, DEFAULT_TTL)
    }

    pub fn with_ttl(
        provider: Arc<dyn MetadataProvider>,
        fetcher: Arc<dyn ContentFetcher>,
        ttl: Duration,
    ) -> Self {
        Self {
            provider,
            fetcher,
            repos: TtlCache::new(ttl),
            readmes: TtlCache::new(ttl),
        }
    }

    /// Repository metadata cache.
    pub fn repository_cache(&self) -> &TtlCache<String, Repository> {
        &self.repos
    }

    /// README cache.
    pub fn readme_cache(&self) -> &TtlCache<ReadmeKey, ReadmeEntry> {
        &self.readmes
    }
}
