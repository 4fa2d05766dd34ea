// README lookups against the raw-content host.
// Tries a fixed list of filename casings and caches both hits and definitive misses.

use tracing::{debug, warn};

use crate::error::{ResolutionError, Result};

use super::Resolver;

/// README filenames tried in order, each with a `.md` suffix.
pub const README_CANDIDATES: [&str; 5] = ["README", "readme", "Readme", "ReadMe", "readMe"];

/// Cache key for a README: repository plus branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadmeKey {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl ReadmeKey {
    pub fn new(owner: &str, name: &str, branch: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            branch: branch.to_string(),
        }
    }

    /// Raw-content path for one candidate filename.
    pub fn path(&self, candidate: &str) -> String {
        format!("{}/{}/{}/{}.md", self.owner, self.name, self.branch, candidate)
    }
}

/// Cached outcome of a README lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeEntry {
    Found(String),
    Missing,
}

/// Keep the error with the highest status; on a tie the later one wins.
fn worse(current: Option<ResolutionError>, candidate: ResolutionError) -> ResolutionError {
    match current {
        Some(current) if current.status() > candidate.status() => current,
        _ => candidate,
    }
}

impl Resolver {
    /// Resolve the README for `owner/name` on `branch`.
    ///
    /// Fails with `NotFound` when no candidate exists, or with the worst
    /// non-404 error seen across the candidates.
    pub async fn resolve_readme(&self, owner: &str, name: &str, branch: &str) -> Result<String> {
        let key = ReadmeKey::new(owner, name, branch);

        if let Some(entry) = self.readmes.get(&key) {
            debug!(%owner, %name, %branch, "readme cache hit");
            return match entry {
                ReadmeEntry::Found(content) => Ok(content),
                ReadmeEntry::Missing => Err(ResolutionError::NotFound),
            };
        }

        let mut overall: Option<ResolutionError> = None;
        let mut recorded_missing = false;

        for candidate in README_CANDIDATES {
            let path = key.path(candidate);

            let err = match self.fetcher.fetch(&path).await {
                Ok(raw) if raw.is_success() => {
                    debug!(%path, "readme found");
                    self.readmes
                        .insert(key, ReadmeEntry::Found(raw.body.clone()));
                    return Ok(raw.body);
                }
                Ok(raw) if raw.is_not_found() => {
                    if !recorded_missing {
                        self.readmes.insert(key.clone(), ReadmeEntry::Missing);
                        recorded_missing = true;
                    }
                    ResolutionError::NotFound
                }
                Ok(raw) => {
                    warn!(%path, status = raw.status, "unexpected readme status");
                    ResolutionError::upstream(raw.status, raw.status_message)
                }
                Err(err) => {
                    warn!(%path, error = %err, "readme fetch failed");
                    err
                }
            };

            overall = Some(worse(overall, err));
        }

        Err(overall.unwrap_or(ResolutionError::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::testing::{StubContent, StubProvider, resolver};

    const BASE: &str = "octocat/hello/main";

    fn path(candidate: &str) -> String {
        format!("{}/{}.md", BASE, candidate)
    }

    #[test]
    fn test_worse_prefers_higher_status_and_later_ties() {
        let first = ResolutionError::upstream(500, "first");
        let second = ResolutionError::upstream(500, "second");
        assert_eq!(worse(Some(first), second.clone()), second);

        let high = ResolutionError::upstream(503, "high");
        assert_eq!(worse(Some(high.clone()), ResolutionError::NotFound), high);

        // Transport errors rank as 500 and take a tie from an upstream 500.
        let transport = ResolutionError::transport("reset");
        assert_eq!(
            worse(Some(ResolutionError::upstream(500, "x")), transport.clone()),
            transport
        );
    }

    #[tokio::test]
    async fn test_candidate_order() {
        let content = StubContent::new().with_file(&path("ReadMe"), 200, "# Hello");
        let (resolver, _, content) = resolver(StubProvider::new(), content);

        let readme = resolver.resolve_readme("octocat", "hello", "main").await.unwrap();

        assert_eq!(readme, "# Hello");
        assert_eq!(
            content.calls(),
            vec![path("README"), path("readme"), path("Readme"), path("ReadMe")]
        );
        assert_eq!(
            resolver
                .readme_cache()
                .get(&ReadmeKey::new("octocat", "hello", "main")),
            Some(ReadmeEntry::Found("# Hello".to_string()))
        );
    }

    #[tokio::test]
    async fn test_found_readme_is_cached() {
        let content = StubContent::new().with_file(&path("README"), 200, "# Cached");
        let (resolver, _, content) = resolver(StubProvider::new(), content);

        for _ in 0..3 {
            let readme = resolver.resolve_readme("octocat", "hello", "main").await.unwrap();
            assert_eq!(readme, "# Cached");
        }
        assert_eq!(content.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_negative_caching() {
        let (resolver, _, content) = resolver(StubProvider::new(), StubContent::new());

        let err = resolver
            .resolve_readme("octocat", "hello", "main")
            .await
            .unwrap_err();
        assert_eq!(err, ResolutionError::NotFound);
        assert_eq!(content.calls().len(), 5);

        let err = resolver
            .resolve_readme("octocat", "hello", "main")
            .await
            .unwrap_err();
        assert_eq!(err, ResolutionError::NotFound);
        assert_eq!(content.calls().len(), 5);
    }

    #[tokio::test]
    async fn test_branch_is_part_of_the_key() {
        let content = StubContent::new().with_file("octocat/hello/dev/README.md", 200, "dev");
        let (resolver, _, _) = resolver(StubProvider::new(), content);

        assert!(resolver.resolve_readme("octocat", "hello", "main").await.is_err());
        assert_eq!(
            resolver.resolve_readme("octocat", "hello", "dev").await.unwrap(),
            "dev"
        );
    }

    #[tokio::test]
    async fn test_worst_status_wins() {
        let content = StubContent::new()
            .with_file(&path("README"), 404, "")
            .with_file(&path("readme"), 502, "")
            .with_file(&path("Readme"), 503, "")
            .with_file(&path("ReadMe"), 500, "")
            .with_file(&path("readMe"), 404, "");
        let (resolver, _, content) = resolver(StubProvider::new(), content);

        let err = resolver
            .resolve_readme("octocat", "hello", "main")
            .await
            .unwrap_err();

        assert_eq!(err, ResolutionError::upstream(503, "Service Unavailable"));
        assert_eq!(content.calls().len(), 5);
    }

    #[tokio::test]
    async fn test_error_after_404_leaves_negative_entry() {
        let content = StubContent::new()
            .with_file(&path("README"), 404, "")
            .with_file(&path("readme"), 500, "");
        let (resolver, _, content) = resolver(StubProvider::new(), content);

        let err = resolver
            .resolve_readme("octocat", "hello", "main")
            .await
            .unwrap_err();
        assert_eq!(err.status(), 500);

        // The first 404 was recorded, so the next lookup is served from cache.
        let err = resolver
            .resolve_readme("octocat", "hello", "main")
            .await
            .unwrap_err();
        assert_eq!(err, ResolutionError::NotFound);
        assert_eq!(content.calls().len(), 5);
    }

    #[tokio::test]
    async fn test_transport_errors_are_not_cached() {
        let content = StubContent::new().failing_transport();
        let (resolver, _, content) = resolver(StubProvider::new(), content);

        for _ in 0..2 {
            let err = resolver
                .resolve_readme("octocat", "hello", "main")
                .await
                .unwrap_err();
            assert!(matches!(err, ResolutionError::Transport { .. }));
        }
        assert_eq!(content.calls().len(), 10);
    }

    #[tokio::test]
    async fn test_expired_missing_entry_goes_upstream_again() {
        let (resolver, _, content) = resolver(StubProvider::new(), StubContent::new());

        assert!(resolver.resolve_readme("octocat", "hello", "main").await.is_err());
        assert_eq!(content.calls().len(), 5);

        resolver.readme_cache().backdate(
            &ReadmeKey::new("octocat", "hello", "main"),
            chrono::Duration::minutes(31),
        );

        let err = resolver
            .resolve_readme("octocat", "hello", "main")
            .await
            .unwrap_err();
        assert_eq!(err, ResolutionError::NotFound);
        assert_eq!(content.calls().len(), 10);
    }

    #[tokio::test]
    async fn test_later_success_overwrites_missing_entry() {
        let content = StubContent::new().with_file(&path("readMe"), 200, "last one");
        let (resolver, _, _) = resolver(StubProvider::new(), content);

        let readme = resolver.resolve_readme("octocat", "hello", "main").await.unwrap();
        assert_eq!(readme, "last one");
        assert_eq!(
            resolver
                .readme_cache()
                .get(&ReadmeKey::new("octocat", "hello", "main")),
            Some(ReadmeEntry::Found("last one".to_string()))
        );
    }
}
