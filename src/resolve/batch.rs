// Batch README lookups.
// Resolves many repositories concurrently and collects their READMEs in input order.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::github::Repository;

use super::repository::{Access, ResolveOptions};
use super::Resolver;

/// One element of a batch README request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub force: bool,
}

impl BatchRequest {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            force: false,
        }
    }
}

/// README of one repository, `None` when private or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmeSummary {
    pub owner: String,
    pub name: String,
    pub readme: Option<String>,
}

/// Drive every future to completion, keeping input order.
///
/// Fails with the first error in completion order once all have settled, so
/// siblings still finish their cache writes.
async fn join_settled<T, F>(futures: impl IntoIterator<Item = F>) -> Result<Vec<T>>
where
    F: Future<Output = Result<T>>,
{
    let mut pending: FuturesUnordered<_> = futures
        .into_iter()
        .enumerate()
        .map(|(index, future)| async move { (index, future.await) })
        .collect();

    let mut slots: Vec<Option<T>> = (0..pending.len()).map(|_| None).collect();
    let mut first_error = None;

    while let Some((index, result)) = pending.next().await {
        match result {
            Ok(value) => slots[index] = Some(value),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(slots.into_iter().flatten().collect()),
    }
}

impl Resolver {
    /// Resolve the READMEs of every requested repository.
    ///
    /// Private repositories are allowed through the repository check here,
    /// but their READMEs are never fetched. The first repository failure, or
    /// any README failure other than `NotFound`, fails the whole batch.
    pub async fn resolve_readme_batch(
        &self,
        requests: &[BatchRequest],
        is_authenticated: bool,
    ) -> Result<Vec<ReadmeSummary>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let access = Access::batch(is_authenticated);
        debug!(count = requests.len(), "resolving readme batch");

        let repos = join_settled(requests.iter().map(|request| {
            let options = ResolveOptions::new(access).force(request.force);
            async move {
                self.resolve_repository(&request.owner, &request.name, &options)
                    .await
            }
        }))
        .await?;

        join_settled(repos.iter().map(|repo| self.summarize(repo))).await
    }

    async fn summarize(&self, repo: &Repository) -> Result<ReadmeSummary> {
        let readme = if repo.private {
            None
        } else {
            match self
                .resolve_readme(&repo.owner.login, &repo.name, &repo.default_branch)
                .await
            {
                Ok(content) => Some(content),
                Err(err) if err.is_not_found() => None,
                Err(err) => return Err(err),
            }
        };

        Ok(ReadmeSummary {
            owner: repo.owner.login.clone(),
            name: repo.name.clone(),
            readme,
        })
    }
}
