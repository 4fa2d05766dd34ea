// Project registration.
// Turns a submitted draft and its resolved repository into a record for the store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::github::Repository;

pub const DEFAULT_CATEGORY: &str = "Default";
const MAX_TITLE_LEN: usize = 127;
const MAX_DESCRIPTION_LEN: usize = 255;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    #[error("Title must be between 1 and 127 characters")]
    InvalidTitle,

    #[error("Description must be between 1 and 255 characters")]
    InvalidDescription,

    #[error("Repository does not have a description and a description was not provided.")]
    MissingDescription,
}

/// Project fields submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Record ready to be inserted by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: String,
    pub repository_name: String,
    pub repository_owner: String,
    pub repository_url: String,
    pub use_repository_description: bool,
}

impl NewProject {
    /// Build a project from a draft and the repository it points at.
    ///
    /// The repository should be resolved with private access disallowed.
    pub fn from_repository(draft: ProjectDraft, repo: &Repository) -> Result<Self, ProjectError> {
        let title_len = draft.title.chars().count();
        if title_len == 0 || title_len > MAX_TITLE_LEN {
            return Err(ProjectError::InvalidTitle);
        }

        if let Some(description) = &draft.description {
            let len = description.chars().count();
            if len == 0 || len > MAX_DESCRIPTION_LEN {
                return Err(ProjectError::InvalidDescription);
            }
        }

        let repo_has_description = repo.description.as_deref().is_some_and(|d| !d.is_empty());
        if draft.description.is_none() && !repo_has_description {
            return Err(ProjectError::MissingDescription);
        }

        Ok(Self {
            title: draft.title,
            use_repository_description: draft.description.is_none(),
            description: draft.description,
            image: draft.image,
            category: draft
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            repository_name: repo.name.clone(),
            repository_owner: repo.owner.login.clone(),
            repository_url: repo.html_url.clone(),
        })
    }
}

/// Split a `tags=a, b` query value into trimmed names.
///
/// Empty segments are kept so `a,,b` reports an unknown empty tag.
pub fn parse_tag_filter(query: &str) -> Vec<String> {
    query.split(',').map(|tag| tag.trim().to_string()).collect()
}

/// Requested names with no case-insensitive match among the known ones.
pub fn unknown_names<'a>(known: &[String], requested: &'a [String]) -> Vec<&'a str> {
    requested
        .iter()
        .filter(|name| !known.iter().any(|k| k.eq_ignore_ascii_case(name)))
        .map(String::as_str)
        .collect()
}
