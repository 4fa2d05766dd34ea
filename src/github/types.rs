// GitHub API response types.
// Defines the repository record and raw-content response used by the resolver.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GitHub user or organization owning a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    /// Remaining provider fields, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// GitHub repository as returned by `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
    pub private: bool,
    pub default_branch: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Remaining provider fields, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Repository {
    /// Canonical `owner/name` key, in the provider's casing.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

/// Response from the raw-content host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent {
    pub status: u16,
    pub status_message: String,
    pub body: String,
}

impl RawContent {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}
