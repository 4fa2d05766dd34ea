// GitHub module.
// Provides the client, collaborator traits, and types for the GitHub API and raw-content host.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::{ContentFetcher, MetadataProvider};
pub use types::*;
