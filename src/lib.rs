// folio: portfolio catalog core.
// Resolves GitHub repositories and READMEs behind a short-lived cache with private-repo gating.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod project;
pub mod resolve;

pub use auth::Authenticator;
pub use config::Config;
pub use error::{FolioError, ResolutionError};
pub use github::{GitHubClient, Repository};
pub use resolve::{Access, BatchRequest, ReadmeSummary, ResolveOptions, Resolver};
