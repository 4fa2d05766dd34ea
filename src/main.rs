// folio command-line entry point.
// Loads configuration, wires the GitHub client into a resolver, and prints results as JSON.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;

use folio::{
    Access, Authenticator, BatchRequest, Config, GitHubClient, ResolveOptions, Resolver, logging,
};

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Resolve GitHub repositories and READMEs")]
struct Cli {
    /// Value of the Authorization header to present.
    #[arg(long, env = "FOLIO_AUTHORIZATION", global = true, hide_env_values = true)]
    authorization: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show repository metadata.
    Repo {
        /// Repository as owner/name.
        repository: String,
        /// Bypass the cache.
        #[arg(long)]
        force: bool,
    },
    /// Show the README of a repository's default branch.
    Readme {
        /// Repository as owner/name.
        repository: String,
    },
    /// Show READMEs of several repositories.
    Readmes {
        /// Repositories as owner/name.
        #[arg(required = true)]
        repositories: Vec<String>,
        /// Bypass the repository cache for every entry.
        #[arg(long)]
        force: bool,
    },
}

fn split_repository(value: &str) -> Result<(&str, &str)> {
    match value.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok((owner, name)),
        _ => Err(anyhow!("expected owner/name, got '{}'", value)),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;
    logging::init(&config.logging).context("failed to initialize logging")?;

    let client = Arc::new(GitHubClient::new(&config.github).context("failed to build client")?);
    let resolver = Resolver::with_ttl(client.clone(), client, config.cache.ttl());
    let is_authenticated =
        Authenticator::new(config.api_token.clone()).is_authenticated(cli.authorization.as_deref());

    match cli.command {
        Command::Repo { repository, force } => {
            let (owner, name) = split_repository(&repository)?;
            let options =
                ResolveOptions::new(Access::single_repository(is_authenticated)).force(force);
            let repo = resolver.resolve_repository(owner, name, &options).await?;
            print_json(&repo)?;
        }
        Command::Readme { repository } => {
            let (owner, name) = split_repository(&repository)?;
            let options = ResolveOptions::new(Access::single_repository(is_authenticated));
            let readme = resolver
                .resolve_repository_readme(owner, name, &options)
                .await?;
            println!("{}", readme);
        }
        Command::Readmes {
            repositories,
            force,
        } => {
            let requests = repositories
                .iter()
                .map(|value| -> Result<BatchRequest> {
                    let (owner, name) = split_repository(value)?;
                    let mut request = BatchRequest::new(owner, name);
                    request.force = force;
                    Ok(request)
                })
                .collect::<Result<Vec<_>>>()?;
            let summaries = resolver
                .resolve_readme_batch(&requests, is_authenticated)
                .await?;
            print_json(&summaries)?;
        }
    }

    Ok(())
}
