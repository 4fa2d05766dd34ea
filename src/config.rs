// Service configuration.
// Layers defaults, YAML files, and FOLIO_* environment variables with figment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_TTL;
use crate::error::FolioError;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Static token clients present in the Authorization header.
    pub api_token: Option<String>,
    pub github: GitHubConfig,
    pub cache: CacheConfig,
    pub logging: LogConfig,
}

/// Upstream GitHub endpoints and credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub token: Option<String>,
    pub api_url: String,
    pub raw_url: String,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: "https://api.github.com".to_string(),
            raw_url: "https://raw.githubusercontent.com".to_string(),
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live for repository and README entries, in seconds.
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Path to the per-user config file (~/.config/folio/config.yaml on Linux).
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.config_dir().join("config.yaml"))
}

impl Config {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. User config file
    /// 3. `./folio.yaml`
    /// 4. `FOLIO_*` environment variables (`__` separates nested keys)
    pub fn load() -> Result<Self, FolioError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = user_config_path() {
            figment = figment.merge(Yaml::file(path));
        }
        let config: Config = figment
            .merge(Yaml::file("folio.yaml"))
            .merge(Env::prefixed("FOLIO_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file over the defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, FolioError> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FolioError> {
        if self.cache.ttl_secs == 0 {
            return Err(FolioError::InvalidConfig(
                "cache.ttl_secs must be at least 1".to_string(),
            ));
        }

        if self.github.api_url.is_empty() || self.github.raw_url.is_empty() {
            return Err(FolioError::InvalidConfig(
                "github.api_url and github.raw_url cannot be empty".to_string(),
            ));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(FolioError::InvalidConfig(format!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            )));
        }

        Ok(())
    }
}
