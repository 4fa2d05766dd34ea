// Logging setup.
// Installs a tracing subscriber honoring RUST_LOG, falling back to the configured level.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat};
use crate::error::FolioError;

fn parse_level(level: &str) -> Result<Level, FolioError> {
    level
        .parse()
        .map_err(|_| FolioError::Logging(format!("invalid log level: {}", level)))
}

/// Initialize the global subscriber. Logs go to stderr so stdout stays clean for output.
pub fn init(config: &LogConfig) -> Result<(), FolioError> {
    let default_level = parse_level(&config.level)?;
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|e| FolioError::Logging(e.to_string()))
}
