// Error types for folio.
// Resolution errors carry an HTTP-equivalent status; startup errors cover config and client setup.

use thiserror::Error;

/// Failure while resolving a repository or its README.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("Not found")]
    NotFound,

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl ResolutionError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ResolutionError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        ResolutionError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ResolutionError::Transport {
            message: message.into(),
        }
    }

    /// HTTP-equivalent status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            ResolutionError::Unauthorized { .. } => 401,
            ResolutionError::NotFound => 404,
            ResolutionError::Upstream { status, .. } => *status,
            ResolutionError::Transport { .. } => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolutionError::NotFound)
    }
}

impl From<reqwest::Error> for ResolutionError {
    fn from(err: reqwest::Error) -> Self {
        ResolutionError::transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ResolutionError>;

/// Errors raised while bringing the service up.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<figment::Error> for FolioError {
    fn from(err: figment::Error) -> Self {
        FolioError::Config(Box::new(err))
    }
}
