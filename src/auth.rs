// API token check.
// Compares the raw Authorization header against the configured static token.

use crate::error::ResolutionError;

#[derive(Clone, Default)]
pub struct Authenticator {
    token: Option<String>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("configured", &self.token.is_some())
            .finish()
    }
}

impl Authenticator {
    /// An empty token disables authentication entirely.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Whether `header` carries the configured token.
    pub fn is_authenticated(&self, header: Option<&str>) -> bool {
        match (&self.token, header) {
            (Some(token), Some(header)) => token == header,
            _ => false,
        }
    }

    /// Reject callers without the configured token.
    pub fn require(&self, header: Option<&str>) -> Result<(), ResolutionError> {
        if self.is_authenticated(header) {
            Ok(())
        } else {
            Err(ResolutionError::unauthorized(
                "Missing valid authorization header",
            ))
        }
    }
}
