// GitHub HTTP client.
// Handles authentication headers and request/response processing for the API and raw-content hosts.

use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Deserialize;
use tracing::warn;

use crate::config::GitHubConfig;
use crate::error::{FolioError, ResolutionError};

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Error document returned by the GitHub API on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the GitHub REST API and the raw-content host.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    raw_url: String,
    token: Option<HeaderValue>,
}

impl GitHubClient {
    /// Create a new client from configuration.
    pub fn new(config: &GitHubConfig) -> Result<Self, FolioError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);

        let client = Client::builder().default_headers(headers).build()?;

        let token = match config.token.as_deref() {
            Some(token) if !token.is_empty() => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
                value.set_sensitive(true);
                Some(value)
            }
            _ => None,
        };

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            raw_url: config.raw_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Whether requests to the API carry a token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn api_request(&self, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, endpoint);
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token.clone());
        }
        request
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, endpoint: &str) -> Result<Response, ResolutionError> {
        let response = self.api_request(endpoint).send().await?;
        Self::check_response(response).await
    }

    /// Make a GET request to the raw-content host. Any status is returned as-is.
    pub async fn get_raw(&self, path: &str) -> Result<Response, ResolutionError> {
        let url = format!("{}/{}", self.raw_url, path.trim_start_matches('/'));
        Ok(self.client.get(url).send().await?)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response, ResolutionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        warn!(%url, status = status.as_u16(), %message, "GitHub API request failed");

        Err(ResolutionError::upstream(
            status.as_u16(),
            format!("Error when fetching github repository: {}", message),
        ))
    }
}
