//! LessonReel HTTP Client
//!
//! A small, type-safe client for the video generation endpoints of the
//! learning-content service.
//!
//! # Example
//!
//! ```no_run
//! use lessonreel_client::{StaticToken, VideoClient};
//! use lessonreel_core::domain::submission::SubmissionInput;
//!
//! #[tokio::main]
//! async fn main() -> lessonreel_client::Result<()> {
//!     let client = VideoClient::new("http://localhost:8000", StaticToken::new("secret"));
//!
//!     let job_id = client
//!         .create_job(&SubmissionInput::Text("photosynthesis notes".to_string()))
//!         .await?;
//!
//!     println!("Submitted job: {}", job_id);
//!     Ok(())
//! }
//! ```

pub mod credentials;
pub mod error;
mod videos;

// Re-export commonly used types
pub use credentials::{CredentialSource, EnvToken, NoCredentials, StaticToken};
pub use error::{ClientError, Result};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the video generation API
///
/// Covers job creation, status probes and the user's video history. The
/// bearer token is read from the credential source per request.
#[derive(Clone)]
pub struct VideoClient {
    /// Base URL of the service (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Where the bearer token comes from
    credentials: Arc<dyn CredentialSource>,
}

impl std::fmt::Debug for VideoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl VideoClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use lessonreel_client::{NoCredentials, VideoClient};
    ///
    /// let client = VideoClient::new("http://localhost:8000", NoCredentials);
    /// ```
    pub fn new(base_url: impl Into<String>, credentials: impl CredentialSource + 'static) -> Self {
        Self::with_client(base_url, Client::new(), credentials)
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        client: Client,
        credentials: impl CredentialSource + 'static,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials: Arc::new(credentials),
        }
    }

    /// Create a new client whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
        credentials: impl CredentialSource + 'static,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client, credentials))
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach the current bearer token, if there is one
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-2xx responses become [`ClientError::ApiError`] carrying the
    /// service's `detail` message when it sent one.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
