//! PlantPredict HTTP client implementation

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use tracing::{info, instrument};
use url::Url;

use crate::auth::{AuthResponse, AuthSession};
use crate::config::{ClientConfig, ClientCredentials};
use crate::error::{PlantPredictError, Result};
use crate::guard::{self, ApiResponse};

/// Append a resource path to the base URL.
///
/// Unlike `Url::join`, a path prefix on the base (`https://host/api`) survives.
pub(crate) fn endpoint(base_url: &Url, path: &str) -> Result<Url> {
    let url = format!("{}{}", base_url.as_str().trim_end_matches('/'), path);
    Ok(Url::parse(&url)?)
}

/// PlantPredict REST API client
///
/// Owns the HTTP connection pool and the [`AuthSession`] every request is
/// authenticated with. Entity operations take the client by reference.
#[derive(Debug)]
pub struct PlantPredictClient {
    http: Client,
    base_url: Url,
    session: AuthSession,
    credentials: Option<ClientCredentials>,
}

impl PlantPredictClient {
    /// Create a new client with transport defaults and no credentials
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the service (e.g., "https://api.plantpredict.com")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Create a new client from configuration
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = config.timeouts.request_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = config.timeouts.connect_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        let http = builder.build().map_err(PlantPredictError::Http)?;

        let base_url = Url::parse(&config.base_url)?;
        let session = AuthSession::new(http.clone(), base_url.clone())?;

        Ok(Self {
            http,
            base_url,
            session,
            credentials: config.credentials,
        })
    }

    /// Create a client from `PLANTPREDICT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client resuming an existing token pair
    pub fn with_tokens(base_url: &str, access_token: &str, refresh_token: &str) -> Result<Self> {
        let client = Self::new(base_url)?;
        let session = AuthSession::with_tokens(
            client.http.clone(),
            client.base_url.clone(),
            access_token,
            refresh_token,
        )?;
        Ok(Self { session, ..client })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    pub fn http_client(&self) -> &Client {
        &self.http
    }

    /// The session whose token authenticates every request
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Authenticate with the configured client credentials.
    ///
    /// Returns the identity endpoint's raw response; a rejected grant is not an
    /// error here, check [`AuthResponse::is_success`].
    #[instrument(skip(self))]
    pub async fn login(&self) -> Result<AuthResponse> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(crate::config::ConfigError::MissingCredentials)?;
        let response = self
            .session
            .acquire(&credentials.client_id, &credentials.client_secret)
            .await?;
        info!(status = %response.status(), "Login completed");
        Ok(response)
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Absolute URL for a resource path
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        endpoint(&self.base_url, path)
    }

    /// Run an authenticated request through the request guard
    pub async fn execute<F>(&self, build: F) -> Result<ApiResponse>
    where
        F: Fn() -> RequestBuilder,
    {
        guard::execute(&self.session, build).await
    }
}
