//! OAuth2 session: token acquisition, storage and refresh
//!
//! An [`AuthSession`] owns one token pair and is the only thing that writes it.
//! Every request made through a [`PlantPredictClient`](crate::PlantPredictClient)
//! reads the bearer token from the client's session, so one session is one
//! authentication context (one tenant).

use std::fmt;

use bytes::Bytes;
use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, instrument, warn};
use url::Url;

use crate::client::endpoint;
use crate::error::Result;
use crate::guard::{self, ApiResponse};

/// Identity endpoint, relative to the base URL
pub const TOKEN_PATH: &str = "/oauth2/token";

/// Current token pair of a session
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl Credentials {
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |t: &Option<String>| t.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}

/// Successful grant body; both fields are required for an update
#[derive(Deserialize)]
struct TokenGrant {
    access_token: String,
    refresh_token: String,
}

/// Raw identity endpoint response.
///
/// Returned whatever the status: a rejected grant is not an error, callers
/// inspect [`status`](Self::status) or [`credentials_updated`](Self::credentials_updated).
#[derive(Debug, Clone)]
pub struct AuthResponse {
    response: ApiResponse,
    credentials_updated: bool,
}

impl AuthResponse {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn is_success(&self) -> bool {
        self.response.is_success()
    }

    pub fn body(&self) -> &Bytes {
        self.response.body()
    }

    pub fn text(&self) -> String {
        self.response.text()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        self.response.json()
    }

    /// Whether the response carried a full token pair that replaced the stored one
    pub fn credentials_updated(&self) -> bool {
        self.credentials_updated
    }
}

/// Token lifecycle for one tenant
#[derive(Debug)]
pub struct AuthSession {
    http: Client,
    token_url: Url,
    credentials: RwLock<Credentials>,
}

impl AuthSession {
    /// Create a session with no tokens, granting against `{base_url}/oauth2/token`
    pub fn new(http: Client, base_url: Url) -> Result<Self> {
        let token_url = endpoint(&base_url, TOKEN_PATH)?;
        Ok(Self {
            http,
            token_url,
            credentials: RwLock::new(Credentials::default()),
        })
    }

    /// Create a session seeded with a previously obtained token pair
    pub fn with_tokens(
        http: Client,
        base_url: Url,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<Self> {
        let session = Self::new(http, base_url)?;
        session.replace(access_token.into(), refresh_token.into());
        Ok(session)
    }

    /// Snapshot of the current token pair
    pub fn credentials(&self) -> Credentials {
        self.credentials.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.credentials.read().access_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.read().access_token.is_some()
    }

    /// Value for the `Authorization` header, if a token is held
    pub fn bearer(&self) -> Option<String> {
        self.access_token().map(|token| format!("Bearer {}", token))
    }

    /// Client-credentials grant
    #[instrument(skip(self, client_secret))]
    pub async fn acquire(&self, client_id: &str, client_secret: &str) -> Result<AuthResponse> {
        self.grant(&[
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("grant_type", "client_credentials"),
        ])
        .await
    }

    /// Refresh-token grant using the stored refresh token.
    ///
    /// Without a stored refresh token the grant is sent with an empty value
    /// and left for the identity endpoint to reject.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<AuthResponse> {
        let refresh_token = self
            .credentials
            .read()
            .refresh_token
            .clone()
            .unwrap_or_default();

        self.grant(&[
            ("refresh_token", refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ])
        .await
    }

    async fn grant(&self, form: &[(&str, &str)]) -> Result<AuthResponse> {
        let request = self.http.post(self.token_url.clone()).form(form);
        let response = guard::send(request).await?;
        let credentials_updated = self.store(&response);
        Ok(AuthResponse {
            response,
            credentials_updated,
        })
    }

    fn store(&self, response: &ApiResponse) -> bool {
        match serde_json::from_slice::<TokenGrant>(response.body()) {
            Ok(grant) => {
                self.replace(grant.access_token, grant.refresh_token);
                info!("Stored new token pair");
                true
            }
            Err(e) => {
                warn!(
                    status = %response.status(),
                    error = %e,
                    "Token response lacks access_token/refresh_token, keeping previous credentials"
                );
                false
            }
        }
    }

    fn replace(&self, access_token: String, refresh_token: String) {
        let mut credentials = self.credentials.write();
        credentials.access_token = Some(access_token);
        credentials.refresh_token = Some(refresh_token);
    }
}
