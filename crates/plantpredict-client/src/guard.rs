//! Request guard: uniform failure handling for every outbound call
//!
//! Two layers wrap each request:
//!
//! 1. [`send`] completes the round trip and turns any transport failure
//!    (DNS, TCP reset, timeout, truncated body) into
//!    [`PlantPredictError::ConnectionFailure`].
//! 2. [`execute`] attaches the bearer token and inspects the status. A 401
//!    triggers exactly one [`AuthSession::refresh`] and one retry; any other
//!    non-2xx becomes [`PlantPredictError::ApiError`] with the body verbatim.
//!
//! Entity operations and resource helpers never retry on their own; they hand
//! a request-building closure to [`execute`].

use bytes::Bytes;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::auth::AuthSession;
use crate::error::{PlantPredictError, Result};

/// Raw outcome of a completed round trip
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: Bytes,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, lossy on invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the JSON body
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| PlantPredictError::ParseError(e.to_string()))
    }

    /// Pass 2xx through; map anything else onto the error taxonomy
    pub fn into_result(self) -> Result<Self> {
        match self.status {
            s if s.is_success() => Ok(self),
            StatusCode::UNAUTHORIZED => Err(PlantPredictError::AuthExpired { body: self.text() }),
            s => Err(PlantPredictError::api_error(s.as_u16(), self.text())),
        }
    }
}

/// Send a request and read the full body.
///
/// Does not look at the status code.
pub async fn send(request: RequestBuilder) -> Result<ApiResponse> {
    let response = request.send().await.map_err(PlantPredictError::transport)?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(PlantPredictError::transport)?;
    Ok(ApiResponse { status, body })
}

/// Run an authenticated request with refresh-and-retry-once on 401.
///
/// `build` is called once per attempt so that the retry carries the refreshed
/// token. The retry's outcome is final: a second 401 surfaces as
/// [`PlantPredictError::AuthExpired`]. A refresh the identity endpoint rejects
/// still gets its retry, but a refresh that cannot reach it returns that
/// [`PlantPredictError::ConnectionFailure`] without retrying.
#[instrument(skip_all)]
pub async fn execute<F>(session: &AuthSession, build: F) -> Result<ApiResponse>
where
    F: Fn() -> RequestBuilder,
{
    let response = dispatch(session, &build).await?;
    if response.status() != StatusCode::UNAUTHORIZED {
        return response.into_result();
    }

    warn!("Access token rejected, refreshing and retrying once");
    let refreshed = session.refresh().await?;
    if !refreshed.credentials_updated() {
        debug!(status = %refreshed.status(), "Refresh did not yield new credentials");
    }

    dispatch(session, &build).await?.into_result()
}

async fn dispatch<F>(session: &AuthSession, build: &F) -> Result<ApiResponse>
where
    F: Fn() -> RequestBuilder,
{
    let mut request = build();
    if let Some(token) = session.access_token() {
        request = request.bearer_auth(token);
    }
    send(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_passes_through() {
        let response = ApiResponse::new(StatusCode::CREATED, r#"{"id":1}"#);
        let response = response.into_result().unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_unauthorized_maps_to_auth_expired() {
        let err = ApiResponse::new(StatusCode::UNAUTHORIZED, "expired")
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlantPredictError::AuthExpired { ref body } if body == "expired"));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_error_body_kept_verbatim() {
        let body = r#"{"message":"Latitude out of range"}"#;
        let err = ApiResponse::new(StatusCode::BAD_REQUEST, body)
            .into_result()
            .unwrap_err();
        match err {
            PlantPredictError::ApiError { status, body: got } => {
                assert_eq!(status, 400);
                assert_eq!(got, body);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_json_parse_failure() {
        let response = ApiResponse::new(StatusCode::OK, "<html>");
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, PlantPredictError::ParseError(_)));
    }
}
