//! Token acquisition and refresh against a stand-in identity endpoint

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Form, Json, Router};
use parking_lot::Mutex;
use plantpredict_client::testing::TestServer;
use plantpredict_client::{ClientConfig, PlantPredictClient, PlantPredictError};
use serde_json::{json, Value};

// =============================================================================
// Stand-in identity endpoint
// =============================================================================

/// Replies with a fixed status and body, recording every form it receives
struct IdentityEndpoint {
    status: StatusCode,
    body: Value,
    forms: Mutex<Vec<HashMap<String, String>>>,
}

impl IdentityEndpoint {
    fn new(status: StatusCode, body: Value) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            forms: Mutex::new(Vec::new()),
        })
    }

    fn router(self: &Arc<Self>) -> Router {
        Router::new()
            .route("/oauth2/token", post(token))
            .with_state(self.clone())
    }

    fn forms(&self) -> Vec<HashMap<String, String>> {
        self.forms.lock().clone()
    }
}

async fn token(
    State(endpoint): State<Arc<IdentityEndpoint>>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    endpoint.forms.lock().push(form);
    (endpoint.status, Json(endpoint.body.clone()))
}

fn token_pair(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
        "expires_in": 3600
    })
}

// =============================================================================
// Acquire
// =============================================================================

#[tokio::test]
async fn test_acquire_stores_token_pair() {
    let identity = IdentityEndpoint::new(StatusCode::OK, token_pair("a1", "r1"));
    let server = TestServer::start(identity.router()).await.unwrap();
    let session = server.client.session();

    let response = session.acquire("client", "secret").await.unwrap();

    assert!(response.is_success());
    assert!(response.credentials_updated());
    let credentials = session.credentials();
    assert_eq!(credentials.access_token(), Some("a1"));
    assert_eq!(credentials.refresh_token(), Some("r1"));

    let forms = identity.forms();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0]["grant_type"], "client_credentials");
    assert_eq!(forms[0]["client_id"], "client");
    assert_eq!(forms[0]["client_secret"], "secret");
}

#[tokio::test]
async fn test_rejected_acquire_is_returned_not_raised() {
    let identity = IdentityEndpoint::new(
        StatusCode::BAD_REQUEST,
        json!({"error": "invalid_client"}),
    );
    let server = TestServer::start(identity.router()).await.unwrap();
    let session = server.client.session();

    let response = session.acquire("client", "wrong").await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!response.credentials_updated());
    let body: Value = response.json().unwrap();
    assert_eq!(body["error"], "invalid_client");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_uses_configured_credentials() {
    let identity = IdentityEndpoint::new(StatusCode::OK, token_pair("a1", "r1"));
    let server = TestServer::start(identity.router()).await.unwrap();

    let response = server.client.login().await.unwrap();

    assert!(response.is_success());
    assert_eq!(server.client.session().bearer().as_deref(), Some("Bearer a1"));
    let forms = identity.forms();
    assert_eq!(forms[0]["client_id"], "test-client");
    assert_eq!(forms[0]["client_secret"], "test-secret");
}

// =============================================================================
// Refresh
// =============================================================================

#[tokio::test]
async fn test_refresh_sends_stored_refresh_token() {
    let identity = IdentityEndpoint::new(StatusCode::OK, token_pair("a1", "r1"));
    let server = TestServer::start_with_tokens(identity.router(), "a0", "r0")
        .await
        .unwrap();
    let session = server.client.session();

    let response = session.refresh().await.unwrap();

    assert!(response.credentials_updated());
    assert_eq!(session.credentials().access_token(), Some("a1"));
    assert_eq!(session.credentials().refresh_token(), Some("r1"));

    let forms = identity.forms();
    assert_eq!(forms[0]["grant_type"], "refresh_token");
    assert_eq!(forms[0]["refresh_token"], "r0");
    assert!(!forms[0].contains_key("client_secret"));
}

#[tokio::test]
async fn test_refresh_missing_refresh_token_leaves_both_tokens() {
    let identity = IdentityEndpoint::new(StatusCode::OK, json!({"access_token": "a1"}));
    let server = TestServer::start_with_tokens(identity.router(), "a0", "r0")
        .await
        .unwrap();
    let session = server.client.session();

    let response = session.refresh().await.unwrap();

    assert!(response.is_success());
    assert!(!response.credentials_updated());
    assert_eq!(session.credentials().access_token(), Some("a0"));
    assert_eq!(session.credentials().refresh_token(), Some("r0"));
}

#[tokio::test]
async fn test_refresh_missing_access_token_leaves_both_tokens() {
    let identity = IdentityEndpoint::new(StatusCode::OK, json!({"refresh_token": "r1"}));
    let server = TestServer::start_with_tokens(identity.router(), "a0", "r0")
        .await
        .unwrap();
    let session = server.client.session();

    let response = session.refresh().await.unwrap();

    assert!(response.is_success());
    assert!(!response.credentials_updated());
    assert_eq!(session.credentials().access_token(), Some("a0"));
    assert_eq!(session.credentials().refresh_token(), Some("r0"));
}

#[tokio::test]
async fn test_partial_acquire_stores_nothing() {
    let identity = IdentityEndpoint::new(StatusCode::OK, json!({"access_token": "a1"}));
    let server = TestServer::start(identity.router()).await.unwrap();
    let session = server.client.session();

    let response = session.acquire("client", "secret").await.unwrap();

    assert!(response.is_success());
    assert!(!response.credentials_updated());
    assert!(!session.is_authenticated());
    assert_eq!(session.credentials().refresh_token(), None);
}

#[tokio::test]
async fn test_refresh_without_token_is_sent_empty() {
    let identity = IdentityEndpoint::new(
        StatusCode::BAD_REQUEST,
        json!({"error": "invalid_grant"}),
    );
    let server = TestServer::start(identity.router()).await.unwrap();

    let response = server.client.session().refresh().await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(identity.forms()[0]["refresh_token"], "");
}

// =============================================================================
// Transport failures
// =============================================================================

#[tokio::test]
async fn test_unreachable_identity_endpoint() {
    let client = PlantPredictClient::from_config(
        ClientConfig::new(common::unreachable_url()).with_connect_timeout_ms(1_000),
    )
    .unwrap();

    let err = client.session().acquire("client", "secret").await.unwrap_err();

    assert!(matches!(err, PlantPredictError::ConnectionFailure(_)));
    assert!(!client.session().is_authenticated());
}
