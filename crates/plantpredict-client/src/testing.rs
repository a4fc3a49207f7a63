//! Test utilities for plantpredict-client
//!
//! Runs an axum router standing in for the PlantPredict service on an
//! ephemeral local port, with a client already pointed at it.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::ClientConfig;
use crate::{PlantPredictClient, Result};

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: PlantPredictClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Start a server whose client holds no tokens
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{routing::post, Json, Router};
    /// use plantpredict_client::testing::TestServer;
    ///
    /// let router = Router::new().route("/Project", post(|| async { Json(json!({"id": 1})) }));
    /// let server = TestServer::start(router).await?;
    /// project.create(&server.client).await?;
    /// ```
    pub async fn start(router: axum::Router) -> Result<Self> {
        Self::start_with(router, |base_url| {
            PlantPredictClient::from_config(
                ClientConfig::new(base_url)
                    .with_credentials("test-client", "test-secret")
                    .with_request_timeout_ms(5_000)
                    .with_connect_timeout_ms(2_000),
            )
        })
        .await
    }

    /// Start a server whose client already holds a token pair
    pub async fn start_with_tokens(
        router: axum::Router,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Self> {
        Self::start_with(router, |base_url| {
            PlantPredictClient::with_tokens(base_url, access_token, refresh_token)
        })
        .await
    }

    /// Start a server and build the client with a custom constructor
    pub async fn start_with<F>(router: axum::Router, make_client: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Result<PlantPredictClient>,
    {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let client = make_client(&format!("http://{}", addr))?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &PlantPredictClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
