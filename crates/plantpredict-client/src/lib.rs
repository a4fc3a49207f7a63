//! PlantPredict Client Library
//!
//! Mirrors remote PlantPredict entities as local values. Each entity operation
//! becomes one authenticated HTTP request; local attributes become the JSON
//! payload.
//!
//! # Example
//!
//! ```rust,no_run
//! use plantpredict_client::{ClientConfig, Entity, PlantPredictClient, Project};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::new("https://api.plantpredict.com")
//!         .with_credentials("my-client-id", "my-client-secret");
//!     let client = PlantPredictClient::from_config(config)?;
//!
//!     let login = client.login().await?;
//!     anyhow::ensure!(login.is_success(), "login rejected: {}", login.text());
//!
//!     // Create a project, then rename it
//!     let mut project = Entity::new(Project::new("Sunny Acres", 33.45, -112.07));
//!     let created = project.create(&client).await?;
//!     project.name = Some("Sunny Acres II".into());
//!     project.update(&client).await?;
//!
//!     // Resynchronize from the service; local edits are discarded
//!     project.get(&client).await?;
//!     println!("project {} is {:?}", created.id, project.name);
//!
//!     project.delete(&client).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Authentication
//!
//! The client owns an [`AuthSession`]. Every request carries its bearer token.
//! When the service answers 401, the session refreshes once and the request is
//! retried once; a second 401 is returned as [`PlantPredictError::AuthExpired`].
//! A retried `create()` is not idempotent on the service side.
//!
//! # Testing
//!
//! The `testing` module runs an axum router as a stand-in service:
//!
//! ```rust,ignore
//! use plantpredict_client::testing::TestServer;
//!
//! let server = TestServer::start_with_tokens(router, "access", "refresh").await?;
//! project.get(&server.client).await?;
//! ```

mod auth;
mod client;
pub mod config;
mod entity;
mod error;
pub mod guard;
mod resources;
pub mod testing;

pub use auth::{AuthResponse, AuthSession, Credentials, TOKEN_PATH};
pub use client::PlantPredictClient;
pub use config::{ClientConfig, ConfigError};
pub use entity::{Entity, EntityState};
pub use error::{PlantPredictError, Result};
pub use guard::ApiResponse;

// Re-export core types for convenience
pub use plantpredict_core::{
    Acknowledgement, Created, EntityId, Prediction, Project, ProjectSearch, Resource,
};
