//! plantpredict-core - Core resource types for the PlantPredict client
//!
//! This crate holds the transport-free part of the client: entity identifiers,
//! the [`Resource`] trait that every remote entity schema implements, and the
//! field schemas themselves. The HTTP side lives in `plantpredict-client`.

pub mod models;
pub mod resource;

pub use models::*;
pub use resource::{Acknowledgement, Created, Resource};
