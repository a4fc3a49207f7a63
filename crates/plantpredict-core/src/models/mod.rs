//! Field schemas for PlantPredict entities

mod id;
mod prediction;
mod project;

pub use id::*;
pub use prediction::*;
pub use project::*;
