//! Project models

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::resource::Resource;

/// A PlantPredict project: a named site that owns predictions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// North-South coordinate, decimal degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// East-West coordinate, decimal degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Site elevation in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    /// Hours from UTC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_offset_from_utc: Option<f64>,
}

impl Project {
    /// Create a local project at the given location
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.into()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Default::default()
        }
    }

    /// Reference an existing remote project by id
    pub fn with_id(id: impl Into<EntityId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }
}

impl Resource for Project {
    const NAME: &'static str = "Project";

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

/// Query for `GET /Project/Search`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSearch {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in miles
    pub search_radius: f64,
}

impl ProjectSearch {
    pub const DEFAULT_RADIUS: f64 = 1.0;

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            search_radius: Self::DEFAULT_RADIUS,
        }
    }

    pub fn radius(mut self, miles: f64) -> Self {
        self.search_radius = miles;
        self
    }
}
