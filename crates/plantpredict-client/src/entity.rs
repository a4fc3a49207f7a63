//! Generic create/get/update/delete over any [`Resource`]
//!
//! [`Entity`] pairs a resource's attributes with its lifecycle state:
//!
//! ```text
//! Local --create()--> Bound --delete()--> Deleted
//!                     |  ^
//!                     get()/update()
//! ```
//!
//! Both directions are full-replace: `update()` sends every attribute and
//! `get()` overwrites every attribute. Nothing is diffed.

use std::ops::{Deref, DerefMut};

use plantpredict_core::{Acknowledgement, Created, EntityId, Resource};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::client::PlantPredictClient;
use crate::error::{PlantPredictError, Result};

/// Lifecycle state of a local entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// Not yet created remotely, no id
    Local,
    /// Has an id; local attributes may be stale
    Bound,
    /// Removed remotely; the id is dangling
    Deleted,
}

/// Local mirror of one remote resource
#[derive(Debug, Clone)]
pub struct Entity<R> {
    attributes: R,
    state: EntityState,
}

impl<R: Resource> Entity<R> {
    /// Wrap attributes. Attributes that already carry an id start out `Bound`.
    pub fn new(attributes: R) -> Self {
        let state = if attributes.id().is_some() {
            EntityState::Bound
        } else {
            EntityState::Local
        };
        Self { attributes, state }
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn id(&self) -> Option<&EntityId> {
        self.attributes.id()
    }

    pub fn attributes(&self) -> &R {
        &self.attributes
    }

    pub fn into_inner(self) -> R {
        self.attributes
    }

    pub(crate) fn require_id(&self) -> Result<&EntityId> {
        self.attributes
            .id()
            .ok_or(PlantPredictError::MissingId { resource: R::NAME })
    }

    /// `POST {collection}` with the full attribute set.
    ///
    /// The returned id and any other server-assigned fields are merged into the
    /// local attributes.
    #[instrument(skip(self, client), fields(resource = R::NAME))]
    pub async fn create(&mut self, client: &PlantPredictClient) -> Result<Created> {
        let url = client.endpoint(&self.attributes.collection_path())?;
        let response = client
            .execute(|| client.http_client().post(url.clone()).json(&self.attributes))
            .await?;

        let payload: Value = response.json()?;
        let created: Created = decode(&payload)?;

        let mut merged: R = decode(&merge(encode(&self.attributes)?, payload))?;
        merged.set_id(created.id.clone());
        self.attributes = merged;
        self.state = EntityState::Bound;

        info!(id = %created.id, "Created");
        Ok(created)
    }

    /// `GET {collection}/{id}`, overwriting every local attribute.
    ///
    /// Returns the JSON object exactly as received.
    #[instrument(skip(self, client), fields(resource = R::NAME))]
    pub async fn get(&mut self, client: &PlantPredictClient) -> Result<Value> {
        let id = self.require_id()?.clone();
        let url = client.endpoint(&self.attributes.item_path(&id))?;
        let response = client
            .execute(|| client.http_client().get(url.clone()))
            .await?;

        let payload: Value = response.json()?;
        let mut fresh: R = decode(&payload)?;
        if fresh.id().is_none() {
            fresh.set_id(id);
        }
        self.attributes = fresh;
        self.state = EntityState::Bound;

        debug!("Attributes replaced from remote");
        Ok(payload)
    }

    /// `PUT {collection}` with the full attribute set, id in the body.
    #[instrument(skip(self, client), fields(resource = R::NAME))]
    pub async fn update(&self, client: &PlantPredictClient) -> Result<Acknowledgement> {
        self.require_id()?;
        let url = client.endpoint(&self.attributes.collection_path())?;
        client
            .execute(|| client.http_client().put(url.clone()).json(&self.attributes))
            .await?;
        Ok(Acknowledgement::success())
    }

    /// `DELETE {collection}/{id}`.
    ///
    /// The entity stays usable locally but moves to `Deleted`; further remote
    /// calls are sent as-is and fail remotely.
    #[instrument(skip(self, client), fields(resource = R::NAME))]
    pub async fn delete(&mut self, client: &PlantPredictClient) -> Result<Acknowledgement> {
        let id = self.require_id()?;
        let url = client.endpoint(&self.attributes.item_path(id))?;
        client
            .execute(|| client.http_client().delete(url.clone()))
            .await?;

        self.state = EntityState::Deleted;
        info!("Deleted");
        Ok(Acknowledgement::success())
    }
}

impl<R: Resource> From<R> for Entity<R> {
    fn from(attributes: R) -> Self {
        Self::new(attributes)
    }
}

impl<R> Deref for Entity<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.attributes
    }
}

impl<R> DerefMut for Entity<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.attributes
    }
}

fn encode<R: Resource>(attributes: &R) -> Result<Value> {
    serde_json::to_value(attributes).map_err(|e| PlantPredictError::ParseError(e.to_string()))
}

/// Deserialize a response body into a schema. Unknown keys are ignored.
fn decode<T: serde::de::DeserializeOwned>(payload: &Value) -> Result<T> {
    serde_json::from_value(payload.clone())
        .map_err(|e| PlantPredictError::ParseError(e.to_string()))
}

/// Overlay the keys of `patch` onto `base`
fn merge(mut base: Value, patch: Value) -> Value {
    if let (Value::Object(base_map), Value::Object(patch_map)) = (&mut base, patch) {
        base_map.extend(patch_map);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantpredict_core::Project;
    use serde_json::json;

    #[test]
    fn test_state_from_attributes() {
        assert_eq!(
            Entity::new(Project::new("X", 1.0, 2.0)).state(),
            EntityState::Local
        );
        assert_eq!(
            Entity::new(Project::with_id(5i64)).state(),
            EntityState::Bound
        );
    }

    #[test]
    fn test_require_id() {
        let entity = Entity::new(Project::default());
        assert!(matches!(
            entity.require_id(),
            Err(PlantPredictError::MissingId {
                resource: "Project"
            })
        ));
    }

    #[test]
    fn test_merge_overlays_server_fields() {
        let merged = merge(
            json!({"name": "X", "latitude": 10.0}),
            json!({"id": 3, "country": "Spain"}),
        );
        assert_eq!(
            merged,
            json!({"name": "X", "latitude": 10.0, "id": 3, "country": "Spain"})
        );
    }

    #[test]
    fn test_deref_exposes_fields() {
        let mut entity = Entity::new(Project::new("X", 1.0, 2.0));
        entity.name = Some("Renamed".into());
        assert_eq!(entity.attributes().name.as_deref(), Some("Renamed"));
    }
}
