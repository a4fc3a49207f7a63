//! The contract every remote entity schema implements

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::EntityId;

/// A remote PlantPredict resource.
///
/// Implementors are plain field schemas. They name the REST resource and expose
/// their `id`; the generic create/get/update/delete machinery in
/// `plantpredict-client` does the rest. Paths are relative to the service base
/// URL and start with `/`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Resource name as it appears in the URL (e.g. `"Project"`)
    const NAME: &'static str;

    /// Remote identifier, absent until the entity exists remotely
    fn id(&self) -> Option<&EntityId>;

    fn set_id(&mut self, id: EntityId);

    /// Collection path used by create (`POST`) and update (`PUT`)
    fn collection_path(&self) -> String {
        format!("/{}", Self::NAME)
    }

    /// Item path used by get (`GET`) and delete (`DELETE`)
    fn item_path(&self, id: &EntityId) -> String {
        format!("{}/{}", self.collection_path(), id.path_segment())
    }
}

/// Body returned by a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub id: EntityId,
}

/// Acknowledgement returned by update, delete and action endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub is_successful: bool,
}

impl Acknowledgement {
    pub fn success() -> Self {
        Self {
            is_successful: true,
        }
    }
}
