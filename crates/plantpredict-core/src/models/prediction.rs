//! Prediction models

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::resource::Resource;

/// An energy prediction belonging to a project.
///
/// Predictions live under their project, so both paths embed `project_id`:
/// `/Project/{projectId}/Prediction[/{id}]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Service-side status code (draft, queued, completed, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    /// Number of years the weather year is repeated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_repeater: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Prediction {
    /// Create a local prediction under an existing project
    pub fn new(project_id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Reference an existing remote prediction
    pub fn with_id(project_id: impl Into<EntityId>, id: impl Into<EntityId>) -> Self {
        Self {
            id: Some(id.into()),
            project_id: Some(project_id.into()),
            ..Default::default()
        }
    }
}

impl Resource for Prediction {
    const NAME: &'static str = "Prediction";

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    // A missing project id yields an unroutable path; the service rejects it.
    fn collection_path(&self) -> String {
        let project = self
            .project_id
            .as_ref()
            .map(EntityId::path_segment)
            .unwrap_or_default();
        format!("/Project/{}/{}", project, Self::NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths_nest_under_project() {
        let prediction = Prediction::with_id(12i64, 99i64);
        assert_eq!(prediction.collection_path(), "/Project/12/Prediction");
        assert_eq!(
            prediction.item_path(prediction.id().unwrap()),
            "/Project/12/Prediction/99"
        );
    }

    #[test]
    fn test_project_reference_is_by_id() {
        let prediction = Prediction::new("p1", "Year one");
        assert_eq!(
            serde_json::to_value(&prediction).unwrap(),
            json!({"projectId": "p1", "name": "Year one"})
        );
    }
}
