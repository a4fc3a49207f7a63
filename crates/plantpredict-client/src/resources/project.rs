//! Project search and child listing

use plantpredict_core::{Prediction, Project, ProjectSearch, Resource};
use tracing::{debug, instrument};

use crate::client::PlantPredictClient;
use crate::entity::Entity;
use crate::error::Result;

impl PlantPredictClient {
    /// Find projects near a location
    ///
    /// `GET /Project/Search?latitude=..&longitude=..&searchRadius=..`
    #[instrument(skip(self))]
    pub async fn search_projects(&self, query: ProjectSearch) -> Result<Vec<Project>> {
        let url = self.endpoint(&format!("/{}/Search", Project::NAME))?;
        let response = self
            .execute(|| self.http_client().get(url.clone()).query(&query))
            .await?;

        let projects: Vec<Project> = response.json()?;
        debug!(count = projects.len(), "Project search returned");
        Ok(projects)
    }
}

impl Entity<Project> {
    /// Every prediction belonging to this project
    ///
    /// `GET /Project/{id}/Prediction`
    #[instrument(skip(self, client))]
    pub async fn get_all_predictions(
        &self,
        client: &PlantPredictClient,
    ) -> Result<Vec<Prediction>> {
        let id = self.require_id()?;
        let path = format!("{}/{}", self.item_path(id), Prediction::NAME);
        let url = client.endpoint(&path)?;
        let response = client
            .execute(|| client.http_client().get(url.clone()))
            .await?;
        response.json()
    }
}
