//! Prediction actions

use plantpredict_core::{Acknowledgement, Prediction, Resource};
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::PlantPredictClient;
use crate::entity::Entity;
use crate::error::Result;

impl Entity<Prediction> {
    /// Queue the prediction for simulation
    ///
    /// `POST /Project/{projectId}/Prediction/{id}/Run`
    #[instrument(skip(self, client))]
    pub async fn run(&self, client: &PlantPredictClient) -> Result<Acknowledgement> {
        let id = self.require_id()?;
        let url = client.endpoint(&format!("{}/Run", self.item_path(id)))?;
        client
            .execute(|| client.http_client().post(url.clone()))
            .await?;

        info!(%id, "Prediction run requested");
        Ok(Acknowledgement::success())
    }

    /// Summary of a completed run
    ///
    /// `GET /Project/{projectId}/Prediction/{id}/ResultSummary`
    #[instrument(skip(self, client))]
    pub async fn get_results_summary(&self, client: &PlantPredictClient) -> Result<Value> {
        let id = self.require_id()?;
        let url = client.endpoint(&format!("{}/ResultSummary", self.item_path(id)))?;
        let response = client
            .execute(|| client.http_client().get(url.clone()))
            .await?;
        response.json()
    }
}
