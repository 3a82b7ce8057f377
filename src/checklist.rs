use crate::api::{ApiClient, ProofFile};
use crate::errors::AppError;
use crate::machine::ItemRef;
use crate::models::{ChecklistSnapshot, Submission};
use tracing::{debug, info};

pub struct Checklist<'a> {
    client: &'a ApiClient,
}

impl<'a> Checklist<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> Result<ChecklistSnapshot, AppError> {
        let snapshot = self.client.checklist().await?;
        debug!(
            date = %snapshot.date,
            tasks = snapshot.tasks.len(),
            extras = snapshot.extras.len(),
            "checklist loaded"
        );
        Ok(snapshot)
    }

    /// Uploads proof for `item`, then reloads the whole snapshot.
    pub async fn submit_proof(
        &self,
        item: &ItemRef,
        proof: ProofFile,
    ) -> Result<(Submission, ChecklistSnapshot), AppError> {
        info!(
            %item,
            bytes = proof.bytes.len(),
            video = proof.is_video(),
            "submitting proof"
        );
        let submission = self.client.complete(item, proof).await?;
        if submission.late {
            info!(%item, "proof arrived after the deadline");
        }

        let snapshot = self.load().await?;
        Ok((submission, snapshot))
    }

    pub async fn retract(&self, item: &ItemRef) -> Result<ChecklistSnapshot, AppError> {
        info!(%item, "retracting completion");
        self.client.uncomplete(item).await?;
        self.load().await
    }
}
