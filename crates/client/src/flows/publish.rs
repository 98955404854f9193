use std::sync::Arc;

use bitmap_core::draft::DraftStore;
use bitmap_core::game::{Game, ImageSlot};
use bitmap_core::wizard::game_submission::{GameSubmissionStep, GameSubmissionWizard};
use bitmap_core::wizard::SubmitState;

use super::FlowError;
use crate::backend::StorefrontBackend;

/// Game publishing over a shared [`DraftStore`].
///
/// Editors write into the store directly; the flow adds image uploads,
/// step gating and the final submission, which clears the draft on success.
pub struct PublishFlow {
    backend: Arc<dyn StorefrontBackend>,
    store: Arc<DraftStore>,
    wizard: GameSubmissionWizard,
}

impl PublishFlow {
    pub fn new(backend: Arc<dyn StorefrontBackend>, store: Arc<DraftStore>) -> Self {
        Self {
            backend,
            store,
            wizard: GameSubmissionWizard::new(),
        }
    }

    pub fn store(&self) -> &Arc<DraftStore> {
        &self.store
    }

    pub fn step(&self) -> GameSubmissionStep {
        self.wizard.step()
    }

    pub fn submit_state(&self) -> &SubmitState {
        self.wizard.submit_state()
    }

    pub fn next(&mut self) -> Result<GameSubmissionStep, FlowError> {
        let draft = self.store.snapshot();
        Ok(self.wizard.next(&draft)?)
    }

    pub fn back(&mut self) -> Result<GameSubmissionStep, FlowError> {
        Ok(self.wizard.back()?)
    }

    /// Upload an image into one of the reserved slots, replacing what was
    /// there.
    pub async fn upload_slot_image(
        &self,
        slot: ImageSlot,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, FlowError> {
        let uri = self.backend.upload_image(file_name, bytes).await?;
        self.store.set_image_slot(slot, &uri);
        Ok(uri)
    }

    /// Upload an image into the first free gallery position.
    pub async fn upload_gallery_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, FlowError> {
        let uri = self.backend.upload_image(file_name, bytes).await?;
        self.store.add_gallery_image(&uri);
        Ok(uri)
    }

    /// Submit the current draft from the review step.
    pub async fn submit(&mut self) -> Result<Game, FlowError> {
        let draft = self.store.snapshot();
        self.wizard.begin_submit(&draft)?;

        let submission = match draft.to_submission() {
            Ok(submission) => submission,
            Err(e) => {
                self.wizard.finish_submit(Err(e.to_string()));
                return Err(e.into());
            }
        };

        match self.backend.submit_game(&submission).await {
            Ok(game) => {
                self.wizard.finish_submit(Ok(()));
                self.store.reset_form();
                tracing::info!(game_id = game.id, title = %game.content.title, "Game submitted");
                Ok(game)
            }
            Err(e) => {
                self.wizard.finish_submit(Err(e.message_key().to_string()));
                Err(e.into())
            }
        }
    }
}
