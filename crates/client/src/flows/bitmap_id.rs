use std::sync::Arc;

use bitmap_core::validation;
use bitmap_core::wizard::bitmap_id::{BitmapIdForm, BitmapIdStep, BitmapIdWizard};
use bitmap_core::wizard::SubmitState;

use super::FlowError;
use crate::backend::StorefrontBackend;

/// Registration of a member's public bitmap ID.
pub struct BitmapIdFlow {
    backend: Arc<dyn StorefrontBackend>,
    wizard: BitmapIdWizard,
    form: BitmapIdForm,
}

impl BitmapIdFlow {
    pub fn new(backend: Arc<dyn StorefrontBackend>) -> Self {
        Self {
            backend,
            wizard: BitmapIdWizard::new(),
            form: BitmapIdForm::default(),
        }
    }

    pub fn step(&self) -> BitmapIdStep {
        self.wizard.step()
    }

    pub fn form(&self) -> &BitmapIdForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BitmapIdForm {
        &mut self.form
    }

    pub fn submit_state(&self) -> &SubmitState {
        self.wizard.submit_state()
    }

    /// Check the entered ID; malformed IDs are rejected without a request.
    pub async fn check_availability(&mut self) -> Result<bool, FlowError> {
        let bitmap_id = self.form.bitmap_id.clone();
        validation::validate_bitmap_id(&bitmap_id)?;
        let available = self.backend.check_bitmap_id(&bitmap_id).await?;
        tracing::debug!(bitmap_id = %bitmap_id, available, "Bitmap ID duplicate check");
        self.form.record_id_check(&bitmap_id, available);
        Ok(available)
    }

    pub fn next(&mut self) -> Result<BitmapIdStep, FlowError> {
        Ok(self.wizard.next(&self.form)?)
    }

    pub fn back(&mut self) -> Result<BitmapIdStep, FlowError> {
        Ok(self.wizard.back()?)
    }

    pub async fn submit(&mut self) -> Result<(), FlowError> {
        self.wizard.begin_submit(&self.form)?;
        let request = self.form.to_request();
        match self.backend.register_bitmap_id(&request).await {
            Ok(()) => {
                self.wizard.finish_submit(Ok(()));
                tracing::info!(bitmap_id = %request.bitmap_id, "Bitmap ID registered");
                Ok(())
            }
            Err(e) => {
                self.wizard.finish_submit(Err(e.message_key().to_string()));
                Err(e.into())
            }
        }
    }
}
