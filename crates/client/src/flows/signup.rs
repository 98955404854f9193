use std::sync::Arc;

use bitmap_core::validation;
use bitmap_core::wizard::signup::{SignupForm, SignupStep, SignupWizard};
use bitmap_core::wizard::SubmitState;

use super::FlowError;
use crate::backend::StorefrontBackend;

/// Account creation: terms, credentials with the duplicate-email check,
/// profile, and the final signup request.
pub struct SignupFlow {
    backend: Arc<dyn StorefrontBackend>,
    wizard: SignupWizard,
    form: SignupForm,
}

impl SignupFlow {
    pub fn new(backend: Arc<dyn StorefrontBackend>) -> Self {
        Self {
            backend,
            wizard: SignupWizard::new(),
            form: SignupForm::default(),
        }
    }

    pub fn step(&self) -> SignupStep {
        self.wizard.step()
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        &mut self.form
    }

    pub fn submit_state(&self) -> &SubmitState {
        self.wizard.submit_state()
    }

    /// Ask the server whether the entered email is free and remember the
    /// answer for that exact address.
    pub async fn check_email(&mut self) -> Result<bool, FlowError> {
        let email = self.form.email.clone();
        validation::validate_email(&email)?;
        let available = self.backend.check_email(email.trim()).await?;
        tracing::debug!(email = %email.trim(), available, "Email duplicate check");
        self.form.record_email_check(&email, available);
        Ok(available)
    }

    pub fn next(&mut self) -> Result<SignupStep, FlowError> {
        Ok(self.wizard.next(&self.form)?)
    }

    pub fn back(&mut self) -> Result<SignupStep, FlowError> {
        Ok(self.wizard.back()?)
    }

    /// Send the signup request. Allowed once per successful attempt; a
    /// failed attempt may be retried.
    pub async fn submit(&mut self) -> Result<(), FlowError> {
        self.wizard.begin_submit(&self.form)?;
        let request = self.form.to_request();
        match self.backend.signup(&request).await {
            Ok(()) => {
                self.wizard.finish_submit(Ok(()));
                tracing::info!(username = %request.username, "Signup submitted");
                Ok(())
            }
            Err(e) => {
                self.wizard.finish_submit(Err(e.message_key().to_string()));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeBackend;
    use assert_matches::assert_matches;
    use bitmap_core::error::CoreError;

    fn flow(fake: &FakeBackend) -> SignupFlow {
        SignupFlow::new(Arc::new(fake.clone()))
    }

    fn fill(flow: &mut SignupFlow) {
        let form = flow.form_mut();
        form.agreed_to_terms = true;
        form.email = "player@prodbybitmap.com".into();
        form.username = "player1".into();
        form.password = "correct-horse".into();
        form.password_confirmation = "correct-horse".into();
        form.nickname = "플레이어".into();
    }

    #[tokio::test]
    async fn duplicate_email_blocks_credentials() {
        let fake = FakeBackend::new();
        fake.fake_taken("player@prodbybitmap.com");
        let mut flow = flow(&fake);
        fill(&mut flow);

        assert!(!flow.check_email().await.unwrap());
        flow.next().unwrap();
        assert_matches!(flow.next(), Err(FlowError::Core(CoreError::InvalidTransition(_))));
        assert_eq!(flow.step(), SignupStep::Credentials);
    }

    #[tokio::test]
    async fn malformed_email_is_not_sent() {
        let fake = FakeBackend::new();
        let mut flow = flow(&fake);
        flow.form_mut().email = "not-an-email".into();
        assert_matches!(flow.check_email().await, Err(FlowError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn submit_once_then_rejected() {
        let fake = FakeBackend::new();
        let mut flow = flow(&fake);
        fill(&mut flow);
        assert!(flow.check_email().await.unwrap());
        for _ in 0..3 {
            flow.next().unwrap();
        }
        assert_eq!(flow.step(), SignupStep::Confirm);

        flow.submit().await.unwrap();
        assert_matches!(flow.submit().await, Err(FlowError::Core(CoreError::Conflict(_))));
        assert_eq!(FakeBackend::count(&fake.signup_calls), 1);
        assert_eq!(flow.submit_state(), &SubmitState::Succeeded);
    }

    #[tokio::test]
    async fn failed_submit_can_be_retried() {
        let fake = FakeBackend::new();
        fake.fake_fail_submit(true);
        let mut flow = flow(&fake);
        fill(&mut flow);
        flow.check_email().await.unwrap();
        for _ in 0..3 {
            flow.next().unwrap();
        }

        let err = flow.submit().await.unwrap_err();
        assert_eq!(err.message_key(), "error.submit_failed");
        assert_matches!(flow.submit_state(), SubmitState::Failed(_));

        fake.fake_fail_submit(false);
        flow.submit().await.unwrap();
        assert_eq!(FakeBackend::count(&fake.signup_calls), 2);
    }
}
