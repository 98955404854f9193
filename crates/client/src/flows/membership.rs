use std::sync::Arc;

use bitmap_core::membership::{self, MembershipApplication, MembershipStatus};
use bitmap_core::types::DbId;

use super::FlowError;
use crate::backend::StorefrontBackend;

/// A member's own apply / leave actions.
///
/// Actions the current status does not allow are refused before any
/// request is made.
pub struct MembershipFlow {
    backend: Arc<dyn StorefrontBackend>,
    status: MembershipStatus,
}

impl MembershipFlow {
    pub fn new(backend: Arc<dyn StorefrontBackend>, status: MembershipStatus) -> Self {
        Self { backend, status }
    }

    pub fn status(&self) -> MembershipStatus {
        self.status
    }

    pub fn can_apply(&self) -> bool {
        membership::can_apply(self.status).is_ok()
    }

    pub fn can_leave(&self) -> bool {
        membership::can_leave(self.status).is_ok()
    }

    pub async fn apply(&mut self, message: &str) -> Result<MembershipStatus, FlowError> {
        membership::can_apply(self.status)?;
        self.backend.apply_membership(message.trim()).await?;
        self.status = membership::status_after_apply();
        tracing::info!(status = self.status.as_str(), "Membership application sent");
        Ok(self.status)
    }

    pub async fn leave(&mut self) -> Result<MembershipStatus, FlowError> {
        membership::can_leave(self.status)?;
        let previous = self.status;
        self.backend.leave_membership().await?;
        self.status = membership::status_after_leave();
        tracing::info!(previous = previous.as_str(), "Left membership");
        Ok(self.status)
    }
}

/// Admin console listing of membership applications.
pub struct MembershipReview {
    backend: Arc<dyn StorefrontBackend>,
    applications: Vec<MembershipApplication>,
}

impl MembershipReview {
    pub fn new(backend: Arc<dyn StorefrontBackend>) -> Self {
        Self {
            backend,
            applications: Vec::new(),
        }
    }

    pub fn applications(&self) -> &[MembershipApplication] {
        &self.applications
    }

    pub fn pending(&self) -> impl Iterator<Item = &MembershipApplication> + '_ {
        self.applications
            .iter()
            .filter(|app| app.status == MembershipStatus::Pending)
    }

    /// Reload the listing; returns the number of applications.
    pub async fn refresh(&mut self) -> Result<usize, FlowError> {
        self.applications = self.backend.list_membership_applications().await?;
        tracing::debug!(count = self.applications.len(), "Membership applications loaded");
        Ok(self.applications.len())
    }

    pub async fn approve(&mut self, user_id: DbId) -> Result<MembershipStatus, FlowError> {
        self.review(user_id, true).await
    }

    pub async fn reject(&mut self, user_id: DbId) -> Result<MembershipStatus, FlowError> {
        self.review(user_id, false).await
    }

    async fn review(
        &mut self,
        user_id: DbId,
        approved: bool,
    ) -> Result<MembershipStatus, FlowError> {
        let current = membership::find_application(&self.applications, user_id)?.status;
        membership::can_review(current)?;

        if approved {
            self.backend.approve_membership(user_id).await?;
        } else {
            self.backend.reject_membership(user_id).await?;
        }

        let next = membership::status_after_review(approved);
        if let Some(app) = self.applications.iter_mut().find(|app| app.user_id == user_id) {
            app.status = next;
        }
        tracing::info!(user_id, status = next.as_str(), "Membership application reviewed");
        Ok(next)
    }
}
