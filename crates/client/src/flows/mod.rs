//! Flows tie a wizard controller (or the catalog index) to the backend.
//!
//! Each flow owns its wizard and form state, performs the availability
//! checks and uploads the form needs, and makes the single terminal
//! submission. Failures come back as [`FlowError`] with a message key the
//! UI shows next to the form.

pub mod bitmap_id;
pub mod catalog;
pub mod membership;
pub mod publish;
pub mod signup;

pub use bitmap_id::BitmapIdFlow;
pub use catalog::GameCatalog;
pub use membership::{MembershipFlow, MembershipReview};
pub use publish::PublishFlow;
pub use signup::SignupFlow;

use bitmap_core::error::CoreError;

use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FlowError {
    /// Message-catalog key for the inline error message.
    pub fn message_key(&self) -> &str {
        match self {
            Self::Core(CoreError::Validation(_)) => "error.validation",
            Self::Core(CoreError::InvalidTransition(_)) => "error.step_incomplete",
            Self::Core(CoreError::Conflict(_)) => "error.already_submitted",
            Self::Core(CoreError::NotFound(_)) => "error.not_found",
            Self::Api(e) => e.message_key(),
        }
    }
}
