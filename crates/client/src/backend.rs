//! The seam between the flows and the network.

use async_trait::async_trait;

use bitmap_core::game::{Game, GameSubmission};
use bitmap_core::membership::MembershipApplication;
use bitmap_core::types::DbId;
use bitmap_core::wizard::bitmap_id::BitmapIdRequest;
use bitmap_core::wizard::signup::SignupRequest;

use crate::api::BitmapApi;
use crate::error::ApiError;

/// Storefront operations used by the signup, bitmap-ID, publishing,
/// membership and catalog flows.
#[async_trait]
pub trait StorefrontBackend: Send + Sync {
    async fn check_email(&self, email: &str) -> Result<bool, ApiError>;

    async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError>;

    async fn check_bitmap_id(&self, bitmap_id: &str) -> Result<bool, ApiError>;

    async fn register_bitmap_id(&self, request: &BitmapIdRequest) -> Result<(), ApiError>;

    /// Upload an image and return its hosted URI.
    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ApiError>;

    async fn submit_game(&self, submission: &GameSubmission) -> Result<Game, ApiError>;

    async fn list_games(&self) -> Result<Vec<Game>, ApiError>;

    async fn apply_membership(&self, message: &str) -> Result<(), ApiError>;

    async fn leave_membership(&self) -> Result<(), ApiError>;

    async fn list_membership_applications(&self) -> Result<Vec<MembershipApplication>, ApiError>;

    async fn approve_membership(&self, user_id: DbId) -> Result<(), ApiError>;

    async fn reject_membership(&self, user_id: DbId) -> Result<(), ApiError>;
}

#[async_trait]
impl StorefrontBackend for BitmapApi {
    async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        BitmapApi::check_email(self, email).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        BitmapApi::signup(self, request).await
    }

    async fn check_bitmap_id(&self, bitmap_id: &str) -> Result<bool, ApiError> {
        BitmapApi::check_bitmap_id(self, bitmap_id).await
    }

    async fn register_bitmap_id(&self, request: &BitmapIdRequest) -> Result<(), ApiError> {
        BitmapApi::register_bitmap_id(self, request).await
    }

    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ApiError> {
        BitmapApi::upload_image(self, file_name, bytes).await
    }

    async fn submit_game(&self, submission: &GameSubmission) -> Result<Game, ApiError> {
        BitmapApi::submit_game(self, submission).await
    }

    async fn list_games(&self) -> Result<Vec<Game>, ApiError> {
        BitmapApi::list_games(self).await
    }

    async fn apply_membership(&self, message: &str) -> Result<(), ApiError> {
        BitmapApi::apply_membership(self, message).await
    }

    async fn leave_membership(&self) -> Result<(), ApiError> {
        BitmapApi::leave_membership(self).await
    }

    async fn list_membership_applications(&self) -> Result<Vec<MembershipApplication>, ApiError> {
        BitmapApi::list_membership_applications(self).await
    }

    async fn approve_membership(&self, user_id: DbId) -> Result<(), ApiError> {
        BitmapApi::approve_membership(self, user_id).await
    }

    async fn reject_membership(&self, user_id: DbId) -> Result<(), ApiError> {
        BitmapApi::reject_membership(self, user_id).await
    }
}
