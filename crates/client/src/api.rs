//! REST API client for the Bitmap storefront.
//!
//! Wraps the storefront HTTP API (accounts, bitmap IDs, games, membership,
//! media uploads and the informational endpoints) using [`reqwest`].
//!
//! | Operation                        | Request                                   |
//! |----------------------------------|-------------------------------------------|
//! | login                            | `POST /auth/login`                        |
//! | signup                           | `POST /auth/signup`                       |
//! | verify_email                     | `POST /auth/email/verify`                 |
//! | check_email                      | `GET /auth/email/check?email=`            |
//! | check_bitmap_id                  | `GET /bitmap-ids/check?bitmapId=`         |
//! | register_bitmap_id               | `POST /bitmap-ids` (auth)                 |
//! | list_games / get_game            | `GET /games`, `GET /games/{id}`           |
//! | submit_game                      | `POST /games` (auth)                      |
//! | apply_membership                 | `POST /membership` (auth)                 |
//! | leave_membership                 | `DELETE /membership` (auth)               |
//! | list_membership_applications     | `GET /admin/membership` (auth)            |
//! | approve / reject_membership      | `POST /admin/membership/{id}/approve` ... |
//! | upload_image                     | `POST /images` multipart `file` (auth)    |
//! | eula                             | `GET /eula`                               |
//! | notifications                    | `GET /notifications` (auth)               |
//! | mark_notification_read           | `PATCH /notifications/{id}/read` (auth)   |
//! | videos                           | `GET /videos`                             |

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use uuid::Uuid;

use bitmap_core::game::{Game, GameSubmission};
use bitmap_core::locale::Localized;
use bitmap_core::membership::MembershipApplication;
use bitmap_core::types::DbId;
use bitmap_core::wizard::bitmap_id::BitmapIdRequest;
use bitmap_core::wizard::signup::SignupRequest;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{
    AuthToken, AvailabilityResponse, EmailVerification, ErrorBody, LoginRequest,
    MembershipRequest, Notification, UploadedImage, Video,
};

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the Bitmap storefront API.
#[derive(Debug, Clone)]
pub struct BitmapApi {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl BitmapApi {
    /// Create a new API client.
    ///
    /// * `api_url` - API origin, e.g. `https://api.prodbybitmap.com`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Build a client with the configured timeout and token.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let api = Self::with_client(client, config.api_url.clone());
        Ok(match &config.api_token {
            Some(token) => api.with_token(token.clone()),
            None => api,
        })
    }

    /// Return a copy of this client that authenticates with `token`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // ---- accounts ----

    /// Exchange credentials for an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, "/auth/signup")
            .json(request)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Confirm the code mailed to `email` after signup.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<(), ApiError> {
        let body = EmailVerification {
            email: email.to_string(),
            code: code.to_string(),
        };
        let response = self
            .request(Method::POST, "/auth/email/verify")
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// `true` if no account uses `email` yet.
    pub async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        let response = self
            .request(Method::GET, "/auth/email/check")
            .query(&[("email", email)])
            .send()
            .await?;
        let body: AvailabilityResponse = Self::parse_response(response).await?;
        Ok(body.available)
    }

    // ---- bitmap ids ----

    /// `true` if `bitmap_id` is not registered yet.
    pub async fn check_bitmap_id(&self, bitmap_id: &str) -> Result<bool, ApiError> {
        let response = self
            .request(Method::GET, "/bitmap-ids/check")
            .query(&[("bitmapId", bitmap_id)])
            .send()
            .await?;
        let body: AvailabilityResponse = Self::parse_response(response).await?;
        Ok(body.available)
    }

    pub async fn register_bitmap_id(&self, request: &BitmapIdRequest) -> Result<(), ApiError> {
        let response = self
            .authed(Method::POST, "/bitmap-ids", "register_bitmap_id")?
            .json(request)
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- games ----

    pub async fn list_games(&self) -> Result<Vec<Game>, ApiError> {
        let response = self.request(Method::GET, "/games").send().await?;
        Self::parse_response(response).await
    }

    pub async fn get_game(&self, game_id: DbId) -> Result<Game, ApiError> {
        let response = self
            .request(Method::GET, &format!("/games/{game_id}"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Publish a draft. Returns the stored game with its assigned id.
    pub async fn submit_game(&self, submission: &GameSubmission) -> Result<Game, ApiError> {
        let response = self
            .authed(Method::POST, "/games", "submit_game")?
            .json(submission)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- membership ----

    pub async fn apply_membership(&self, message: &str) -> Result<(), ApiError> {
        let body = MembershipRequest {
            message: message.to_string(),
        };
        let response = self
            .authed(Method::POST, "/membership", "apply_membership")?
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    pub async fn leave_membership(&self) -> Result<(), ApiError> {
        let response = self
            .authed(Method::DELETE, "/membership", "leave_membership")?
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Admin only.
    pub async fn list_membership_applications(
        &self,
    ) -> Result<Vec<MembershipApplication>, ApiError> {
        let response = self
            .authed(Method::GET, "/admin/membership", "list_membership_applications")?
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Admin only.
    pub async fn approve_membership(&self, user_id: DbId) -> Result<(), ApiError> {
        self.review_membership(user_id, "approve").await
    }

    /// Admin only.
    pub async fn reject_membership(&self, user_id: DbId) -> Result<(), ApiError> {
        self.review_membership(user_id, "reject").await
    }

    async fn review_membership(&self, user_id: DbId, decision: &str) -> Result<(), ApiError> {
        let response = self
            .authed(
                Method::POST,
                &format!("/admin/membership/{user_id}/{decision}"),
                "review_membership",
            )?
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- media ----

    /// Upload an image and return its hosted URI.
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(image_mime(file_name))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .authed(Method::POST, "/images", "upload_image")?
            .multipart(form)
            .send()
            .await?;
        let uploaded: UploadedImage = Self::parse_response(response).await?;
        tracing::info!(file_name, url = %uploaded.url, "Image uploaded");
        Ok(uploaded.url)
    }

    // ---- informational ----

    pub async fn eula(&self) -> Result<Localized, ApiError> {
        let response = self.request(Method::GET, "/eula").send().await?;
        Self::parse_response(response).await
    }

    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let response = self
            .authed(Method::GET, "/notifications", "notifications")?
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn mark_notification_read(&self, notification_id: DbId) -> Result<(), ApiError> {
        let response = self
            .authed(
                Method::PATCH,
                &format!("/notifications/{notification_id}/read"),
                "mark_notification_read",
            )?
            .send()
            .await?;
        Self::check_status(response).await
    }

    pub async fn videos(&self) -> Result<Vec<Video>, ApiError> {
        let response = self.request(Method::GET, "/videos").send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = Uuid::new_v4();
        tracing::debug!(%method, path, %request_id, "Bitmap API request");
        self.client
            .request(method, format!("{}{}", self.api_url, path))
            .header(REQUEST_ID_HEADER, request_id.to_string())
    }

    /// Like [`request`](Self::request) but attaches the bearer token, failing
    /// before anything is sent when there is none.
    fn authed(
        &self,
        method: Method,
        path: &str,
        operation: &'static str,
    ) -> Result<RequestBuilder, ApiError> {
        let token = self
            .token
            .as_deref()
            .ok_or(ApiError::Unauthenticated(operation))?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`] carrying the
    /// status, the server reason and the body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let path = response.url().path().to_string();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let reason = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|b| b.reason);
            tracing::warn!(
                path = %path,
                status = status.as_u16(),
                reason = reason.as_deref().unwrap_or("-"),
                "Bitmap API request failed"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                reason,
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

fn image_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
