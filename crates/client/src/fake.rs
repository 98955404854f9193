use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use bitmap_core::game::{Game, GameStatus, GameSubmission};
use bitmap_core::membership::{MembershipApplication, MembershipStatus};
use bitmap_core::types::DbId;
use bitmap_core::wizard::bitmap_id::BitmapIdRequest;
use bitmap_core::wizard::signup::SignupRequest;

use crate::backend::StorefrontBackend;
use crate::error::ApiError;

/// In-memory [`StorefrontBackend`] that counts calls and can be told to
/// fail specific operations.
#[derive(Clone, Default)]
pub struct FakeBackend {
    taken: Arc<Mutex<HashSet<String>>>,
    games: Arc<Mutex<Vec<Game>>>,
    applications: Arc<Mutex<Vec<MembershipApplication>>>,
    fail_submit: Arc<AtomicBool>,
    pub signup_calls: Arc<AtomicUsize>,
    pub register_calls: Arc<AtomicUsize>,
    pub submit_calls: Arc<AtomicUsize>,
    pub upload_calls: Arc<AtomicUsize>,
    pub list_calls: Arc<AtomicUsize>,
    pub apply_calls: Arc<AtomicUsize>,
    pub leave_calls: Arc<AtomicUsize>,
    pub review_calls: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an email or bitmap ID as already registered.
    pub fn fake_taken(&self, value: &str) {
        self.taken.lock().unwrap().insert(value.to_string());
    }

    pub fn fake_games(&self, games: Vec<Game>) {
        *self.games.lock().unwrap() = games;
    }

    pub fn fake_applications(&self, applications: Vec<MembershipApplication>) {
        *self.applications.lock().unwrap() = applications;
    }

    /// Make every submit-style call fail with a server reason until reset.
    pub fn fake_fail_submit(&self, fail: bool) {
        self.fail_submit.store(fail, Ordering::SeqCst);
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn submit_failure(&self) -> Result<(), ApiError> {
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 500,
                reason: Some("error.submit_failed".into()),
                body: r#"{"reason":"error.submit_failed"}"#.into(),
            });
        }
        Ok(())
    }

    fn review(&self, user_id: DbId, approved: bool) -> Result<(), ApiError> {
        self.review_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_failure()?;
        let mut applications = self.applications.lock().unwrap();
        let Some(app) = applications.iter_mut().find(|app| app.user_id == user_id) else {
            return Err(ApiError::Api {
                status: 404,
                reason: Some("membership.not_found".into()),
                body: r#"{"reason":"membership.not_found"}"#.into(),
            });
        };
        app.status = if approved {
            MembershipStatus::Approved
        } else {
            MembershipStatus::Rejected
        };
        Ok(())
    }
}

#[async_trait]
impl StorefrontBackend for FakeBackend {
    async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        Ok(!self.taken.lock().unwrap().contains(email))
    }

    async fn signup(&self, _request: &SignupRequest) -> Result<(), ApiError> {
        self.signup_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_failure()
    }

    async fn check_bitmap_id(&self, bitmap_id: &str) -> Result<bool, ApiError> {
        Ok(!self.taken.lock().unwrap().contains(bitmap_id))
    }

    async fn register_bitmap_id(&self, _request: &BitmapIdRequest) -> Result<(), ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_failure()
    }

    async fn upload_image(&self, file_name: &str, _bytes: Vec<u8>) -> Result<String, ApiError> {
        let n = self.upload_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://cdn.example/{n}/{file_name}"))
    }

    async fn submit_game(&self, submission: &GameSubmission) -> Result<Game, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_failure()?;
        let mut games = self.games.lock().unwrap();
        let game = Game {
            id: games.len() as i64 + 1,
            user_id: submission.user_id,
            status: GameStatus::Pending,
            created_at: None,
            content: submission.content.clone(),
        };
        games.push(game.clone());
        Ok(game)
    }

    async fn list_games(&self) -> Result<Vec<Game>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.games.lock().unwrap().clone())
    }

    async fn apply_membership(&self, _message: &str) -> Result<(), ApiError> {
        self.apply_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_failure()
    }

    async fn leave_membership(&self) -> Result<(), ApiError> {
        self.leave_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_failure()
    }

    async fn list_membership_applications(&self) -> Result<Vec<MembershipApplication>, ApiError> {
        Ok(self.applications.lock().unwrap().clone())
    }

    async fn approve_membership(&self, user_id: DbId) -> Result<(), ApiError> {
        self.review(user_id, true)
    }

    async fn reject_membership(&self, user_id: DbId) -> Result<(), ApiError> {
        self.review(user_id, false)
    }
}
