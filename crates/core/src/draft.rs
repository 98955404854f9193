//! In-memory draft store for the game publishing flow.
//!
//! [`DraftStore`] owns exactly one [`GameDraft`]. It is mutated only through
//! named operations, and every mutation publishes the new snapshot on a
//! `tokio::sync::watch` channel so editor views can re-render. Nothing is
//! persisted; dropping the store discards the draft.

use tokio::sync::watch;

use crate::error::CoreError;
use crate::game::{self, GameDraft, GameSubmission, ImageSlot};
use crate::locale::{Locale, Localized};
use crate::types::DbId;
use crate::validation;

// ---------------------------------------------------------------------------
// Field updates
// ---------------------------------------------------------------------------

/// A single top-level draft field together with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    UserId(Option<DbId>),
    BinaryName(String),
    Title(String),
    Developer(String),
    Publisher(String),
    Engine(String),
    Website(String),
    VideoUrl(String),
    SupportsWindows(bool),
    SupportsMac(bool),
    SupportsMobile(bool),
    IsEarlyAccess(bool),
    IsReleased(bool),
    ReleasedDate(String),
    ImageUrls(Vec<String>),
}

impl DraftField {
    /// The draft key this update targets.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserId(_) => "userId",
            Self::BinaryName(_) => "gameBinaryName",
            Self::Title(_) => "gameTitle",
            Self::Developer(_) => "gameDeveloper",
            Self::Publisher(_) => "gamePublisher",
            Self::Engine(_) => "gameEngine",
            Self::Website(_) => "gameWebsite",
            Self::VideoUrl(_) => "gameVideoUrl",
            Self::SupportsWindows(_) => "gamePlatformWindows",
            Self::SupportsMac(_) => "gamePlatformMac",
            Self::SupportsMobile(_) => "gamePlatformMobile",
            Self::IsEarlyAccess(_) => "isEarlyAccess",
            Self::IsReleased(_) => "isReleased",
            Self::ReleasedDate(_) => "gameReleasedDate",
            Self::ImageUrls(_) => "gameImageUrls",
        }
    }

    fn apply(self, draft: &mut GameDraft) {
        let content = &mut draft.content;
        match self {
            Self::UserId(v) => draft.user_id = v,
            Self::BinaryName(v) => content.binary_name = v,
            Self::Title(v) => content.title = v,
            Self::Developer(v) => content.developer = v,
            Self::Publisher(v) => content.publisher = v,
            Self::Engine(v) => content.engine = v,
            Self::Website(v) => content.website = v,
            Self::VideoUrl(v) => content.video_url = v,
            Self::SupportsWindows(v) => content.supports_windows = v,
            Self::SupportsMac(v) => content.supports_mac = v,
            Self::SupportsMobile(v) => content.supports_mobile = v,
            Self::IsEarlyAccess(v) => content.is_early_access = v,
            Self::IsReleased(v) => content.is_released = v,
            Self::ReleasedDate(v) => content.released_date = v,
            Self::ImageUrls(v) => content.image_urls = v,
        }
    }
}

/// Draft fields stored once per locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalizedField {
    Genre,
    Headline,
    Description,
}

impl LocalizedField {
    pub const ALL: [LocalizedField; 3] = [Self::Genre, Self::Headline, Self::Description];

    pub fn name(self) -> &'static str {
        match self {
            Self::Genre => "gameGenre",
            Self::Headline => "gameHeadline",
            Self::Description => "gameDescription",
        }
    }

    pub fn get(self, draft: &GameDraft) -> &Localized {
        match self {
            Self::Genre => &draft.content.genre,
            Self::Headline => &draft.content.headline,
            Self::Description => &draft.content.description,
        }
    }

    fn get_mut(self, draft: &mut GameDraft) -> &mut Localized {
        match self {
            Self::Genre => &mut draft.content.genre,
            Self::Headline => &mut draft.content.headline,
            Self::Description => &mut draft.content.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Holder of the draft being published.
///
/// Share it behind an `Arc` between the editor tabs of one publishing
/// session; all operations take `&self`.
pub struct DraftStore {
    sender: watch::Sender<GameDraft>,
}

impl DraftStore {
    /// Create a store holding the initial (empty) draft.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(GameDraft::default());
        Self { sender }
    }

    /// Clone of the current draft.
    pub fn snapshot(&self) -> GameDraft {
        self.sender.borrow().clone()
    }

    /// Receive the draft after every change.
    pub fn subscribe(&self) -> watch::Receiver<GameDraft> {
        self.sender.subscribe()
    }

    /// Run `f` against the current draft without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&GameDraft) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Replace one top-level field. No validation happens here.
    pub fn update_field(&self, field: DraftField) {
        self.sender.send_modify(|draft| field.apply(draft));
    }

    /// Replace one locale of a localized field; the other locale is kept.
    pub fn update_localized_field(
        &self,
        field: LocalizedField,
        locale: Locale,
        value: impl Into<String>,
    ) {
        let value = value.into();
        self.sender
            .send_modify(|draft| field.get_mut(draft).set(locale, value));
    }

    /// Replace the whole image list. Callers compute positions first, see
    /// [`game::with_slot`] and [`game::with_gallery_image`].
    pub fn update_images(&self, urls: Vec<String>) {
        self.update_field(DraftField::ImageUrls(urls));
    }

    /// Put `uri` in a reserved image slot.
    pub fn set_image_slot(&self, slot: ImageSlot, uri: &str) {
        self.sender.send_modify(|draft| {
            draft.content.image_urls = game::with_slot(&draft.content.image_urls, slot, uri);
        });
    }

    /// Add a gallery preview in the first free gallery position.
    pub fn add_gallery_image(&self, uri: &str) {
        self.sender.send_modify(|draft| {
            draft.content.image_urls = game::with_gallery_image(&draft.content.image_urls, uri);
        });
    }

    /// Clear the gallery preview at `index` without shifting the others.
    pub fn remove_gallery_image(&self, index: usize) -> Result<(), CoreError> {
        let images = self.read(|draft| game::without_gallery_image(&draft.content.image_urls, index))?;
        self.update_images(images);
        Ok(())
    }

    /// Restore the initial draft.
    pub fn reset_form(&self) {
        self.sender.send_replace(GameDraft::default());
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Submission validation
// ---------------------------------------------------------------------------

/// Problems that keep a draft from being submitted, in form order.
///
/// An empty list means the draft is ready.
pub fn submission_problems(draft: &GameDraft) -> Vec<String> {
    let content = &draft.content;
    let mut problems = Vec::new();

    for (label, value) in [
        ("Title", &content.title),
        ("Developer", &content.developer),
        ("Binary name", &content.binary_name),
    ] {
        if let Err(e) = validation::validate_required(label, value) {
            problems.push(e.to_string());
        }
    }

    for field in LocalizedField::ALL {
        for locale in field.get(draft).missing_locales() {
            problems.push(format!("{} is missing the '{locale}' text", field.name()));
        }
    }

    for slot in ImageSlot::ALL {
        if game::slot_uri(&content.image_urls, slot).is_none() {
            problems.push(format!("{} image is required", slot.label()));
        }
    }

    if !content.has_platform() {
        problems.push("At least one platform must be selected".to_string());
    }
    if content.is_released {
        if let Err(e) = validation::validate_release_date(&content.released_date) {
            problems.push(e.to_string());
        }
    }
    if !content.website.is_empty() {
        if let Err(e) = validation::validate_http_url(&content.website) {
            problems.push(e.to_string());
        }
    }

    problems
}

impl GameDraft {
    /// Convert into the publish payload, refusing incomplete drafts.
    pub fn to_submission(&self) -> Result<GameSubmission, CoreError> {
        let problems = submission_problems(self);
        if !problems.is_empty() {
            return Err(CoreError::Validation(problems.join("; ")));
        }
        Ok(GameSubmission {
            user_id: self.user_id,
            content: self.content.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn complete_store() -> DraftStore {
        let store = DraftStore::new();
        store.update_field(DraftField::Title("별의 바다".into()));
        store.update_field(DraftField::Developer("Studio Nine".into()));
        store.update_field(DraftField::BinaryName("starsea.exe".into()));
        for field in LocalizedField::ALL {
            store.update_localized_field(field, Locale::Ko, "한국어");
            store.update_localized_field(field, Locale::En, "English");
        }
        store.update_images(vec!["p.png".into(), "b.png".into(), "i.png".into()]);
        store.update_field(DraftField::SupportsWindows(true));
        store
    }

    // -- update_field ---------------------------------------------------------

    #[test]
    fn update_field_touches_only_that_field() {
        let store = DraftStore::new();
        store.update_field(DraftField::Title("Bitmap Quest".into()));
        store.update_field(DraftField::SupportsMac(true));
        store.update_field(DraftField::Title("Bitmap Quest II".into()));

        let draft = store.snapshot();
        let mut expected = GameDraft::default();
        expected.content.title = "Bitmap Quest II".into();
        expected.content.supports_mac = true;
        assert_eq!(draft, expected);
    }

    #[test]
    fn update_field_sets_owner() {
        let store = DraftStore::new();
        store.update_field(DraftField::UserId(Some(42)));
        assert_eq!(store.snapshot().user_id, Some(42));
    }

    #[test]
    fn field_names_match_json_keys() {
        let json = serde_json::to_value(GameDraft::default()).unwrap();
        for field in [
            DraftField::UserId(None),
            DraftField::Title(String::new()),
            DraftField::SupportsMobile(false),
            DraftField::ReleasedDate(String::new()),
            DraftField::ImageUrls(vec![]),
        ] {
            assert!(json.get(field.name()).is_some(), "{}", field.name());
        }
        for field in LocalizedField::ALL {
            assert!(json.get(field.name()).is_some(), "{}", field.name());
        }
    }

    // -- update_localized_field ----------------------------------------------

    #[test]
    fn localized_update_keeps_other_locale() {
        let store = DraftStore::new();
        store.update_localized_field(LocalizedField::Genre, Locale::En, "Action");
        store.update_localized_field(LocalizedField::Genre, Locale::Ko, "액션");
        store.update_localized_field(LocalizedField::Genre, Locale::Ko, "퍼즐");

        let draft = store.snapshot();
        assert_eq!(draft.content.genre, Localized::new("퍼즐", "Action"));
        assert_eq!(draft.content.headline, Localized::default());
    }

    // -- images ---------------------------------------------------------------

    #[test]
    fn update_images_replaces_wholesale() {
        let store = DraftStore::new();
        store.update_images(vec!["a".into(), "b".into()]);
        store.update_images(vec!["c".into()]);
        assert_eq!(store.snapshot().content.image_urls, vec!["c".to_string()]);
    }

    #[test]
    fn slot_and_gallery_helpers_keep_positions() {
        let store = DraftStore::new();
        store.add_gallery_image("g1");
        store.set_image_slot(ImageSlot::Poster, "p");
        store.add_gallery_image("g2");
        store.remove_gallery_image(3).unwrap();
        store.add_gallery_image("g3");

        assert_eq!(
            store.snapshot().content.image_urls,
            vec!["p", "", "", "g3", "g2"]
        );
    }

    #[test]
    fn removing_reserved_slot_leaves_draft_unchanged() {
        let store = DraftStore::new();
        store.set_image_slot(ImageSlot::Icon, "i");
        let before = store.snapshot();
        assert_matches!(store.remove_gallery_image(2), Err(CoreError::Validation(_)));
        assert_eq!(store.snapshot(), before);
    }

    // -- reset ----------------------------------------------------------------

    #[test]
    fn reset_restores_initial_value() {
        let store = complete_store();
        store.update_field(DraftField::UserId(Some(7)));
        store.reset_form();
        assert_eq!(store.snapshot(), GameDraft::default());
    }

    // -- notification ---------------------------------------------------------

    #[test]
    fn subscribers_see_every_change() {
        let store = DraftStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.update_field(DraftField::Engine("Godot".into()));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().content.engine, "Godot");

        store.reset_form();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), GameDraft::default());
    }

    #[tokio::test]
    async fn subscriber_wakes_on_update() {
        let store = std::sync::Arc::new(DraftStore::new());
        let mut rx = store.subscribe();

        let writer = store.clone();
        tokio::spawn(async move {
            writer.update_localized_field(LocalizedField::Headline, Locale::Ko, "새 게임");
        });

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().content.headline.ko, "새 게임");
    }

    // -- submission -----------------------------------------------------------

    #[test]
    fn complete_draft_converts_to_submission() {
        let store = complete_store();
        store.update_field(DraftField::UserId(Some(3)));
        let submission = store.snapshot().to_submission().unwrap();
        assert_eq!(submission.user_id, Some(3));
        assert_eq!(submission.content.title, "별의 바다");
    }

    #[test]
    fn empty_draft_lists_every_problem() {
        let problems = submission_problems(&GameDraft::default());
        // 3 required texts, 3 fields x 2 locales, 3 images, platform.
        assert_eq!(problems.len(), 3 + 6 + 3 + 1);
        assert_matches!(
            GameDraft::default().to_submission(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn released_game_needs_valid_date() {
        let store = complete_store();
        store.update_field(DraftField::IsReleased(true));
        store.update_field(DraftField::ReleasedDate("next year".into()));
        assert_eq!(submission_problems(&store.snapshot()).len(), 1);

        store.update_field(DraftField::ReleasedDate("2025-11-04".into()));
        assert!(submission_problems(&store.snapshot()).is_empty());
    }

    #[test]
    fn website_must_be_http_when_present() {
        let store = complete_store();
        store.update_field(DraftField::Website("prodbybitmap".into()));
        assert_eq!(submission_problems(&store.snapshot()).len(), 1);
        store.update_field(DraftField::Website("https://prodbybitmap.com".into()));
        assert!(submission_problems(&store.snapshot()).is_empty());
    }
}
