//! Game records exchanged with the storefront API and the image slot
//! conventions shared by the publishing flow.
//!
//! The image list of a game is positional: index 0 is the poster, 1 the
//! list banner, 2 the icon and everything from [`GALLERY_START`] on is a
//! gallery preview. Unfilled positions hold an empty string so that later
//! entries never shift.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::locale::Localized;
use crate::types::{DbId, Timestamp};

/// Id carried by a draft before the backend assigns a real one.
pub const PROVISIONAL_GAME_ID: DbId = 0;

/// First image index used for gallery previews.
pub const GALLERY_START: usize = 3;

// ---------------------------------------------------------------------------
// Game content
// ---------------------------------------------------------------------------

/// Descriptive content of a game listing, shared by drafts, submissions
/// and published games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContent {
    #[serde(rename = "gameBinaryName", default)]
    pub binary_name: String,
    #[serde(rename = "gameTitle", default)]
    pub title: String,
    #[serde(rename = "gameDeveloper", default)]
    pub developer: String,
    #[serde(rename = "gamePublisher", default)]
    pub publisher: String,
    #[serde(rename = "gameEngine", default)]
    pub engine: String,
    #[serde(rename = "gameWebsite", default)]
    pub website: String,
    #[serde(rename = "gameVideoUrl", default)]
    pub video_url: String,
    #[serde(rename = "gamePlatformWindows", default)]
    pub supports_windows: bool,
    #[serde(rename = "gamePlatformMac", default)]
    pub supports_mac: bool,
    #[serde(rename = "gamePlatformMobile", default)]
    pub supports_mobile: bool,
    #[serde(rename = "isEarlyAccess", default)]
    pub is_early_access: bool,
    #[serde(rename = "isReleased", default)]
    pub is_released: bool,
    /// ISO `YYYY-MM-DD`, empty while unknown.
    #[serde(rename = "gameReleasedDate", default)]
    pub released_date: String,
    #[serde(rename = "gameGenre", default)]
    pub genre: Localized,
    #[serde(rename = "gameHeadline", default)]
    pub headline: Localized,
    #[serde(rename = "gameDescription", default)]
    pub description: Localized,
    #[serde(rename = "gameImageUrls", default)]
    pub image_urls: Vec<String>,
}

impl GameContent {
    /// `true` if any platform flag is set.
    pub fn has_platform(&self) -> bool {
        self.supports_windows || self.supports_mac || self.supports_mobile
    }
}

// ---------------------------------------------------------------------------
// Published game
// ---------------------------------------------------------------------------

/// Review status of a submitted game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl GameStatus {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid game status '{s}'. Must be one of: pending, approved, rejected"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A game as returned by the storefront API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "gameId")]
    pub id: DbId,
    #[serde(rename = "userId", default)]
    pub user_id: Option<DbId>,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Timestamp>,
    #[serde(flatten)]
    pub content: GameContent,
}

impl Game {
    pub fn poster(&self) -> Option<&str> {
        slot_uri(&self.content.image_urls, ImageSlot::Poster)
    }

    pub fn icon(&self) -> Option<&str> {
        slot_uri(&self.content.image_urls, ImageSlot::Icon)
    }
}

// ---------------------------------------------------------------------------
// Draft and submission
// ---------------------------------------------------------------------------

/// The not-yet-submitted listing edited by the publishing flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDraft {
    #[serde(rename = "gameId")]
    pub id: DbId,
    #[serde(rename = "userId", default)]
    pub user_id: Option<DbId>,
    #[serde(flatten)]
    pub content: GameContent,
}

impl Default for GameDraft {
    fn default() -> Self {
        Self {
            id: PROVISIONAL_GAME_ID,
            user_id: None,
            content: GameContent::default(),
        }
    }
}

/// Payload sent to the API when a draft is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSubmission {
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<DbId>,
    #[serde(flatten)]
    pub content: GameContent,
}

// ---------------------------------------------------------------------------
// Image slots
// ---------------------------------------------------------------------------

/// Image positions with a fixed meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    Poster,
    ListBanner,
    Icon,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 3] = [Self::Poster, Self::ListBanner, Self::Icon];

    pub fn index(self) -> usize {
        match self {
            Self::Poster => 0,
            Self::ListBanner => 1,
            Self::Icon => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Poster => "Poster",
            Self::ListBanner => "List Banner",
            Self::Icon => "Icon",
        }
    }
}

/// URI stored in a reserved slot, if filled.
pub fn slot_uri(images: &[String], slot: ImageSlot) -> Option<&str> {
    images
        .get(slot.index())
        .map(String::as_str)
        .filter(|uri| !uri.is_empty())
}

/// Filled gallery previews in display order.
pub fn gallery(images: &[String]) -> impl Iterator<Item = &str> {
    images
        .iter()
        .skip(GALLERY_START)
        .map(String::as_str)
        .filter(|uri| !uri.is_empty())
}

/// Return a copy of `images` with `uri` placed in a reserved slot.
///
/// Missing positions before the slot are padded with placeholders.
pub fn with_slot(images: &[String], slot: ImageSlot, uri: &str) -> Vec<String> {
    let mut next = images.to_vec();
    let index = slot.index();
    if next.len() <= index {
        next.resize(index + 1, String::new());
    }
    next[index] = uri.to_string();
    next
}

/// Return a copy of `images` with a gallery preview added.
///
/// The preview takes the first empty position at or after
/// [`GALLERY_START`]; if there is none it is appended.
pub fn with_gallery_image(images: &[String], uri: &str) -> Vec<String> {
    let mut next = images.to_vec();
    if next.len() < GALLERY_START {
        next.resize(GALLERY_START, String::new());
    }
    match next
        .iter()
        .skip(GALLERY_START)
        .position(String::is_empty)
    {
        Some(offset) => next[GALLERY_START + offset] = uri.to_string(),
        None => next.push(uri.to_string()),
    }
    next
}

/// Return a copy of `images` with the gallery preview at `index` cleared.
///
/// The position becomes a placeholder; nothing after it moves.
pub fn without_gallery_image(images: &[String], index: usize) -> Result<Vec<String>, CoreError> {
    if index < GALLERY_START {
        return Err(CoreError::Validation(format!(
            "Image index {index} is a reserved slot, not a gallery preview"
        )));
    }
    if index >= images.len() {
        return Err(CoreError::Validation(format!(
            "Image index {index} is out of range (len {})",
            images.len()
        )));
    }
    let mut next = images.to_vec();
    next[index] = String::new();
    Ok(next)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
