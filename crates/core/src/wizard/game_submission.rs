//! Game submission wizard over the localized publishing draft.
//!
//! The form is the [`GameDraft`] held by the draft store; each step checks
//! the part of the draft its editor tab fills in.

use serde::{Deserialize, Serialize};

use super::{StepForm, Wizard, WizardStep};
use crate::draft::{submission_problems, LocalizedField};
use crate::game::{self, GameDraft, ImageSlot};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameSubmissionStep {
    Basics,
    Localization,
    Media,
    Release,
    Review,
}

impl WizardStep for GameSubmissionStep {
    const ORDER: &'static [Self] = &[
        GameSubmissionStep::Basics,
        GameSubmissionStep::Localization,
        GameSubmissionStep::Media,
        GameSubmissionStep::Release,
        GameSubmissionStep::Review,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Basics => "Basic Information",
            Self::Localization => "Store Page Text",
            Self::Media => "Images",
            Self::Release => "Release",
            Self::Review => "Review",
        }
    }
}

pub type GameSubmissionWizard = Wizard<GameSubmissionStep>;

fn basics_complete(draft: &GameDraft) -> bool {
    let content = &draft.content;
    [&content.title, &content.developer, &content.binary_name]
        .iter()
        .all(|v| !v.trim().is_empty())
}

fn localization_complete(draft: &GameDraft) -> bool {
    LocalizedField::ALL
        .iter()
        .all(|field| field.get(draft).is_complete())
}

fn media_complete(draft: &GameDraft) -> bool {
    ImageSlot::ALL
        .iter()
        .all(|slot| game::slot_uri(&draft.content.image_urls, *slot).is_some())
}

fn release_complete(draft: &GameDraft) -> bool {
    let content = &draft.content;
    content.has_platform()
        && (!content.is_released || validation::validate_release_date(&content.released_date).is_ok())
        && (content.website.is_empty() || validation::validate_http_url(&content.website).is_ok())
}

impl StepForm<GameSubmissionStep> for GameDraft {
    fn step_complete(&self, step: GameSubmissionStep) -> bool {
        match step {
            GameSubmissionStep::Basics => basics_complete(self),
            GameSubmissionStep::Localization => localization_complete(self),
            GameSubmissionStep::Media => media_complete(self),
            GameSubmissionStep::Release => release_complete(self),
            GameSubmissionStep::Review => submission_problems(self).is_empty(),
        }
    }
}
