//! Bitmap-ID registration wizard: agreement, identity, confirmation.

use serde::{Deserialize, Serialize};

use super::{Availability, StepForm, Wizard, WizardStep};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitmapIdStep {
    Agreement,
    Identity,
    Confirm,
}

impl WizardStep for BitmapIdStep {
    const ORDER: &'static [Self] = &[
        BitmapIdStep::Agreement,
        BitmapIdStep::Identity,
        BitmapIdStep::Confirm,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Agreement => "Agreement",
            Self::Identity => "Bitmap ID",
            Self::Confirm => "Confirm",
        }
    }
}

pub type BitmapIdWizard = Wizard<BitmapIdStep>;

#[derive(Debug, Clone, Default)]
pub struct BitmapIdForm {
    pub agreed_to_membership_terms: bool,
    pub bitmap_id: String,
    id_check: Availability,
}

impl BitmapIdForm {
    pub fn record_id_check(&mut self, bitmap_id: &str, available: bool) {
        self.id_check = Availability::from_check(bitmap_id, available);
    }

    pub fn id_check(&self) -> &Availability {
        &self.id_check
    }

    /// Inline messages for the identity step.
    pub fn identity_errors(&self) -> Vec<String> {
        if let Err(e) = validation::validate_bitmap_id(&self.bitmap_id) {
            return vec![e.to_string()];
        }
        match &self.id_check {
            Availability::Taken(id) if *id == self.bitmap_id => {
                vec![format!("Bitmap ID '{id}' is already taken")]
            }
            check if check.confirms(&self.bitmap_id) => Vec::new(),
            _ => vec!["Bitmap ID has not been checked for availability".to_string()],
        }
    }

    pub fn to_request(&self) -> BitmapIdRequest {
        BitmapIdRequest {
            bitmap_id: self.bitmap_id.clone(),
        }
    }
}

impl StepForm<BitmapIdStep> for BitmapIdForm {
    fn step_complete(&self, step: BitmapIdStep) -> bool {
        match step {
            BitmapIdStep::Agreement => self.agreed_to_membership_terms,
            BitmapIdStep::Identity => self.identity_errors().is_empty(),
            BitmapIdStep::Confirm => {
                self.step_complete(BitmapIdStep::Agreement)
                    && self.step_complete(BitmapIdStep::Identity)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitmapIdRequest {
    pub bitmap_id: String,
}
