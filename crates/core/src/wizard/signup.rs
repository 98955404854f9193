//! Account signup wizard: terms, credentials, profile, confirmation.

use serde::{Deserialize, Serialize};

use super::{Availability, StepForm, Wizard, WizardStep};
use crate::validation;

/// Steps of the signup wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStep {
    Terms,
    Credentials,
    Profile,
    Confirm,
}

impl WizardStep for SignupStep {
    const ORDER: &'static [Self] = &[
        SignupStep::Terms,
        SignupStep::Credentials,
        SignupStep::Profile,
        SignupStep::Confirm,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Terms => "Terms",
            Self::Credentials => "Credentials",
            Self::Profile => "Profile",
            Self::Confirm => "Confirm",
        }
    }
}

pub type SignupWizard = Wizard<SignupStep>;

/// Everything the user enters while signing up.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub agreed_to_terms: bool,
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
    pub nickname: String,
    pub bio: String,
    email_check: Availability,
}

impl SignupForm {
    /// Store the result of the duplicate-email check for `email`.
    pub fn record_email_check(&mut self, email: &str, available: bool) {
        self.email_check = Availability::from_check(email, available);
    }

    pub fn email_check(&self) -> &Availability {
        &self.email_check
    }

    /// `true` if the current email was checked and is free.
    pub fn email_confirmed_available(&self) -> bool {
        self.email_check.confirms(&self.email)
    }

    /// Inline messages for the credentials step, empty when it is complete.
    pub fn credential_errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = [
            validation::validate_email(&self.email),
            validation::validate_username(&self.username),
            validation::validate_password(&self.password),
            validation::validate_password_confirmation(&self.password, &self.password_confirmation),
        ]
        .into_iter()
        .filter_map(|r| r.err().map(|e| e.to_string()))
        .collect();

        match &self.email_check {
            Availability::Taken(email) if *email == self.email => {
                errors.push(format!("'{email}' is already registered"));
            }
            _ if !self.email_confirmed_available() => {
                errors.push("Email has not been checked for duplicates".to_string());
            }
            _ => {}
        }
        errors
    }

    /// Inline messages for the profile step, empty when it is complete.
    pub fn profile_errors(&self) -> Vec<String> {
        [
            validation::validate_nickname(&self.nickname),
            validation::validate_bio(&self.bio),
        ]
        .into_iter()
        .filter_map(|r| r.err().map(|e| e.to_string()))
        .collect()
    }

    /// Build the request body sent to the signup endpoint.
    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            nickname: self.nickname.trim().to_string(),
            bio: self.bio.clone(),
            agreed_to_terms: self.agreed_to_terms,
        }
    }
}

impl StepForm<SignupStep> for SignupForm {
    fn step_complete(&self, step: SignupStep) -> bool {
        match step {
            SignupStep::Terms => self.agreed_to_terms,
            SignupStep::Credentials => self.credential_errors().is_empty(),
            SignupStep::Profile => self.profile_errors().is_empty(),
            SignupStep::Confirm => {
                self.step_complete(SignupStep::Terms)
                    && self.step_complete(SignupStep::Credentials)
                    && self.step_complete(SignupStep::Profile)
            }
        }
    }
}

/// Body of the signup request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub nickname: String,
    pub bio: String,
    pub agreed_to_terms: bool,
}
