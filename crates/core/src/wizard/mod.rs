//! Multi-step form wizards as explicit state machines.
//!
//! A wizard is a fixed sequence of named steps. [`Wizard::next`] moves one
//! step forward only when the form reports the current step complete,
//! [`Wizard::back`] moves one step back unconditionally, and there is no
//! way to skip ahead. The last step ends in a single submission guarded by
//! [`SubmitGuard`]: a second submission is refused unless the previous one
//! failed.

pub mod bitmap_id;
pub mod game_submission;
pub mod signup;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Steps and transitions
// ---------------------------------------------------------------------------

/// User actions that move a wizard between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardAction {
    Next,
    Back,
}

/// A step enum with a fixed order.
pub trait WizardStep: Copy + Eq + Debug + 'static {
    /// Every step, first to last.
    const ORDER: &'static [Self];

    /// Human-readable label for the step.
    fn label(self) -> &'static str;

    /// Zero-based position in [`Self::ORDER`].
    fn number(self) -> usize {
        Self::ORDER
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    fn first() -> Self {
        Self::ORDER[0]
    }

    fn is_terminal(self) -> bool {
        self.number() + 1 == Self::ORDER.len()
    }
}

/// Completeness predicate a form provides for each step.
pub trait StepForm<S: WizardStep> {
    fn step_complete(&self, step: S) -> bool;
}

/// The transition table shared by every wizard.
///
/// `Next` requires the gate to be open and a following step to exist;
/// `Back` requires a preceding step.
pub fn transition<S: WizardStep>(
    current: S,
    action: WizardAction,
    gate_open: bool,
) -> Result<S, CoreError> {
    let index = current.number();
    match action {
        WizardAction::Next => {
            if current.is_terminal() {
                return Err(CoreError::InvalidTransition(format!(
                    "'{}' is the final step",
                    current.label()
                )));
            }
            if !gate_open {
                return Err(CoreError::InvalidTransition(format!(
                    "Step '{}' is not complete",
                    current.label()
                )));
            }
            Ok(S::ORDER[index + 1])
        }
        WizardAction::Back => {
            if index == 0 {
                return Err(CoreError::InvalidTransition(format!(
                    "'{}' is the first step",
                    current.label()
                )));
            }
            Ok(S::ORDER[index - 1])
        }
    }
}

// ---------------------------------------------------------------------------
// Submission guard
// ---------------------------------------------------------------------------

/// Outcome of the terminal submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    /// Carries the inline message shown to the user.
    Failed(String),
}

/// Allows exactly one submission at a time and none after success.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    state: SubmitState,
    attempts: u32,
}

impl SubmitGuard {
    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Number of submissions started so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Claim the right to submit. Retrying after a failure is allowed.
    pub fn begin(&mut self) -> Result<(), CoreError> {
        match self.state {
            SubmitState::Idle | SubmitState::Failed(_) => {
                self.state = SubmitState::InFlight;
                self.attempts += 1;
                Ok(())
            }
            SubmitState::InFlight => Err(CoreError::Conflict(
                "A submission is already in progress".to_string(),
            )),
            SubmitState::Succeeded => {
                Err(CoreError::Conflict("Already submitted".to_string()))
            }
        }
    }

    pub fn succeed(&mut self) {
        self.state = SubmitState::Succeeded;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = SubmitState::Failed(message.into());
    }

    /// Message of the last failed attempt.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SubmitState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// Step position plus submission state of one wizard run.
///
/// The form data lives with the caller and is passed in whenever a gate
/// must be evaluated.
#[derive(Debug, Clone)]
pub struct Wizard<S: WizardStep> {
    step: S,
    submit: SubmitGuard,
}

impl<S: WizardStep> Wizard<S> {
    pub fn new() -> Self {
        Self {
            step: S::first(),
            submit: SubmitGuard::default(),
        }
    }

    pub fn step(&self) -> S {
        self.step
    }

    pub fn can_advance<F: StepForm<S> + ?Sized>(&self, form: &F) -> bool {
        !self.step.is_terminal() && form.step_complete(self.step)
    }

    /// Advance one step if the current one is complete. On rejection the
    /// step is unchanged.
    pub fn next<F: StepForm<S> + ?Sized>(&mut self, form: &F) -> Result<S, CoreError> {
        self.step = transition(self.step, WizardAction::Next, form.step_complete(self.step))?;
        Ok(self.step)
    }

    /// Go back one step, regardless of what has been entered.
    pub fn back(&mut self) -> Result<S, CoreError> {
        self.step = transition(self.step, WizardAction::Back, true)?;
        Ok(self.step)
    }

    pub fn submit_state(&self) -> &SubmitState {
        self.submit.state()
    }

    pub fn submit_attempts(&self) -> u32 {
        self.submit.attempts()
    }

    /// Claim the terminal submission.
    ///
    /// Requires the final step, a complete form and no submission in flight
    /// or already succeeded.
    pub fn begin_submit<F: StepForm<S> + ?Sized>(&mut self, form: &F) -> Result<(), CoreError> {
        if !self.step.is_terminal() {
            return Err(CoreError::InvalidTransition(format!(
                "Cannot submit from step '{}'",
                self.step.label()
            )));
        }
        if !form.step_complete(self.step) {
            return Err(CoreError::Validation(format!(
                "Step '{}' is not complete",
                self.step.label()
            )));
        }
        self.submit.begin()
    }

    /// Record the result of the submission started by
    /// [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(&mut self, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => self.submit.succeed(),
            Err(message) => self.submit.fail(message),
        }
    }
}

impl<S: WizardStep> Default for Wizard<S> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Availability checks
// ---------------------------------------------------------------------------

/// Result of a server-side duplicate check for a specific value.
///
/// The check only vouches for the exact value it was run against; editing
/// the field makes it stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    Unchecked,
    Available(String),
    Taken(String),
}

impl Availability {
    pub fn from_check(value: &str, available: bool) -> Self {
        if available {
            Self::Available(value.to_string())
        } else {
            Self::Taken(value.to_string())
        }
    }

    /// `true` if `value` itself was checked and found available.
    pub fn confirms(&self, value: &str) -> bool {
        matches!(self, Self::Available(checked) if checked == value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
