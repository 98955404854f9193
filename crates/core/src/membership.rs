//! Membership status rules for the apply / leave / approve workflow.
//!
//! The server is authoritative; these checks let the client disable
//! actions that would be refused anyway.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Membership state of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    #[default]
    None,
    Pending,
    Approved,
    Rejected,
}

impl MembershipStatus {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "none" => Ok(Self::None),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid membership status '{s}'. Must be one of: none, pending, approved, rejected"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A membership application as listed in the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipApplication {
    pub user_id: DbId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub bitmap_id: Option<String>,
    #[serde(default)]
    pub message: String,
    pub status: MembershipStatus,
    #[serde(default)]
    pub applied_at: Option<Timestamp>,
}

/// Applying is allowed for non-members and after a rejection.
pub fn can_apply(status: MembershipStatus) -> Result<(), CoreError> {
    match status {
        MembershipStatus::None | MembershipStatus::Rejected => Ok(()),
        other => Err(CoreError::InvalidTransition(format!(
            "Cannot apply for membership while status is '{}'",
            other.as_str()
        ))),
    }
}

/// Leaving withdraws a pending application or ends an approved membership.
pub fn can_leave(status: MembershipStatus) -> Result<(), CoreError> {
    match status {
        MembershipStatus::Pending | MembershipStatus::Approved => Ok(()),
        other => Err(CoreError::InvalidTransition(format!(
            "Cannot leave membership while status is '{}'",
            other.as_str()
        ))),
    }
}

/// Admin approval or rejection applies only to pending applications.
pub fn can_review(status: MembershipStatus) -> Result<(), CoreError> {
    if status != MembershipStatus::Pending {
        return Err(CoreError::InvalidTransition(format!(
            "Only pending applications can be reviewed (status is '{}')",
            status.as_str()
        )));
    }
    Ok(())
}

/// The application of `user_id` in an admin listing.
pub fn find_application(
    applications: &[MembershipApplication],
    user_id: DbId,
) -> Result<&MembershipApplication, CoreError> {
    applications
        .iter()
        .find(|app| app.user_id == user_id)
        .ok_or_else(|| {
            CoreError::NotFound(format!("No membership application from user {user_id}"))
        })
}

/// Status after a successful action.
pub fn status_after_apply() -> MembershipStatus {
    MembershipStatus::Pending
}

pub fn status_after_leave() -> MembershipStatus {
    MembershipStatus::None
}

pub fn status_after_review(approved: bool) -> MembershipStatus {
    if approved {
        MembershipStatus::Approved
    } else {
        MembershipStatus::Rejected
    }
}
