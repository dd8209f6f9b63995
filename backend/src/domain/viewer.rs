//! Explicit identity context passed into services and handlers.

use serde::Serialize;

use super::UserId;

/// Who is looking at the data.
///
/// An anonymous viewer has no `user_id` and is never an admin.
///
/// # Examples
/// ```
/// use petpals::domain::{UserId, Viewer};
///
/// assert!(!Viewer::anonymous().is_signed_in());
/// assert!(Viewer::user(UserId::random()).is_signed_in());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub user_id: Option<UserId>,
    pub is_admin: bool,
}

impl Viewer {
    /// Caller without a session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Signed-in caller without admin rights.
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            is_admin: false,
        }
    }

    /// Signed-in caller listed in the admin directory.
    pub fn admin(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            is_admin: true,
        }
    }

    /// `true` when a user id is present.
    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }
}
