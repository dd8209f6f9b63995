//! Per-user notification settings.

use serde::Serialize;

use super::UserId;

/// Whether the user wants to hear about newly listed pets.
///
/// A user with no stored row is treated as opted out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub user_id: UserId,
    pub notify_new_pets: bool,
}

impl NotificationPreferences {
    /// Settings for a user who never saved any.
    pub fn disabled(user_id: UserId) -> Self {
        Self {
            user_id,
            notify_new_pets: false,
        }
    }
}
