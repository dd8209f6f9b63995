//! Port for per-user notification settings.

use async_trait::async_trait;

use crate::domain::{NotificationPreferences, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification preference adapters.
    pub enum NotificationPreferencesRepositoryError {
        Connection { message: String } =>
            "notification preferences connection failed: {message}",
        Query { message: String } =>
            "notification preferences query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPreferencesRepository: Send + Sync {
    /// `None` when the user never saved settings.
    async fn find(
        &self,
        user_id: &UserId,
    ) -> Result<Option<NotificationPreferences>, NotificationPreferencesRepositoryError>;

    /// Insert or replace the user's settings.
    async fn save(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<(), NotificationPreferencesRepositoryError>;
}

/// Repository that never remembers anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationPreferencesRepository;

#[async_trait]
impl NotificationPreferencesRepository for FixtureNotificationPreferencesRepository {
    async fn find(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<NotificationPreferences>, NotificationPreferencesRepositoryError> {
        Ok(None)
    }

    async fn save(
        &self,
        _preferences: &NotificationPreferences,
    ) -> Result<(), NotificationPreferencesRepositoryError> {
        Ok(())
    }
}
