//! In-memory admin directory, announcements and notification settings.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    AdminDirectory, AdminDirectoryError, AnnouncementRepository, AnnouncementRepositoryError,
    NotificationPreferencesRepository, NotificationPreferencesRepositoryError,
};
use crate::domain::{Announcement, NotificationPreferences, UserId};

#[derive(Debug, Default)]
pub struct InMemoryAdminDirectory {
    admins: RwLock<HashSet<UserId>>,
}

impl InMemoryAdminDirectory {
    pub fn new(admins: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            admins: RwLock::new(admins.into_iter().collect()),
        }
    }

    pub async fn grant(&self, user_id: UserId) {
        self.admins.write().await.insert(user_id);
    }
}

#[async_trait]
impl AdminDirectory for InMemoryAdminDirectory {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, AdminDirectoryError> {
        Ok(self.admins.read().await.contains(user_id))
    }
}

/// Announcements held newest first.
#[derive(Debug, Default)]
pub struct InMemoryAnnouncementRepository {
    announcements: RwLock<Vec<Announcement>>,
}

impl InMemoryAnnouncementRepository {
    pub fn new(announcements: impl IntoIterator<Item = Announcement>) -> Self {
        let mut announcements: Vec<_> = announcements.into_iter().collect();
        announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self {
            announcements: RwLock::new(announcements),
        }
    }
}

#[async_trait]
impl AnnouncementRepository for InMemoryAnnouncementRepository {
    async fn list_recent(&self) -> Result<Vec<Announcement>, AnnouncementRepositoryError> {
        Ok(self.announcements.read().await.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryNotificationPreferencesRepository {
    rows: RwLock<HashMap<UserId, NotificationPreferences>>,
}

impl InMemoryNotificationPreferencesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationPreferencesRepository for InMemoryNotificationPreferencesRepository {
    async fn find(
        &self,
        user_id: &UserId,
    ) -> Result<Option<NotificationPreferences>, NotificationPreferencesRepositoryError> {
        Ok(self.rows.read().await.get(user_id).cloned())
    }

    async fn save(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<(), NotificationPreferencesRepositoryError> {
        self.rows
            .write()
            .await
            .insert(preferences.user_id.clone(), preferences.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[tokio::test]
    async fn granted_users_become_admins() {
        let directory = InMemoryAdminDirectory::default();
        let user = UserId::random();
        assert!(!directory.is_admin(&user).await.expect("lookup"));

        directory.grant(user.clone()).await;
        assert!(directory.is_admin(&user).await.expect("lookup"));
    }

    #[tokio::test]
    async fn announcements_are_listed_newest_first() {
        let now = Utc::now();
        let older = Announcement {
            id: Uuid::new_v4(),
            title: "Older".into(),
            body: "first".into(),
            created_at: now - Duration::days(1),
        };
        let newer = Announcement {
            id: Uuid::new_v4(),
            title: "Newer".into(),
            body: "second".into(),
            created_at: now,
        };

        let repo = InMemoryAnnouncementRepository::new([older, newer]);
        let titles: Vec<_> = repo
            .list_recent()
            .await
            .expect("list")
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, ["Newer", "Older"]);
    }

    #[tokio::test]
    async fn saved_preferences_replace_previous_values() {
        let repo = InMemoryNotificationPreferencesRepository::new();
        let user = UserId::random();
        assert!(repo.find(&user).await.expect("find").is_none());

        let mut prefs = NotificationPreferences::disabled(user.clone());
        prefs.notify_new_pets = true;
        repo.save(&prefs).await.expect("save");
        repo.save(&NotificationPreferences::disabled(user.clone()))
            .await
            .expect("save");

        let stored = repo.find(&user).await.expect("find").expect("present");
        assert!(!stored.notify_new_pets);
    }
}
