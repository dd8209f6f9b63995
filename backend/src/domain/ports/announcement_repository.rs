//! Port for reading announcements.

use async_trait::async_trait;

use crate::domain::Announcement;

use super::define_port_error;

define_port_error! {
    /// Errors raised by announcement repository adapters.
    pub enum AnnouncementRepositoryError {
        Connection { message: String } =>
            "announcement repository connection failed: {message}",
        Query { message: String } =>
            "announcement repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Announcements, newest first.
    async fn list_recent(&self) -> Result<Vec<Announcement>, AnnouncementRepositoryError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnnouncementRepository;

#[async_trait]
impl AnnouncementRepository for FixtureAnnouncementRepository {
    async fn list_recent(&self) -> Result<Vec<Announcement>, AnnouncementRepositoryError> {
        Ok(Vec::new())
    }
}
