//! Port answering "is this user an administrator?".

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by admin directory adapters.
    pub enum AdminDirectoryError {
        Connection { message: String } =>
            "admin directory connection failed: {message}",
        Query { message: String } =>
            "admin directory query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, AdminDirectoryError>;
}

/// Directory that grants admin rights to a fixed set of users.
#[derive(Debug, Default, Clone)]
pub struct FixtureAdminDirectory {
    admins: Vec<UserId>,
}

impl FixtureAdminDirectory {
    pub fn new(admins: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }
}

#[async_trait]
impl AdminDirectory for FixtureAdminDirectory {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, AdminDirectoryError> {
        Ok(self.admins.contains(user_id))
    }
}
