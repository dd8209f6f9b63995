//! Driving port for credential sign-in.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Identifier returned by [`FixtureLoginService`] for the development account.
pub const FIXTURE_ADMIN_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Resolve credentials to a user, or fail with `unauthorized`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development authenticator accepting `admin` / `password` only.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() != "admin" || credentials.password() != "password" {
            return Err(Error::unauthorized("invalid credentials"));
        }
        UserId::new(FIXTURE_ADMIN_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
    }
}
