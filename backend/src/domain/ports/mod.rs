//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_directory;
mod announcement_repository;
mod favorite_repository;
mod key_value_store;
mod login_service;
mod notification_preferences_repository;
mod pet_repository;

#[cfg(test)]
pub use admin_directory::MockAdminDirectory;
pub use admin_directory::{AdminDirectory, AdminDirectoryError, FixtureAdminDirectory};
#[cfg(test)]
pub use announcement_repository::MockAnnouncementRepository;
pub use announcement_repository::{
    AnnouncementRepository, AnnouncementRepositoryError, FixtureAnnouncementRepository,
};
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{
    FavoriteRepository, FavoriteRepositoryError, FixtureFavoriteRepository,
};
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{
    KeyValueStore, KeyValueStoreError, ScopedKeyValueStore, validate_key,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_ADMIN_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use notification_preferences_repository::MockNotificationPreferencesRepository;
pub use notification_preferences_repository::{
    FixtureNotificationPreferencesRepository, NotificationPreferencesRepository,
    NotificationPreferencesRepositoryError,
};
#[cfg(test)]
pub use pet_repository::MockPetRepository;
pub use pet_repository::{FixturePetRepository, PetRepository, PetRepositoryError};
