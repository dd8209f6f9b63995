//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports and
//! services, so they can be exercised without real I/O.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::{
    AdminDirectory, AnnouncementRepository, FavoriteRepository, KeyValueStore, LoginService,
    NotificationPreferencesRepository, PetRepository, ScopedKeyValueStore,
};
use crate::domain::{AdminPetService, FavoritesSynchronizer, PetCatalogue, SyncError, Viewer};

/// Favourites synchroniser over the state's type-erased ports.
pub type Favorites = FavoritesSynchronizer<dyn FavoriteRepository, dyn KeyValueStore>;

/// Parameter object bundling every port implementation.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub pets: Arc<dyn PetRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    /// Shared medium for anonymous favourites, partitioned per device id.
    pub device_store: Arc<dyn KeyValueStore>,
    pub admins: Arc<dyn AdminDirectory>,
    pub announcements: Arc<dyn AnnouncementRepository>,
    pub notifications: Arc<dyn NotificationPreferencesRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub catalogue: PetCatalogue<dyn PetRepository>,
    pub admin_pets: Arc<AdminPetService<dyn PetRepository>>,
    pub admins: Arc<dyn AdminDirectory>,
    pub announcements: Arc<dyn AnnouncementRepository>,
    pub notifications: Arc<dyn NotificationPreferencesRepository>,
    favorites: Arc<dyn FavoriteRepository>,
    device_store: Arc<dyn KeyValueStore>,
}

impl HttpState {
    /// Build services over the supplied ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use petpals::domain::ports::{
    ///     FixtureAdminDirectory, FixtureAnnouncementRepository, FixtureFavoriteRepository,
    ///     FixtureLoginService, FixtureNotificationPreferencesRepository, FixturePetRepository,
    /// };
    /// use petpals::inbound::http::state::{HttpState, HttpStatePorts};
    /// use petpals::outbound::memory::InMemoryKeyValueStore;
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     pets: Arc::new(FixturePetRepository),
    ///     favorites: Arc::new(FixtureFavoriteRepository),
    ///     device_store: Arc::new(InMemoryKeyValueStore::default()),
    ///     admins: Arc::new(FixtureAdminDirectory::default()),
    ///     announcements: Arc::new(FixtureAnnouncementRepository),
    ///     notifications: Arc::new(FixtureNotificationPreferencesRepository),
    /// });
    /// let _catalogue = state.catalogue.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            pets,
            favorites,
            device_store,
            admins,
            announcements,
            notifications,
        } = ports;
        Self {
            login,
            catalogue: PetCatalogue::new(Arc::clone(&pets)),
            admin_pets: Arc::new(AdminPetService::new(pets)),
            admins,
            announcements,
            notifications,
            favorites,
            device_store,
        }
    }

    /// Load the favourite set for `viewer` on the browser `device_id`.
    pub async fn favorites_for(
        &self,
        viewer: &Viewer,
        device_id: Uuid,
    ) -> Result<Favorites, SyncError> {
        let device: Arc<dyn KeyValueStore> = Arc::new(ScopedKeyValueStore::new(
            Arc::clone(&self.device_store),
            device_id.to_string(),
        ));
        FavoritesSynchronizer::load(Arc::clone(&self.favorites), device, viewer).await
    }
}
