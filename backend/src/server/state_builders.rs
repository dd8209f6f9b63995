//! Choose port adapters for the configured backing stores.

use std::sync::Arc;

use tracing::info;

use petpals::domain::UserId;
use petpals::domain::ports::{FIXTURE_ADMIN_ID, FixtureLoginService, KeyValueStore};
use petpals::inbound::http::state::HttpStatePorts;
use petpals::outbound::memory::{
    InMemoryAdminDirectory, InMemoryAnnouncementRepository, InMemoryFavoriteRepository,
    InMemoryKeyValueStore, InMemoryNotificationPreferencesRepository, InMemoryPetRepository,
};
use petpals::outbound::persistence::{
    DbPool, DieselAdminDirectory, DieselAnnouncementRepository, DieselFavoriteRepository,
    DieselNotificationPreferencesRepository, DieselPetRepository,
};

use super::ServerConfig;

fn diesel_ports(pool: &DbPool, device_store: Arc<dyn KeyValueStore>) -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        pets: Arc::new(DieselPetRepository::new(pool.clone())),
        favorites: Arc::new(DieselFavoriteRepository::new(pool.clone())),
        device_store,
        admins: Arc::new(DieselAdminDirectory::new(pool.clone())),
        announcements: Arc::new(DieselAnnouncementRepository::new(pool.clone())),
        notifications: Arc::new(DieselNotificationPreferencesRepository::new(pool.clone())),
    }
}

/// In-memory ports. The fixture login user is the only admin.
fn in_memory_ports(device_store: Arc<dyn KeyValueStore>) -> HttpStatePorts {
    let admins = UserId::new(FIXTURE_ADMIN_ID).into_iter();
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        pets: Arc::new(InMemoryPetRepository::new()),
        favorites: Arc::new(InMemoryFavoriteRepository::new()),
        device_store,
        admins: Arc::new(InMemoryAdminDirectory::new(admins)),
        announcements: Arc::new(InMemoryAnnouncementRepository::default()),
        notifications: Arc::new(InMemoryNotificationPreferencesRepository::new()),
    }
}

pub(super) fn build_http_state_ports(config: &ServerConfig) -> HttpStatePorts {
    let device_store = config
        .device_store
        .clone()
        .unwrap_or_else(|| Arc::new(InMemoryKeyValueStore::new()));

    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL adapters");
            diesel_ports(pool, device_store)
        }
        None => {
            info!("no database configured; using in-memory adapters");
            in_memory_ports(device_store)
        }
    }
}
