//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use petpals::domain::ports::KeyValueStore;
use petpals::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) device_store: Option<Arc<dyn KeyValueStore>>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            device_store: None,
        }
    }

    /// Use PostgreSQL adapters instead of the in-memory ones.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Persist device-local state through `store`.
    #[must_use]
    pub fn with_device_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.device_store = Some(store);
        self
    }
}
