//! Process-local adapters for every domain port.
//!
//! Used when no database is configured and by integration tests. State lives
//! behind `tokio` locks and is lost on restart.

mod directory;
mod favorites;
mod key_value_store;
mod pets;

pub use directory::{
    InMemoryAdminDirectory, InMemoryAnnouncementRepository,
    InMemoryNotificationPreferencesRepository,
};
pub use favorites::InMemoryFavoriteRepository;
pub use key_value_store::InMemoryKeyValueStore;
pub use pets::InMemoryPetRepository;
