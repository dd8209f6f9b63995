//! PostgreSQL adapters built on Diesel, `diesel-async` and `bb8`.
//!
//! Adapters only translate between Diesel rows and domain types. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module.
//!
//! # Example
//!
//! ```ignore
//! use petpals::outbound::persistence::{DbPool, DieselPetRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/petpals")).await?;
//! let pets = DieselPetRepository::new(pool);
//! ```

mod diesel_admin_directory;
mod diesel_announcement_repository;
mod diesel_error_mapping;
mod diesel_favorite_repository;
mod diesel_notification_preferences_repository;
mod diesel_pet_repository;
mod models;
mod pool;
mod schema;

pub use diesel_admin_directory::DieselAdminDirectory;
pub use diesel_announcement_repository::DieselAnnouncementRepository;
pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_notification_preferences_repository::DieselNotificationPreferencesRepository;
pub use diesel_pet_repository::DieselPetRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
