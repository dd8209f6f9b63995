//! Domain entities, value objects, ports and services.
//!
//! Purpose: keep the pet listing rules independent of HTTP and storage.
//! Inbound adapters call the services below; outbound adapters implement the
//! traits in [`ports`].
//!
//! Public surface:
//! - [`Pet`], [`PetDraft`], [`PetFilter`], [`PetQuery`]: listing data and the
//!   typed query adapters execute.
//! - [`PetCatalogue`], [`PetListing`]: read-side services.
//! - [`FavoritesSynchronizer`]: favourite set for a [`Viewer`].
//! - [`AdminPetService`]: CRUD with re-list after every mutation.
//! - [`Error`]: transport-agnostic error payload.

pub mod admin_pets;
pub mod announcement;
pub mod auth;
pub mod error;
pub mod favorites;
pub mod notification_preferences;
pub mod pet;
pub mod pet_catalogue;
pub mod pet_filter;
pub mod pet_listing;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod viewer;

pub use self::admin_pets::{AdminPetService, RepositoryError};
pub use self::announcement::Announcement;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::favorites::{DEVICE_FAVORITES_KEY, FavoritesSynchronizer, SyncError};
pub use self::notification_preferences::NotificationPreferences;
pub use self::pet::{
    AgeUnit, ContactPhone, ParsePetAttributeError, Pet, PetDraft, PetDraftInput,
    PetDraftValidationError, PetId, Species,
};
pub use self::pet_catalogue::{PetCatalogue, QueryError};
pub use self::pet_filter::{AgeRange, PetFilter, PetOrder, PetPredicate, PetQuery};
pub use self::pet_listing::{ListingSnapshot, PetListing};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserValidationError};
pub use self::viewer::Viewer;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use petpals::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
