//! PetPals backend: pet listings, favourites and admin curation.
//!
//! - [`domain`]: entities, ports and the listing, favourites and admin services
//! - [`outbound`]: PostgreSQL, in-memory and file-backed port adapters
//! - [`inbound`]: the Actix Web JSON API
//! - [`settings`]: layered runtime configuration

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
