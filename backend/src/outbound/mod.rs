//! Adapters implementing the domain ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel
//! - **memory**: process-local repositories for database-less runs and tests
//! - **file_store**: directory-backed device storage
//!
//! Adapters translate between domain types and their backing store and hold
//! no business rules.

pub mod file_store;
pub mod memory;
pub mod persistence;
