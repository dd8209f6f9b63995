//! Inbound adapters that translate external requests into domain calls.
//!
//! The only transport is HTTP, under [`http`].

pub mod http;
