//! Actix middleware shared by every route.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
