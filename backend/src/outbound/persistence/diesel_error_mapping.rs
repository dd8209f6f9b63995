//! Shared Diesel and pool error mapping for the repositories.
//!
//! Every port error enum has `connection` and `query` constructors; these
//! helpers take those constructors so each repository maps errors the same
//! way without repeating the match.

use tracing::debug;

use super::pool::PoolError;

/// Pool failures are always connection failures.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    debug!(%error, "database pool unavailable");
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Classify a Diesel failure. Only a closed connection counts as a
/// connection failure; everything else is a query failure with a generic
/// message so database detail stays in the logs.
pub(crate) fn map_diesel_error<E>(
    error: diesel::result::Error,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced record does not exist")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            query("record violates a table constraint")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        _ => query("database error"),
    }
}
