//! Shared translation of pool and Diesel failures into port errors.
//!
//! Both catalogue repositories expose `Connection` and `Query` variants, so
//! the mapping is written once against constructor closures.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto the repository's connection variant.
pub(crate) fn map_pool_error<E>(error: &PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.message().to_owned())
}

/// Map a Diesel failure onto the repository's query or connection variant.
///
/// Driver messages are logged at debug level and replaced with generic
/// text so SQL details never reach validation responses.
pub(crate) fn map_diesel_error<E>(
    error: &DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "catalogue query failed");
        }
        other => debug!(error = %other, "catalogue query failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        _ => query("database error"),
    }
}
