//! Error types for sendit-db.
//!
//! Failures surface as values in their own channel; a failed call never
//! yields anything shaped like rows. The HTTP layer above maps these kinds
//! to status codes.

use sendit_core::QueryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// Reaching or authenticating to the database failed.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// The database rejected the write (unique, foreign-key, not-null, ...).
    #[error("constraint violation ({code}): {message}")]
    Constraint { code: String, message: String },

    /// The query could not be constructed in the first place.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Anything else the driver reports.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                // Postgres class 23 covers integrity constraint violations
                let is_constraint = db
                    .code()
                    .map(|code| code.starts_with("23"))
                    .unwrap_or(false);
                if is_constraint {
                    DbError::Constraint {
                        code: db.code().map(|c| c.into_owned()).unwrap_or_default(),
                        message: db.message().to_owned(),
                    }
                } else {
                    DbError::Database(sqlx::Error::Database(db))
                }
            }
            e @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed) => DbError::Connection(e),
            other => DbError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_pass_through() {
        let err: DbError = QueryError::no_valid_fields("parcels").into();
        assert!(matches!(err, DbError::Query(QueryError::NoValidFields { .. })));
        assert!(err.to_string().contains("parcels"));
    }

    #[test]
    fn pool_timeout_maps_to_connection() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[test]
    fn row_not_found_maps_to_database() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::Database(_)));
    }
}
