//! sendit-db: executes the queries `sendit-core` builds.
//!
//! One [`RecordAccessor`] per entity, all sharing a `sqlx` Postgres pool.
//! Accessors hold no per-request state; filters arrive as arguments, so a
//! pool-sized number of concurrent requests can use the same accessor
//! freely.

pub mod accessor;
pub mod error;
pub mod migrations;
pub mod pool;

pub use accessor::RecordAccessor;
pub use error::DbError;
pub use pool::create_pool;

/// Result type alias for sendit-db operations
pub type Result<T> = std::result::Result<T, DbError>;
