//! sendit-core: the database-free half of the Send-IT data layer.
//!
//! Holds schema descriptions for the application's tables and turns
//! high-level read/write requests into SQL text plus an ordered list of
//! bind values. Nothing in this crate touches a connection; execution
//! lives in `sendit-db`.

pub mod entities;
pub mod error;
pub mod filter;
pub mod query;
pub mod record;
pub mod schema;

pub use error::QueryError;
pub use filter::Filter;
pub use query::{BindValue, Query};
pub use record::{record_from, Record};
pub use schema::{AttrType, Attribute, Schema, SchemaBuilder};

/// Result type alias for sendit-core operations
pub type Result<T> = std::result::Result<T, QueryError>;
