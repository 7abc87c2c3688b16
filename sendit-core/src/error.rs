/// Structured error types for sendit-core.
///
/// Uses `thiserror` so callers (and `sendit-db` on top) get composable,
/// matchable errors instead of strings.
use thiserror::Error;

/// Errors raised while constructing a query, before any I/O happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A strict lookup referenced a column the schema does not declare.
    #[error("unknown attribute '{attribute}' on table '{table}'")]
    UnknownAttribute { table: String, attribute: String },

    /// A write payload filtered down to zero known attributes.
    #[error("no valid fields for table '{table}'")]
    NoValidFields { table: String },

    /// A value cannot be bound under the attribute's declared type.
    #[error("value for attribute '{attribute}' is not bindable as {expected}")]
    IncompatibleValue {
        attribute: String,
        expected: &'static str,
    },

    /// A table or attribute name failed identifier validation at
    /// schema-construction time.
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),
}

impl QueryError {
    pub fn unknown_attribute(table: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            table: table.into(),
            attribute: attribute.into(),
        }
    }

    pub fn no_valid_fields(table: impl Into<String>) -> Self {
        Self::NoValidFields {
            table: table.into(),
        }
    }

    pub fn incompatible_value(attribute: impl Into<String>, expected: &'static str) -> Self {
        Self::IncompatibleValue {
            attribute: attribute.into(),
            expected,
        }
    }
}
