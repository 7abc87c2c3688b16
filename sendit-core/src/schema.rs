//! Static table descriptions.
//!
//! A [`Schema`] names one table and its ordered, typed column list. It is
//! the single source of truth for which attributes a query may mention:
//! anything not declared here never reaches SQL text. Schemas are immutable
//! once built; construction goes through [`SchemaBuilder`] so identifier
//! validation happens exactly once.

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Column type as far as value binding is concerned.
///
/// The layer distinguishes exactly two shapes: integer columns bind as
/// numeric parameters, everything else binds as text. This dichotomy is
/// deliberate and matches the existing application schemas; it is not the
/// start of a type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    Integer,
    Text,
}

/// One named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    ty: AttrType,
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> AttrType {
        self.ty
    }
}

/// Immutable description of a table: its name plus the declared column
/// order. Attribute lookup is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    table: String,
    attributes: Vec<Attribute>,
}

impl Schema {
    pub fn builder(table: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            table: table.into(),
            attributes: Vec::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up a declared attribute by exact name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Quoted, comma-separated column list in declaration order.
    /// Used for SELECT and RETURNING clauses so row decoding always sees
    /// the columns the schema expects.
    pub(crate) fn column_list(&self) -> String {
        self.attributes
            .iter()
            .map(|a| format!("\"{}\"", a.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Builder for [`Schema`]. Rejects identifiers that could break out of
/// double-quoting; table and column names come from application code, never
/// from requests, so a failure here is a programming error surfaced early.
pub struct SchemaBuilder {
    table: String,
    attributes: Vec<Attribute>,
}

impl SchemaBuilder {
    pub fn attr(mut self, name: impl Into<String>, ty: AttrType) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn build(self) -> Result<Schema, QueryError> {
        if !valid_identifier(&self.table) {
            return Err(QueryError::InvalidIdentifier(self.table));
        }
        for attr in &self.attributes {
            if !valid_identifier(&attr.name) {
                return Err(QueryError::InvalidIdentifier(attr.name.clone()));
            }
        }
        Ok(Schema {
            table: self.table,
            attributes: self.attributes,
        })
    }
}

/// ASCII identifier: letter or underscore, then letters, digits,
/// underscores.
fn valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
