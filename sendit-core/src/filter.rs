//! Request-scoped equality filters.
//!
//! A [`Filter`] is a plain value built per request and handed into a read
//! call. Keeping it out of the accessor means two concurrent requests can
//! never see each other's constraints; there is no shared filter state to
//! reset or to race on.

use serde_json::Value;

use crate::error::QueryError;
use crate::query::BindValue;
use crate::record::Record;
use crate::schema::Schema;

/// An ordered set of ANDed equality constraints.
///
/// Constraints keep insertion order; setting an attribute again overwrites
/// its value but keeps its original position. Attributes the schema does
/// not declare are dropped silently. Single-level ANDed equality is the
/// full expressive power on purpose: no OR, ranges, or nesting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    entries: Vec<(String, BindValue)>,
}

impl Filter {
    /// Build a filter from a constraint mapping, keeping only attributes
    /// `schema` declares.
    pub fn from_constraints(schema: &Schema, constraints: &Record) -> Result<Self, QueryError> {
        Filter::default().merge(schema, constraints)
    }

    /// Merge further constraints in, with the same allow-list policy.
    /// Chainable, so multiple constraint sources can stack before a read.
    pub fn merge(mut self, schema: &Schema, constraints: &Record) -> Result<Self, QueryError> {
        for (name, value) in constraints {
            let Some(attr) = schema.attribute(name) else {
                tracing::debug!(table = schema.table(), attribute = %name, "dropping unknown filter attribute");
                continue;
            };
            let bind = BindValue::from_json(attr, value)?;
            match self.entries.iter_mut().find(|(n, _)| n == name) {
                Some(entry) => entry.1 = bind,
                None => self.entries.push((name.clone(), bind)),
            }
        }
        Ok(self)
    }

    /// Single-constraint convenience.
    pub fn eq(self, schema: &Schema, name: &str, value: &Value) -> Result<Self, QueryError> {
        let mut constraints = Record::new();
        constraints.insert(name.to_string(), value.clone());
        self.merge(schema, &constraints)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> &[(String, BindValue)] {
        &self.entries
    }
}
