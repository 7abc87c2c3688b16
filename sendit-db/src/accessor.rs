//! Per-entity record accessors.
//!
//! A [`RecordAccessor`] pairs one schema with the shared pool and runs the
//! queries `sendit_core::query` builds. Each call is a one-shot unit of
//! work: construct, bind, execute, decode. There is no cross-call state.

use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{PgPool, Postgres, Row};

use sendit_core::{query, AttrType, Filter, Query, Record, Schema};
use sendit_core::query::BindValue;

use crate::error::DbError;
use crate::Result;

/// Data access for one entity type. Cheap to clone; construct once per
/// entity at startup and share.
#[derive(Debug, Clone)]
pub struct RecordAccessor {
    schema: Schema,
    pool: PgPool,
}

impl RecordAccessor {
    pub fn new(schema: Schema, pool: PgPool) -> Self {
        Self { schema, pool }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Fetch rows matching `filter`, or every row when it is empty.
    pub async fn get_all(&self, filter: &Filter) -> Result<Vec<Record>> {
        let q = query::select_all(&self.schema, filter);
        tracing::debug!(table = self.schema.table(), sql = %q.sql, "get_all");
        let rows = bind_all(&q).fetch_all(&self.pool).await?;
        rows.iter().map(|row| decode_row(&self.schema, row)).collect()
    }

    /// Fetch the row whose primary key equals `id`.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Record>> {
        let q = query::select_by_id(&self.schema, id);
        let row = bind_all(&q).fetch_optional(&self.pool).await?;
        row.map(|row| decode_row(&self.schema, &row)).transpose()
    }

    /// Fetch the first row where `attribute` equals `value`.
    ///
    /// Unlike filter construction, an unknown attribute here is an error,
    /// not a silently unfiltered scan.
    pub async fn find_by_attribute(
        &self,
        attribute: &str,
        value: &Value,
    ) -> Result<Option<Record>> {
        let q = query::select_by_attribute(&self.schema, attribute, value)?;
        let row = bind_all(&q).fetch_optional(&self.pool).await?;
        row.map(|row| decode_row(&self.schema, &row)).transpose()
    }

    /// Insert a record, returning it as stored (generated id included).
    pub async fn create(&self, payload: &Record) -> Result<Record> {
        let q = query::insert(&self.schema, payload)?;
        tracing::debug!(table = self.schema.table(), "create");
        let row = bind_all(&q).fetch_one(&self.pool).await?;
        decode_row(&self.schema, &row)
    }

    /// Update the row with primary key `id`, returning the stored result,
    /// or `None` when no row matched.
    pub async fn update(&self, id: i64, payload: &Record) -> Result<Option<Record>> {
        let q = query::update(&self.schema, id, payload)?;
        tracing::debug!(table = self.schema.table(), id, "update");
        let row = bind_all(&q).fetch_optional(&self.pool).await?;
        row.map(|row| decode_row(&self.schema, &row)).transpose()
    }

    /// Delete the row with primary key `id`. True iff exactly one row went.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let q = query::delete(&self.schema, id);
        tracing::debug!(table = self.schema.table(), id, "delete");
        let outcome = bind_all(&q).execute(&self.pool).await?;
        Ok(outcome.rows_affected() == 1)
    }
}

/// Attach a built query's values to sqlx placeholders, in order.
fn bind_all(q: &Query) -> sqlx::query::Query<'_, Postgres, PgArguments> {
    let mut bound = sqlx::query(&q.sql);
    for bind in &q.binds {
        bound = match bind {
            BindValue::Int(n) => bound.bind(*n),
            BindValue::Text(s) => bound.bind(s.as_str()),
        };
    }
    bound
}

/// Decode exactly the schema's columns out of a row. Integer columns come
/// back as JSON numbers, text columns as JSON strings, SQL NULL as null.
fn decode_row(schema: &Schema, row: &PgRow) -> Result<Record> {
    let mut record = Record::new();
    for attr in schema.attributes() {
        let value = match attr.ty() {
            AttrType::Integer => row
                .try_get::<Option<i64>, _>(attr.name())
                .map_err(DbError::from)?
                .map(Value::from)
                .unwrap_or(Value::Null),
            AttrType::Text => row
                .try_get::<Option<String>, _>(attr.name())
                .map_err(DbError::from)?
                .map(Value::String)
                .unwrap_or(Value::Null),
        };
        record.insert(attr.name().to_owned(), value);
    }
    Ok(record)
}
