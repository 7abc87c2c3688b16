//! SQL text construction.
//!
//! Every function here is pure: it takes a schema plus request data and
//! returns [`Query`] — SQL with Postgres `$n` placeholders and the bind
//! values in placeholder order. Values never land in the SQL text itself;
//! identifiers come only from the schema, which validated them at build
//! time.

use serde_json::Value;

use crate::error::QueryError;
use crate::filter::Filter;
use crate::record::Record;
use crate::schema::{AttrType, Attribute, Schema};

/// A value ready to bind to a placeholder.
///
/// Mirrors the layer's two-way type split: integer columns get `Int`,
/// everything else gets `Text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Int(i64),
    Text(String),
}

impl BindValue {
    /// Convert a JSON value according to the attribute's declared type.
    ///
    /// Text columns accept strings as-is and render bare numbers/booleans
    /// to their usual text form; nulls and composites have no sensible
    /// single-column binding and are rejected.
    pub fn from_json(attr: &Attribute, value: &Value) -> Result<Self, QueryError> {
        match attr.ty() {
            AttrType::Integer => value
                .as_i64()
                .map(BindValue::Int)
                .ok_or_else(|| QueryError::incompatible_value(attr.name(), "an integer")),
            AttrType::Text => match value {
                Value::String(s) => Ok(BindValue::Text(s.clone())),
                Value::Number(n) => Ok(BindValue::Text(n.to_string())),
                Value::Bool(b) => Ok(BindValue::Text(b.to_string())),
                Value::Null | Value::Array(_) | Value::Object(_) => {
                    Err(QueryError::incompatible_value(attr.name(), "text"))
                }
            },
        }
    }
}

/// SQL text plus its bind values, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

/// SELECT matching rows, or every row when the filter is empty.
///
/// Predicates render in the filter's insertion order as ANDed equalities.
pub fn select_all(schema: &Schema, filter: &Filter) -> Query {
    let mut sql = format!(
        "SELECT {} FROM \"{}\"",
        schema.column_list(),
        schema.table()
    );
    let mut binds = Vec::with_capacity(filter.len());

    if !filter.is_empty() {
        sql.push_str(" WHERE ");
        for (i, (name, value)) in filter.entries().iter().enumerate() {
            if i > 0 {
                sql.push_str(" AND ");
            }
            sql.push_str(&format!("\"{}\" = ${}", name, i + 1));
            binds.push(value.clone());
        }
        tracing::debug!(table = schema.table(), clauses = filter.len(), sql = %sql, "built filtered select");
    }

    Query { sql, binds }
}

/// SELECT the single row whose primary key equals `id`.
pub fn select_by_id(schema: &Schema, id: i64) -> Query {
    Query {
        sql: format!(
            "SELECT {} FROM \"{}\" WHERE \"id\" = $1",
            schema.column_list(),
            schema.table()
        ),
        binds: vec![BindValue::Int(id)],
    }
}

/// SELECT the single row where `name` equals `value`.
///
/// Strict on purpose: an unknown attribute fails instead of degrading
/// into an unfiltered scan.
pub fn select_by_attribute(schema: &Schema, name: &str, value: &Value) -> Result<Query, QueryError> {
    let attr = schema
        .attribute(name)
        .ok_or_else(|| QueryError::unknown_attribute(schema.table(), name))?;
    let bind = BindValue::from_json(attr, value)?;
    Ok(Query {
        sql: format!(
            "SELECT {} FROM \"{}\" WHERE \"{}\" = $1",
            schema.column_list(),
            schema.table(),
            attr.name()
        ),
        binds: vec![bind],
    })
}

/// INSERT a filtered payload, RETURNING the schema's columns.
///
/// Columns follow schema declaration order regardless of payload order;
/// unknown payload keys are dropped. Fails before any I/O when nothing
/// survives filtering.
pub fn insert(schema: &Schema, payload: &Record) -> Result<Query, QueryError> {
    let mut columns = Vec::new();
    let mut binds = Vec::new();
    for attr in schema.attributes() {
        let Some(value) = payload.get(attr.name()) else {
            continue;
        };
        binds.push(BindValue::from_json(attr, value)?);
        columns.push(format!("\"{}\"", attr.name()));
    }
    if columns.is_empty() {
        return Err(QueryError::no_valid_fields(schema.table()));
    }

    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
    let sql = format!(
        "INSERT INTO \"{}\" ({}) VALUES ({}) RETURNING {}",
        schema.table(),
        columns.join(", "),
        placeholders.join(", "),
        schema.column_list()
    );
    tracing::debug!(table = schema.table(), columns = columns.len(), "built insert");

    Ok(Query { sql, binds })
}

/// UPDATE a row by id with a filtered payload, RETURNING the schema's
/// columns.
///
/// Assignments follow the payload's iteration order; the id binds last.
pub fn update(schema: &Schema, id: i64, payload: &Record) -> Result<Query, QueryError> {
    let mut assignments = Vec::new();
    let mut binds = Vec::new();
    for (name, value) in payload {
        let Some(attr) = schema.attribute(name) else {
            tracing::debug!(table = schema.table(), attribute = %name, "dropping unknown update attribute");
            continue;
        };
        binds.push(BindValue::from_json(attr, value)?);
        assignments.push(format!("\"{}\" = ${}", attr.name(), binds.len()));
    }
    if assignments.is_empty() {
        return Err(QueryError::no_valid_fields(schema.table()));
    }

    binds.push(BindValue::Int(id));
    let sql = format!(
        "UPDATE \"{}\" SET {} WHERE \"id\" = ${} RETURNING {}",
        schema.table(),
        assignments.join(", "),
        binds.len(),
        schema.column_list()
    );

    Ok(Query { sql, binds })
}

/// DELETE the row whose primary key equals `id`.
pub fn delete(schema: &Schema, id: i64) -> Query {
    Query {
        sql: format!("DELETE FROM \"{}\" WHERE \"id\" = $1", schema.table()),
        binds: vec![BindValue::Int(id)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_from;
    use serde_json::json;

    fn parcels() -> Schema {
        Schema::builder("parcels")
            .attr("id", AttrType::Integer)
            .attr("weight", AttrType::Integer)
            .attr("status", AttrType::Text)
            .build()
            .unwrap()
    }

    #[test]
    fn select_all_without_filter_has_no_where() {
        let schema = parcels();
        let q = select_all(&schema, &Filter::default());
        assert_eq!(
            q.sql,
            r#"SELECT "id", "weight", "status" FROM "parcels""#
        );
        assert!(q.binds.is_empty());
    }

    #[test]
    fn select_all_renders_anded_equalities_in_insertion_order() {
        let schema = parcels();
        let constraints = record_from([("status", json!("transiting")), ("weight", json!(5))]);
        let filter = Filter::from_constraints(&schema, &constraints).unwrap();
        let q = select_all(&schema, &filter);
        assert!(q
            .sql
            .ends_with(r#"WHERE "status" = $1 AND "weight" = $2"#));
        assert_eq!(
            q.binds,
            vec![BindValue::Text("transiting".into()), BindValue::Int(5)]
        );
    }

    #[test]
    fn integer_values_bind_numeric_text_values_bind_text() {
        let schema = parcels();
        let filter = Filter::default()
            .eq(&schema, "weight", &json!(12))
            .unwrap()
            .eq(&schema, "status", &json!("placed"))
            .unwrap();
        let q = select_all(&schema, &filter);
        assert_eq!(q.binds[0], BindValue::Int(12));
        assert_eq!(q.binds[1], BindValue::Text("placed".into()));
    }

    #[test]
    fn select_by_attribute_rejects_unknown_column() {
        let schema = parcels();
        let err = select_by_attribute(&schema, "colour", &json!("red")).unwrap_err();
        assert_eq!(
            err,
            QueryError::unknown_attribute("parcels", "colour")
        );
    }

    #[test]
    fn insert_orders_columns_by_schema_declaration() {
        let schema = parcels();
        // payload deliberately lists status before weight
        let payload = record_from([
            ("status", json!("placed")),
            ("unknown", json!("dropped")),
            ("weight", json!(3)),
        ]);
        let q = insert(&schema, &payload).unwrap();
        assert_eq!(
            q.sql,
            r#"INSERT INTO "parcels" ("weight", "status") VALUES ($1, $2) RETURNING "id", "weight", "status""#
        );
        assert_eq!(
            q.binds,
            vec![BindValue::Int(3), BindValue::Text("placed".into())]
        );
    }

    #[test]
    fn insert_with_no_known_fields_fails() {
        let schema = parcels();
        let err = insert(&schema, &Record::new()).unwrap_err();
        assert_eq!(err, QueryError::no_valid_fields("parcels"));

        let payload = record_from([("colour", json!("red"))]);
        let err = insert(&schema, &payload).unwrap_err();
        assert_eq!(err, QueryError::no_valid_fields("parcels"));
    }

    #[test]
    fn update_follows_payload_order_and_binds_id_last() {
        let schema = parcels();
        let payload = record_from([("status", json!("delivered")), ("weight", json!(4))]);
        let q = update(&schema, 9, &payload).unwrap();
        assert_eq!(
            q.sql,
            r#"UPDATE "parcels" SET "status" = $1, "weight" = $2 WHERE "id" = $3 RETURNING "id", "weight", "status""#
        );
        assert_eq!(
            q.binds,
            vec![
                BindValue::Text("delivered".into()),
                BindValue::Int(4),
                BindValue::Int(9)
            ]
        );
    }

    #[test]
    fn update_with_only_unknown_fields_fails() {
        let schema = parcels();
        let payload = record_from([("colour", json!("red"))]);
        let err = update(&schema, 1, &payload).unwrap_err();
        assert_eq!(err, QueryError::no_valid_fields("parcels"));
    }

    #[test]
    fn delete_targets_the_id_column() {
        let schema = parcels();
        let q = delete(&schema, 42);
        assert_eq!(q.sql, r#"DELETE FROM "parcels" WHERE "id" = $1"#);
        assert_eq!(q.binds, vec![BindValue::Int(42)]);
    }

    #[test]
    fn text_column_accepts_number_and_bool_values() {
        let schema = Schema::builder("users")
            .attr("is_admin", AttrType::Text)
            .build()
            .unwrap();
        let attr = schema.attribute("is_admin").unwrap();
        assert_eq!(
            BindValue::from_json(attr, &json!(true)).unwrap(),
            BindValue::Text("true".into())
        );
        assert_eq!(
            BindValue::from_json(attr, &json!(7)).unwrap(),
            BindValue::Text("7".into())
        );
        assert!(BindValue::from_json(attr, &json!(null)).is_err());
    }
}
