//! Row representation.

use serde_json::Value;

/// One row, as a name-to-value mapping in insertion order.
///
/// Records are deliberately loose: the schema decides which keys matter,
/// and unknown keys are dropped at the query-construction boundary rather
/// than validated here. `serde_json`'s map preserves insertion order
/// (via the `preserve_order` feature), which is what gives write payloads
/// their iteration order.
pub type Record = serde_json::Map<String, Value>;

/// Convenience for building records in application code and tests.
///
/// ```
/// use sendit_core::record_from;
///
/// let rec = record_from([("status", "transiting".into()), ("weight", 12.into())]);
/// assert_eq!(rec.len(), 2);
/// ```
pub fn record_from<'a>(pairs: impl IntoIterator<Item = (&'a str, Value)>) -> Record {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
