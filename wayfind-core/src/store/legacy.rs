//! One-way migration of historical point-file layouts.
//!
//! Earlier deployments wrote the collection either as `{"points": [...]}` or
//! as an object keyed by arbitrary strings whose values are point records.
//! Both are rewritten into the canonical bare array the first time the store
//! meets them.

use serde_json::Value;

use crate::NavigationPoint;

/// Reasons a document could not be read as any known point layout.
#[derive(Debug)]
pub(crate) enum LegacyShapeError {
    /// The document or one of its records was not valid JSON for a point.
    Json(serde_json::Error),
    /// The top-level value was neither an array nor an object.
    Unsupported(&'static str),
}

/// Decode `document` from any historical layout into collection order.
///
/// A bare array is accepted as well so the result can be compared with the
/// canonical reader.
pub(crate) fn migrate_legacy_points(
    document: &str,
) -> Result<Vec<NavigationPoint>, LegacyShapeError> {
    let value: Value = serde_json::from_str(document).map_err(LegacyShapeError::Json)?;
    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(LegacyShapeError::Json),
        Value::Object(mut map) => match map.remove("points") {
            Some(points) => serde_json::from_value(points).map_err(LegacyShapeError::Json),
            None => map
                .into_iter()
                .map(|(_, record)| serde_json::from_value(record).map_err(LegacyShapeError::Json))
                .collect(),
        },
        Value::Null => Err(LegacyShapeError::Unsupported("null")),
        Value::Bool(_) => Err(LegacyShapeError::Unsupported("boolean")),
        Value::Number(_) => Err(LegacyShapeError::Unsupported("number")),
        Value::String(_) => Err(LegacyShapeError::Unsupported("string")),
    }
}
