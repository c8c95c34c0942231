//! Deterministic JSON rendering of tool results.

use tracing::warn;

use crate::error::Result;
use crate::value::{ResultMap, Value};

/// Renders a result map as compact JSON with keys in sorted order.
///
/// Encoding failures are not propagated: the literal `{}` is returned and a
/// warning is logged, so the outermost return point of a tool never fails
/// on serialization.
pub fn encode(result: &ResultMap) -> String {
    match try_encode(result) {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to encode tool result, returning empty object: {}", e);
            "{}".to_string()
        }
    }
}

/// Renders a result map, reporting `Encoding` on failure.
pub fn try_encode(result: &ResultMap) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}

/// Builds a list value from records, flattening each through `to_value`.
pub fn records<T>(items: &[T], to_value: impl Fn(&T) -> Value) -> Value {
    Value::Array(items.iter().map(to_value).collect())
}
