//! Builders for the JSON-Schema fragments used in tool descriptors.

use std::collections::BTreeMap;

use crate::value::Value;

/// Builds an `object` schema from its properties and required names.
pub fn object_schema<'a>(
    properties: impl IntoIterator<Item = (&'a str, Value)>,
    required: &[&str],
) -> Value {
    let properties: BTreeMap<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();
    let mut schema = BTreeMap::new();
    schema.insert("type".to_string(), Value::from("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert(
        "required".to_string(),
        Value::Array(required.iter().map(|name| Value::from(*name)).collect()),
    );
    Value::Object(schema)
}

fn typed_property(kind: &str, description: &str) -> BTreeMap<String, Value> {
    let mut property = BTreeMap::new();
    property.insert("type".to_string(), Value::from(kind));
    property.insert("description".to_string(), Value::from(description));
    property
}

pub fn string_property(description: &str) -> Value {
    Value::Object(typed_property("string", description))
}

pub fn integer_property(description: &str) -> Value {
    Value::Object(typed_property("integer", description))
}

pub fn boolean_property(description: &str) -> Value {
    Value::Object(typed_property("boolean", description))
}

pub fn object_property(description: &str) -> Value {
    Value::Object(typed_property("object", description))
}

/// Array property whose items have the JSON type `item_type`.
pub fn array_property(description: &str, item_type: &str) -> Value {
    let mut property = typed_property("array", description);
    let mut items = BTreeMap::new();
    items.insert("type".to_string(), Value::from(item_type));
    property.insert("items".to_string(), Value::Object(items));
    Value::Object(property)
}
