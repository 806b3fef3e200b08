//! JSON schema helpers for structured LLM responses
//!
//! Builders produce schemas in the subset accepted by strict structured-output
//! modes (every object closes with `additionalProperties: false`).
//! [`validate`] checks a parsed response against such a schema so that a
//! malformed payload is rejected before it reaches typed deserialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

/// A named JSON schema handed to a provider's structured-output mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    /// Schema name (letters, digits, `_` and `-`)
    pub name: String,

    /// Optional description forwarded to the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The JSON schema itself
    pub schema: Value,
}

impl ResponseSchema {
    /// Create a new response schema
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate a parsed value against this schema
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        validate(value, &self.schema)
    }
}

/// First place where a value failed to match its schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct SchemaViolation {
    /// Location of the offending value (`$`, `$.decisions[1].importance`, ...)
    pub path: String,
    /// What was wrong
    pub message: String,
}

impl SchemaViolation {
    /// Create a new violation
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Create a JSON schema for a closed object with properties
///
/// # Example
///
/// ```
/// use news_llm::schema;
/// use serde_json::json;
///
/// let schema = schema::object(
///     json!({
///         "ticker": schema::string("The stock ticker symbol"),
///         "score": schema::integer("Overall score"),
///     }),
///     vec!["ticker", "score"],
/// );
/// assert_eq!(schema["additionalProperties"], false);
/// ```
pub fn object(properties: Value, required: Vec<&str>) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// String property schema
pub fn string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
    })
}

/// Number property schema
pub fn number(description: &str) -> Value {
    json!({
        "type": "number",
        "description": description,
    })
}

/// Integer property schema
pub fn integer(description: &str) -> Value {
    json!({
        "type": "integer",
        "description": description,
    })
}

/// Integer property schema with a lower bound of 0
pub fn non_negative_integer(description: &str) -> Value {
    json!({
        "type": "integer",
        "description": description,
        "minimum": 0,
    })
}

/// Integer property schema bounded to `[min, max]`
pub fn integer_range(description: &str, min: i64, max: i64) -> Value {
    json!({
        "type": "integer",
        "description": description,
        "minimum": min,
        "maximum": max,
    })
}

/// Boolean property schema
pub fn boolean(description: &str) -> Value {
    json!({
        "type": "boolean",
        "description": description,
    })
}

/// Array property schema
pub fn array(description: &str, items: Value) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": items,
    })
}

/// String schema restricted to a fixed set of values
pub fn enum_string(description: &str, values: &[&str]) -> Value {
    json!({
        "type": "string",
        "description": description,
        "enum": values,
    })
}

/// Validate `value` against `schema`
///
/// Supports `type` (single or list), `enum`, `minimum`, `maximum`,
/// `required`, `properties`, `additionalProperties: false` and `items`.
/// Keywords outside that set are ignored.
pub fn validate(value: &Value, schema: &Value) -> Result<(), SchemaViolation> {
    validate_at("$", value, schema)
}

fn validate_at(path: &str, value: &Value, schema: &Value) -> Result<(), SchemaViolation> {
    if let Some(expected) = schema.get("type") {
        check_type(path, value, expected)?;
    }

    if let Some(Value::Array(allowed)) = schema.get("enum") {
        if !allowed.contains(value) {
            return Err(SchemaViolation::new(
                path,
                format!("{value} is not one of {}", Value::Array(allowed.clone())),
            ));
        }
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
            if n < min {
                return Err(SchemaViolation::new(path, format!("{n} is below minimum {min}")));
            }
        }
        if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
            if n > max {
                return Err(SchemaViolation::new(path, format!("{n} is above maximum {max}")));
            }
        }
    }

    match value {
        Value::Object(map) => validate_object(path, map, schema),
        Value::Array(items) => match schema.get("items") {
            Some(item_schema) => items.iter().enumerate().try_for_each(|(i, item)| {
                validate_at(&format!("{path}[{i}]"), item, item_schema)
            }),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

fn validate_object(
    path: &str,
    map: &Map<String, Value>,
    schema: &Value,
) -> Result<(), SchemaViolation> {
    if let Some(Value::Array(required)) = schema.get("required") {
        for key in required.iter().filter_map(Value::as_str) {
            if !map.contains_key(key) {
                return Err(SchemaViolation::new(
                    path,
                    format!("missing required property '{key}'"),
                ));
            }
        }
    }

    let properties = schema.get("properties").and_then(Value::as_object);
    let closed = schema.get("additionalProperties") == Some(&Value::Bool(false));

    for (key, child) in map {
        match properties.and_then(|p| p.get(key)) {
            Some(child_schema) => validate_at(&format!("{path}.{key}"), child, child_schema)?,
            None if closed => {
                return Err(SchemaViolation::new(
                    path,
                    format!("unexpected property '{key}'"),
                ));
            }
            None => {}
        }
    }

    Ok(())
}

fn check_type(path: &str, value: &Value, expected: &Value) -> Result<(), SchemaViolation> {
    let matches = match expected {
        Value::String(t) => type_matches(value, t),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| type_matches(value, t)),
        _ => true,
    };

    if matches {
        Ok(())
    } else {
        Err(SchemaViolation::new(
            path,
            format!("expected {}, got {}", type_label(expected), json_type(value)),
        ))
    }
}

fn type_matches(value: &Value, schema_type: &str) -> bool {
    match schema_type {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_label(expected: &Value) -> String {
    match expected {
        Value::String(t) => t.clone(),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        other => other.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
