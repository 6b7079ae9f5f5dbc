#![deny(missing_docs)]

//! # Example Generation
//!
//! Synthesizes representative JSON values from normalized schemas.
//!
//! Precedence, first match wins: `example`, first `enum` member, array of one
//! item example, object of property examples, then a zero value for the type.

use crate::error::AppResult;
use crate::oas::models::{ApiRequestSchema, ApiResponse, NormalizedSchema, SchemaType};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Generates the example value for `schema`.
pub fn generate_example(schema: &ApiRequestSchema) -> Value {
    if let Some(example) = &schema.example {
        return example.clone();
    }

    if let Some(first) = schema.enum_values.as_ref().and_then(|values| values.first()) {
        return first.clone();
    }

    match (&schema.schema_type, &schema.properties) {
        (SchemaType::Array, _) => Value::Array(
            schema
                .items
                .as_deref()
                .map(|items| vec![generate_normalized_example(items)])
                .unwrap_or_default(),
        ),
        (SchemaType::Object, Some(properties)) => Value::Object(
            properties
                .iter()
                .map(|(name, child)| (name.clone(), generate_normalized_example(child)))
                .collect(),
        ),
        (schema_type, _) => zero_value(*schema_type),
    }
}

/// Generates the example for a normalized child, using the first `oneOf` variant.
///
/// An empty variant list yields `null`.
pub fn generate_normalized_example(schema: &NormalizedSchema) -> Value {
    schema.primary().map(generate_example).unwrap_or(Value::Null)
}

/// The placeholder for a schema without any hints.
pub fn zero_value(schema_type: SchemaType) -> Value {
    match schema_type {
        SchemaType::String => Value::String(String::new()),
        SchemaType::Number | SchemaType::Integer => Value::from(0),
        SchemaType::Boolean => Value::Bool(false),
        SchemaType::Array => Value::Array(Vec::new()),
        SchemaType::Object | SchemaType::Dictionary => Value::Object(Map::new()),
    }
}

/// Pretty JSON for the first successful (`2xx`) `application/json` response.
///
/// Uses the media `examples` when declared, then the media `example`, then the
/// generated example of its schema. Returns `"{}"` when no such response exists.
pub fn response_example_json(responses: &IndexMap<String, ApiResponse>) -> AppResult<String> {
    let Some(content) = responses
        .iter()
        .find(|(status, _)| status.starts_with('2'))
        .and_then(|(_, response)| response.content.as_ref())
        .and_then(|content| content.get("application/json"))
    else {
        return Ok("{}".to_string());
    };

    let value = if let Some(examples) = &content.examples {
        examples.clone()
    } else if let Some(example) = &content.example {
        example.clone()
    } else if let Some(schema) = &content.schema {
        generate_normalized_example(schema)
    } else {
        return Ok("{}".to_string());
    };

    Ok(serde_json::to_string_pretty(&value)?)
}
