#![deny(missing_docs)]

//! # Snippet Context
//!
//! Derived state shared by every renderer: the required query parameters, the
//! representative JSON body and the path with its query string.

use crate::example::generate_example;
use crate::oas::models::{ApiRequest, ApiRequestSchema, NormalizedSchema, ParamLocation, SchemaType};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};

/// Characters escaped in query values; RFC 3986 unreserved characters are kept.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const JSON_MEDIA_TYPE: &str = "application/json";

/// Values computed once per render from the request model.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetContext {
    /// `(name, encoded value)` for each required query parameter, in order.
    pub query_params: Vec<(String, String)>,
    /// The representative JSON body, if the request has one.
    pub body: Option<Value>,
    /// The path with `?k=v&...` appended when there are query parameters.
    pub path_with_query_params: String,
}

impl SnippetContext {
    /// Derives the context for `request`.
    pub fn new(request: &ApiRequest) -> Self {
        let query_params = required_query_params(request);
        let path_with_query_params = if query_params.is_empty() {
            request.path.clone()
        } else {
            let query = query_params
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("&");
            format!("{}?{}", request.path, query)
        };

        Self {
            query_params,
            body: json_body(request),
            path_with_query_params,
        }
    }
}

/// Only required `in: query` parameters make it into samples. A parameter with
/// neither an example nor a schema has no sensible value and is left out.
fn required_query_params(request: &ApiRequest) -> Vec<(String, String)> {
    request
        .parameters
        .values()
        .filter(|param| param.location == ParamLocation::Query && param.required)
        .filter_map(|param| {
            let example = param.example.clone().or_else(|| {
                param
                    .schema
                    .as_ref()
                    .and_then(NormalizedSchema::primary)
                    .map(generate_example)
            })?;
            Some((param.name.clone(), encode_query_value(&example)))
        })
        .collect()
}

/// Renders a query value as text and percent-encodes it.
pub fn encode_query_value(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    };
    utf8_percent_encode(&text, QUERY_VALUE).to_string()
}

/// The body sample, from `application/json` only.
fn json_body(request: &ApiRequest) -> Option<Value> {
    let schema = request.body_schema(JSON_MEDIA_TYPE)?.primary()?;

    if let Some(example) = &schema.example {
        return Some(example.clone());
    }
    if let Some(default) = &schema.default {
        return Some(default.clone());
    }

    match schema.schema_type {
        SchemaType::Object | SchemaType::Dictionary => {
            let properties = schema.properties.as_ref()?;
            Some(Value::Object(
                properties
                    .iter()
                    .map(|(name, child)| (name.clone(), representative_child(child)))
                    .collect::<Map<_, _>>(),
            ))
        }
        SchemaType::Array => Some(representative_value(schema)),
        _ => None,
    }
}

/// Like `generate_example`, but `default` is honoured at every level.
pub fn representative_value(schema: &ApiRequestSchema) -> Value {
    if let Some(example) = &schema.example {
        return example.clone();
    }
    if let Some(default) = &schema.default {
        return default.clone();
    }

    match (&schema.schema_type, &schema.properties, &schema.items) {
        (SchemaType::Array, _, Some(items)) => Value::Array(vec![representative_child(items)]),
        (SchemaType::Object, Some(properties), _) => Value::Object(
            properties
                .iter()
                .map(|(name, child)| (name.clone(), representative_child(child)))
                .collect(),
        ),
        _ => generate_example(schema),
    }
}

fn representative_child(schema: &NormalizedSchema) -> Value {
    schema
        .primary()
        .map(representative_value)
        .unwrap_or(Value::Null)
}
