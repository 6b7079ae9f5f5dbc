#![deny(missing_docs)]

//! # Schema Normalizer
//!
//! Converts raw schema nodes (references, `oneOf` composites, concrete objects)
//! into the closed `ApiRequestSchema` tree.
//!
//! The `Normalizer` also owns the reference trail used to detect cycles, so the
//! request builder routes every `$ref` it follows through it as well.

use crate::error::{AppError, AppResult};
use crate::oas::models::{ApiRequestSchema, NormalizedSchema, SchemaType};
use crate::oas::resolver::resolve;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Keywords handled explicitly and never copied into `extra`.
const HANDLED_KEYWORDS: &[&str] = &[
    "type",
    "format",
    "title",
    "description",
    "example",
    "default",
    "enum",
    "required",
    "nullable",
    "deprecated",
    "properties",
    "items",
    "additionalProperties",
];

/// A raw schema node, classified.
#[derive(Debug, Clone, Copy)]
pub enum RawSchema<'a> {
    /// `{ "$ref": "#/..." }`
    Reference(&'a str),
    /// `{ "oneOf": [...] }`
    OneOf(&'a [Value]),
    /// Any other schema object.
    Concrete(&'a Map<String, Value>),
}

impl<'a> RawSchema<'a> {
    /// Classifies `node`. `$ref` wins over `oneOf`, which wins over everything else.
    pub fn classify(node: &'a Value) -> AppResult<Self> {
        let obj = node
            .as_object()
            .ok_or_else(|| AppError::InvalidSchema(format!("expected an object, got {}", node)))?;

        if let Some(reference) = obj.get("$ref") {
            return reference
                .as_str()
                .map(RawSchema::Reference)
                .ok_or_else(|| AppError::InvalidSchema(format!("non-string $ref: {}", reference)));
        }

        if let Some(one_of) = obj.get("oneOf") {
            return one_of
                .as_array()
                .map(|branches| RawSchema::OneOf(branches.as_slice()))
                .ok_or_else(|| AppError::InvalidSchema(format!("oneOf must be an array: {}", one_of)));
        }

        Ok(RawSchema::Concrete(obj))
    }
}

/// Normalizes `node` against `document`.
///
/// Convenience wrapper over a fresh `Normalizer`; repeated calls never share state.
pub fn normalize(document: &Value, node: &Value) -> AppResult<NormalizedSchema> {
    Normalizer::new(document).normalize(node)
}

/// Stateful walker over one document.
///
/// The only state is the stack of references currently being followed.
pub struct Normalizer<'a> {
    document: &'a Value,
    trail: Vec<String>,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer with an empty reference trail.
    pub fn new(document: &'a Value) -> Self {
        Self {
            document,
            trail: Vec::new(),
        }
    }

    /// The document being walked.
    pub fn document(&self) -> &'a Value {
        self.document
    }

    /// Resolves `reference` and runs `f` on the target with the reference on the trail.
    ///
    /// Fails with `CyclicReference` if `reference` is already being followed.
    pub fn follow<T>(
        &mut self,
        reference: &str,
        f: impl FnOnce(&mut Self, &'a Value) -> AppResult<T>,
    ) -> AppResult<T> {
        if self.trail.iter().any(|r| r == reference) {
            let mut chain = self.trail.clone();
            chain.push(reference.to_string());
            return Err(AppError::CyclicReference(chain.join(" -> ")));
        }

        let target = resolve(self.document, reference)?;
        self.trail.push(reference.to_string());
        let result = f(self, target);
        self.trail.pop();
        result
    }

    /// Normalizes one raw node.
    pub fn normalize(&mut self, node: &'a Value) -> AppResult<NormalizedSchema> {
        match RawSchema::classify(node)? {
            RawSchema::Reference(reference) => {
                tracing::debug!(reference, "normalizing referenced schema");
                self.follow(reference, |this, target| this.normalize(target))
            }
            RawSchema::OneOf(branches) => {
                let mut variants = Vec::with_capacity(branches.len());
                for branch in branches {
                    match self.normalize(branch)? {
                        NormalizedSchema::Single(schema) => variants.push(schema),
                        NormalizedSchema::Variants(nested) => variants.extend(nested),
                    }
                }
                Ok(NormalizedSchema::Variants(variants))
            }
            RawSchema::Concrete(obj) => self.concrete(obj).map(NormalizedSchema::Single),
        }
    }

    fn concrete(&mut self, obj: &'a Map<String, Value>) -> AppResult<ApiRequestSchema> {
        let declared = obj
            .get("type")
            .ok_or_else(|| AppError::MissingSchemaType(Value::Object(obj.clone()).to_string()))?;
        let mut schema = ApiRequestSchema::new(parse_type(declared)?);

        schema.format = string_field(obj, "format");
        schema.title = string_field(obj, "title");
        schema.description = string_field(obj, "description");
        schema.example = obj.get("example").filter(|v| !v.is_null()).cloned();
        schema.default = obj.get("default").filter(|v| !v.is_null()).cloned();
        schema.enum_values = obj.get("enum").and_then(Value::as_array).cloned();
        schema.nullable = bool_field(obj, "nullable");
        schema.deprecated = bool_field(obj, "deprecated");

        if let Some(required) = obj.get("required").and_then(Value::as_array) {
            schema.required = required
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }

        for (key, value) in obj {
            if HANDLED_KEYWORDS.contains(&key.as_str()) || !is_scalar_keyword(value) {
                continue;
            }
            schema.extra.insert(key.clone(), value.clone());
        }

        if let Some(properties) = obj.get("properties") {
            let properties = properties.as_object().ok_or_else(|| {
                AppError::InvalidSchema(format!("properties must be an object: {}", properties))
            })?;
            let mut normalized = IndexMap::with_capacity(properties.len());
            for (name, child) in properties {
                normalized.insert(name.clone(), self.normalize(child)?);
            }
            schema.properties = Some(normalized);
        }

        if obj.get("additionalProperties").is_some_and(is_truthy) {
            schema.schema_type = SchemaType::Dictionary;
        }

        if let Some(items) = obj.get("items") {
            schema.items = Some(Box::new(self.normalize(items)?));
        }

        Ok(schema)
    }
}

/// Parses `type`, accepting the OpenAPI 3.1 array form (`["string", "null"]`).
fn parse_type(declared: &Value) -> AppResult<SchemaType> {
    let keyword = match declared {
        Value::String(s) => Some(s.as_str()),
        Value::Array(entries) => entries
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    };

    keyword
        .and_then(SchemaType::from_keyword)
        .ok_or_else(|| AppError::InvalidSchema(format!("unsupported type: {}", declared)))
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// `true` or a schema object. `false` and anything else is not.
fn is_truthy(value: &Value) -> bool {
    matches!(value, Value::Bool(true) | Value::Object(_))
}

/// Scalars and arrays of scalars; objects may hide references.
fn is_scalar_keyword(value: &Value) -> bool {
    match value {
        Value::Object(_) => false,
        Value::Array(items) => items.iter().all(|v| !v.is_object() && !v.is_array()),
        _ => true,
    }
}
