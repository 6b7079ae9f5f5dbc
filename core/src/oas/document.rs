#![deny(missing_docs)]

//! # OpenAPI Document
//!
//! Loads an OpenAPI document from YAML or JSON text into an in-memory tree and
//! exposes the entry points of the engine over it.
//!
//! The tree is read-only after loading, so one `ApiDocument` can be shared
//! between concurrent generation tasks behind an `Arc`.

use crate::error::{AppError, AppResult};
use crate::oas::builder::build_request;
use crate::oas::models::{ApiRequest, HttpMethod, NormalizedSchema};
use crate::oas::resolver::{as_reference, resolve};
use crate::oas::schema::normalize;
use serde_json::{Map, Number, Value};

/// One operation of the document, as listed by [`ApiDocument::operations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRef {
    /// Path template.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// `operationId`, if declared.
    pub operation_id: Option<String>,
}

impl OperationRef {
    /// `"get /users"`, used to attribute batch failures.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// A parsed OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    root: Value,
}

impl ApiDocument {
    /// Wraps an already-parsed tree.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parses YAML text. Non-string mapping keys (e.g. `200:`) become strings.
    pub fn from_yaml_str(yaml_content: &str) -> AppResult<Self> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(yaml_content)
            .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI YAML: {}", e)))?;
        Ok(Self::from_value(yaml_to_json(yaml)?))
    }

    /// Parses JSON text.
    pub fn from_json_str(json_content: &str) -> AppResult<Self> {
        let root = serde_json::from_str(json_content)
            .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI JSON: {}", e)))?;
        Ok(Self::from_value(root))
    }

    /// The raw tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolves a local `$ref` (see [`resolve`]).
    pub fn resolve(&self, reference: &str) -> AppResult<&Value> {
        resolve(&self.root, reference)
    }

    /// Normalizes a raw schema node against this document.
    pub fn normalize(&self, node: &Value) -> AppResult<NormalizedSchema> {
        normalize(&self.root, node)
    }

    /// Builds the request model for `method path`.
    pub fn build_request(&self, path: &str, method: HttpMethod) -> AppResult<ApiRequest> {
        build_request(&self.root, path, method)
    }

    /// Lists every operation in document order.
    ///
    /// Path items given as `$ref` are followed one level; items that cannot be
    /// resolved are skipped here and fail later in `build_request`.
    pub fn operations(&self) -> Vec<OperationRef> {
        let Some(paths) = self.root.get("paths").and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut operations = Vec::new();
        for (path, item) in paths {
            let item = match as_reference(item) {
                Some(reference) => match self.resolve(reference) {
                    Ok(target) => target,
                    Err(e) => {
                        tracing::warn!(path = %path, error = %e, "skipping unresolvable path item");
                        continue;
                    }
                },
                None => item,
            };

            let Some(entries) = item.as_object() else {
                continue;
            };
            // Keys such as `parameters` and `summary` are not operations.
            for (key, operation) in entries {
                let Some(method) = HttpMethod::ALL.into_iter().find(|m| m.as_str() == key.as_str()) else {
                    continue;
                };
                operations.push(OperationRef {
                    path: path.clone(),
                    method,
                    operation_id: operation
                        .get("operationId")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                });
            }
        }
        operations
    }

    /// Finds the raw operation object for `method path`.
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Value> {
        let item = self.root.get("paths")?.get(path)?;
        let item = match as_reference(item) {
            Some(reference) => self.resolve(reference).ok()?,
            None => item,
        };
        item.get(method.as_str())
    }
}

/// Converts a YAML tree into a JSON tree, stringifying non-string keys.
fn yaml_to_json(value: serde_yaml::Value) -> AppResult<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                Value::Number(Number::from_f64(f).ok_or_else(|| {
                    AppError::Parse(format!("Non-finite number in OpenAPI YAML: {}", f))
                })?)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<AppResult<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> AppResult<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        other => Err(AppError::Parse(format!(
            "Unsupported mapping key in OpenAPI YAML: {:?}",
            other
        ))),
    }
}
