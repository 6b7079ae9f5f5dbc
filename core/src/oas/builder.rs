#![deny(missing_docs)]

//! # Request Model Builder
//!
//! Assembles one `ApiRequest` from a path item and one of its operations:
//! merged parameters, request body variants per media type, and responses
//! with their content and headers.

use crate::error::{AppError, AppResult};
use crate::oas::models::{
    ApiRequest, ApiRequestHeader, ApiRequestParameter, ApiResponse, HttpMethod, MediaContent,
    ParamLocation, RequestBody,
};
use crate::oas::resolver::as_reference;
use crate::oas::schema::Normalizer;
use indexmap::IndexMap;
use serde_json::Value;

/// Builds the request model for `method path`.
///
/// # Errors
///
/// * `PathNotFound` / `MethodNotFound` if the operation is absent.
/// * Any resolution or normalization error raised while walking the operation.
pub fn build_request(document: &Value, path: &str, method: HttpMethod) -> AppResult<ApiRequest> {
    let mut normalizer = Normalizer::new(document);

    let path_item = document
        .get("paths")
        .and_then(|paths| paths.get(path))
        .ok_or_else(|| AppError::PathNotFound(path.to_string()))?;

    match as_reference(path_item) {
        Some(reference) => normalizer.follow(reference, |n, item| {
            build_from_path_item(n, item, path, method)
        }),
        None => build_from_path_item(&mut normalizer, path_item, path, method),
    }
}

fn build_from_path_item<'a>(
    normalizer: &mut Normalizer<'a>,
    path_item: &'a Value,
    path: &str,
    method: HttpMethod,
) -> AppResult<ApiRequest> {
    let operation = path_item
        .get(method.as_str())
        .ok_or_else(|| AppError::MethodNotFound {
            method: method.as_str().to_string(),
            path: path.to_string(),
        })?;

    tracing::debug!(%method, path, "building request model");

    let mut request = ApiRequest::new(path, method);
    request.operation_id = string_field(operation, "operationId");
    request.summary = string_field(operation, "summary");
    request.description = string_field(operation, "description");
    request.deprecated = operation
        .get("deprecated")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if let Some(security) = operation.get("security") {
        request.security = Some(serde_json::from_value(security.clone())?);
    }

    for level in [path_item.get("parameters"), operation.get("parameters")]
        .into_iter()
        .flatten()
    {
        let Some(params) = level.as_array() else {
            continue;
        };
        for param in params {
            let parameter = transform_parameter(normalizer, param)?;
            // Same-name entries replace the earlier one in place.
            request.parameters.insert(parameter.name.clone(), parameter);
        }
    }

    if let Some(body) = operation.get("requestBody") {
        request.body = Some(transform_request_body(normalizer, body)?);
    }

    if let Some(responses) = operation.get("responses").and_then(Value::as_object) {
        for (status, response) in responses {
            request
                .responses
                .insert(status.clone(), transform_response(normalizer, response)?);
        }
    }

    Ok(request)
}

fn transform_parameter<'a>(
    normalizer: &mut Normalizer<'a>,
    param: &'a Value,
) -> AppResult<ApiRequestParameter> {
    if let Some(reference) = as_reference(param) {
        return normalizer.follow(reference, transform_parameter);
    }

    let name = string_field(param, "name")
        .ok_or_else(|| AppError::InvalidParameter(format!("missing name: {}", param)))?;
    let location = param
        .get("in")
        .and_then(Value::as_str)
        .and_then(ParamLocation::from_keyword)
        .ok_or_else(|| AppError::InvalidParameter(format!("unknown location for {}", name)))?;

    let schema = match param.get("schema").or_else(|| content_schema(param)) {
        Some(schema) => Some(normalizer.normalize(schema)?),
        None => None,
    };

    Ok(ApiRequestParameter {
        name,
        location,
        description: string_field(param, "description"),
        // Path parameters are always required.
        required: location == ParamLocation::Path || bool_field(param, "required"),
        deprecated: bool_field(param, "deprecated"),
        example: param.get("example").filter(|v| !v.is_null()).cloned(),
        schema,
    })
}

/// Schema of a parameter declared through `content`: JSON first, then the
/// first media type that carries one.
fn content_schema(param: &Value) -> Option<&Value> {
    let content = param.get("content")?.as_object()?;
    content
        .get("application/json")
        .and_then(|media| media.get("schema"))
        .or_else(|| content.values().find_map(|media| media.get("schema")))
}

fn transform_header<'a>(
    normalizer: &mut Normalizer<'a>,
    header: &'a Value,
) -> AppResult<ApiRequestHeader> {
    if let Some(reference) = as_reference(header) {
        return normalizer.follow(reference, transform_header);
    }

    let schema = match header.get("schema") {
        Some(schema) => Some(normalizer.normalize(schema)?),
        None => None,
    };

    Ok(ApiRequestHeader {
        description: string_field(header, "description"),
        required: bool_field(header, "required"),
        schema,
    })
}

fn transform_request_body<'a>(
    normalizer: &mut Normalizer<'a>,
    body: &'a Value,
) -> AppResult<RequestBody> {
    if let Some(reference) = as_reference(body) {
        return normalizer.follow(reference, transform_request_body);
    }

    let mut result = RequestBody {
        description: string_field(body, "description"),
        required: bool_field(body, "required"),
        schema: None,
    };

    if let Some(content) = body.get("content").and_then(Value::as_object) {
        let mut schemas = IndexMap::new();
        for (media_type, media) in content {
            let Some(schema) = media.get("schema") else {
                tracing::debug!(media_type = %media_type, "request body media type without schema");
                continue;
            };
            schemas.insert(media_type.clone(), normalizer.normalize(schema)?);
        }
        result.schema = Some(schemas);
    }

    Ok(result)
}

fn transform_response<'a>(
    normalizer: &mut Normalizer<'a>,
    response: &'a Value,
) -> AppResult<ApiResponse> {
    if let Some(reference) = as_reference(response) {
        return normalizer.follow(reference, transform_response);
    }

    let mut result = ApiResponse {
        description: string_field(response, "description"),
        ..ApiResponse::default()
    };

    if let Some(content) = response.get("content").and_then(Value::as_object) {
        let mut normalized = IndexMap::with_capacity(content.len());
        for (media_type, media) in content {
            let schema = match media.get("schema") {
                Some(schema) => Some(normalizer.normalize(schema)?),
                None => None,
            };
            normalized.insert(
                media_type.clone(),
                MediaContent {
                    schema,
                    example: media.get("example").filter(|v| !v.is_null()).cloned(),
                    examples: media.get("examples").cloned(),
                },
            );
        }
        result.content = Some(normalized);
    }

    if let Some(headers) = response.get("headers").and_then(Value::as_object) {
        let mut normalized = IndexMap::with_capacity(headers.len());
        for (name, header) in headers {
            normalized.insert(name.clone(), transform_header(normalizer, header)?);
        }
        result.headers = Some(normalized);
    }

    Ok(result)
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::{NormalizedSchema, SchemaType};
    use serde_json::json;

    fn petstore() -> Value {
        json!({
            "openapi": "3.0.0",
            "paths": {
                "/pets/{petId}": {
                    "parameters": [
                        { "name": "petId", "in": "path", "schema": { "type": "string" } },
                        { "name": "verbose", "in": "query", "schema": { "type": "boolean" } }
                    ],
                    "get": {
                        "operationId": "getPet",
                        "summary": "Get a pet",
                        "parameters": [
                            { "$ref": "#/components/parameters/Verbose" },
                            { "name": "fields", "in": "query", "required": true,
                              "schema": { "type": "string", "example": "name" } }
                        ],
                        "responses": {
                            "200": { "$ref": "#/components/responses/Pet" },
                            "404": { "description": "Missing" }
                        }
                    },
                    "put": {
                        "requestBody": { "$ref": "#/components/requestBodies/PetBody" },
                        "responses": {}
                    }
                }
            },
            "components": {
                "parameters": {
                    "Verbose": { "name": "verbose", "in": "query", "required": true,
                                 "schema": { "type": "boolean", "example": true } }
                },
                "schemas": {
                    "Pet": { "type": "object", "properties": { "name": { "type": "string" } } },
                    "Cat": { "type": "object", "properties": { "meow": { "type": "boolean" } } }
                },
                "headers": {
                    "RateLimit": { "description": "Limit", "schema": { "type": "integer" } }
                },
                "responses": {
                    "Pet": {
                        "description": "A pet",
                        "headers": { "X-Rate-Limit": { "$ref": "#/components/headers/RateLimit" } },
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
                    }
                },
                "requestBodies": {
                    "PetBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": { "oneOf": [
                                { "$ref": "#/components/schemas/Pet" },
                                { "$ref": "#/components/schemas/Cat" }
                            ] } },
                            "text/plain": {}
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_operation_level_parameter_overrides_in_place() {
        let doc = petstore();
        let req = build_request(&doc, "/pets/{petId}", HttpMethod::Get).unwrap();
        let names: Vec<_> = req.parameters.keys().cloned().collect();
        assert_eq!(names, vec!["petId", "verbose", "fields"]);

        let verbose = &req.parameters["verbose"];
        assert!(verbose.required);
        assert_eq!(
            verbose.schema.as_ref().unwrap().primary().unwrap().example,
            Some(json!(true))
        );
        assert!(req.parameters["petId"].required);
        assert_eq!(req.operation_id.as_deref(), Some("getPet"));
    }

    #[test]
    fn test_responses_resolve_refs_and_headers() {
        let doc = petstore();
        let req = build_request(&doc, "/pets/{petId}", HttpMethod::Get).unwrap();
        let ok = &req.responses["200"];
        assert_eq!(ok.description.as_deref(), Some("A pet"));
        let header = &ok.headers.as_ref().unwrap()["X-Rate-Limit"];
        assert_eq!(header.description.as_deref(), Some("Limit"));
        let schema = ok.content.as_ref().unwrap()["application/json"]
            .schema
            .as_ref()
            .unwrap();
        assert_eq!(schema.primary().unwrap().schema_type, SchemaType::Object);
        assert!(req.responses["404"].content.is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn test_request_body_ref_with_one_of() {
        let doc = petstore();
        let req = build_request(&doc, "/pets/{petId}", HttpMethod::Put).unwrap();
        let body = req.body.as_ref().unwrap();
        assert!(body.required);
        let schemas = body.schema.as_ref().unwrap();
        assert_eq!(schemas.len(), 1);
        match &schemas["application/json"] {
            NormalizedSchema::Variants(v) => assert_eq!(v.len(), 2),
            other => panic!("expected variants, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_path_and_method() {
        let doc = petstore();
        assert!(matches!(
            build_request(&doc, "/nope", HttpMethod::Get).unwrap_err(),
            AppError::PathNotFound(p) if p == "/nope"
        ));
        assert!(matches!(
            build_request(&doc, "/pets/{petId}", HttpMethod::Delete).unwrap_err(),
            AppError::MethodNotFound { .. }
        ));
    }

    #[test]
    fn test_dangling_parameter_ref_fails() {
        let doc = json!({
            "paths": { "/x": { "get": {
                "parameters": [ { "$ref": "#/components/parameters/Gone" } ],
                "responses": {}
            } } }
        });
        let err = build_request(&doc, "/x", HttpMethod::Get).unwrap_err();
        assert!(matches!(err, AppError::ReferenceNotFound(_)));
    }

    #[test]
    fn test_parameter_without_name_is_invalid() {
        let doc = json!({
            "paths": { "/x": { "get": {
                "parameters": [ { "in": "query" } ]
            } } }
        });
        let err = build_request(&doc, "/x", HttpMethod::Get).unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter(_)));
    }

    #[test]
    fn test_parameter_schema_from_content() {
        let doc = json!({
            "paths": { "/q": { "get": {
                "parameters": [ {
                    "name": "filter", "in": "query", "required": true,
                    "content": {
                        "text/plain": { "schema": { "type": "integer" } },
                        "application/json": { "schema": {
                            "type": "object",
                            "properties": { "tag": { "type": "string", "example": "a" } }
                        } }
                    }
                } ]
            } } }
        });
        let request = build_request(&doc, "/q", HttpMethod::Get).unwrap();
        let schema = request.parameters["filter"].schema.as_ref().unwrap();
        assert_eq!(schema.primary().unwrap().schema_type, SchemaType::Object);
    }
}
