#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Normalized, reference-free representation of an OpenAPI operation.
//!
//! These structs carry resolved data from the raw document into the example
//! generator, the snippet renderers and the page pipeline. None of them hold
//! back-references to the source document.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// The closed set of normalized schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// Fixed-shape record.
    Object,
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `array`
    Array,
    /// Open-ended map (any schema with truthy `additionalProperties`).
    Dictionary,
}

impl SchemaType {
    /// Parses an OpenAPI `type` keyword value.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "object" => Some(Self::Object),
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "array" => Some(Self::Array),
            "dictionary" => Some(Self::Dictionary),
            _ => None,
        }
    }
}

/// A normalized schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequestSchema {
    /// Normalized type tag.
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// `format` hint (e.g. `date-time`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// `title`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Literal example, copied verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Literal default, copied verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Allowed values, in declaration order.
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Required property names.
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub required: IndexSet<String>,
    /// `nullable` (OpenAPI 3.0).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    /// `deprecated`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Child schemas of an object, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, NormalizedSchema>>,
    /// Element schema of an array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<NormalizedSchema>>,
    /// Remaining scalar keywords (`minimum`, `pattern`, ...), copied verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ApiRequestSchema {
    /// Creates a bare node of the given type.
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            format: None,
            title: None,
            description: None,
            example: None,
            default: None,
            enum_values: None,
            required: IndexSet::new(),
            nullable: false,
            deprecated: false,
            properties: None,
            items: None,
            extra: IndexMap::new(),
        }
    }
}

/// Result of normalizing one raw node: a single schema or a flat `oneOf` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedSchema {
    /// `oneOf` variants, flattened and in declaration order.
    Variants(Vec<ApiRequestSchema>),
    /// A concrete schema.
    Single(ApiRequestSchema),
}

impl NormalizedSchema {
    /// The representative schema: itself, or the first variant.
    pub fn primary(&self) -> Option<&ApiRequestSchema> {
        match self {
            NormalizedSchema::Single(schema) => Some(schema),
            NormalizedSchema::Variants(variants) => variants.first(),
        }
    }

    /// All schemas, one for `Single`.
    pub fn variants(&self) -> &[ApiRequestSchema] {
        match self {
            NormalizedSchema::Single(schema) => std::slice::from_ref(schema),
            NormalizedSchema::Variants(variants) => variants,
        }
    }
}

impl From<ApiRequestSchema> for NormalizedSchema {
    fn from(schema: ApiRequestSchema) -> Self {
        NormalizedSchema::Single(schema)
    }
}

/// HTTP methods an OpenAPI path item can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// PATCH
    Patch,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// Every method, in the order path items are scanned.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Lowercase key used in path items (`get`).
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    /// Uppercase wire form (`GET`).
    pub fn as_upper(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| AppError::Parse(format!("Unknown HTTP method: {}", s)))
    }
}

/// The location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Path template segment.
    Path,
    /// Cookie.
    Cookie,
}

impl ParamLocation {
    /// Parses the `in` keyword of a parameter object.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "path" => Some(Self::Path),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

/// A resolved parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequestParameter {
    /// Parameter name, unique within the request.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter must be sent.
    #[serde(default)]
    pub required: bool,
    /// Deprecated flag.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Parameter-level example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Normalized schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<NormalizedSchema>,
}

/// A resolved response header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequestHeader {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Required flag.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Normalized schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<NormalizedSchema>,
}

/// The request body of an operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the body is required.
    #[serde(default)]
    pub required: bool,
    /// Media type -> schema. Present only when `content` is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<IndexMap<String, NormalizedSchema>>,
}

/// One media type of a response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaContent {
    /// Normalized schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<NormalizedSchema>,
    /// Media-level `example`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Media-level `examples` map, copied verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Value>,
}

/// A resolved response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Media type -> content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaContent>>,
    /// Header name -> header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, ApiRequestHeader>>,
}

/// The canonical request model for one (path, method) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    /// Path template (e.g. `/users/{id}`).
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// `operationId`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Deprecated flag.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Security requirements (scheme name -> scopes), OR-ed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<IndexMap<String, Vec<String>>>>,
    /// Merged path-level and operation-level parameters.
    #[serde(default)]
    pub parameters: IndexMap<String, ApiRequestParameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Status code -> response.
    #[serde(default)]
    pub responses: IndexMap<String, ApiResponse>,
}

impl ApiRequest {
    /// Creates an empty request for `method path`.
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            operation_id: None,
            summary: None,
            description: None,
            deprecated: false,
            security: None,
            parameters: IndexMap::new(),
            body: None,
            responses: IndexMap::new(),
        }
    }

    /// The schema declared for `media_type` in the request body.
    pub fn body_schema(&self, media_type: &str) -> Option<&NormalizedSchema> {
        self.body.as_ref()?.schema.as_ref()?.get(media_type)
    }
}
