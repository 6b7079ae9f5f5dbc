#![deny(missing_docs)]

//! # OpenAPI Module
//!
//! - **document**: Loading YAML/JSON and enumerating operations.
//! - **resolver**: Local `$ref` resolution.
//! - **schema**: Raw schema -> normalized schema tree.
//! - **builder**: Per-operation request model assembly.
//! - **models**: The normalized request model.

pub mod builder;
pub mod document;
pub mod models;
pub mod resolver;
pub mod schema;

pub use builder::build_request;
pub use document::{ApiDocument, OperationRef};
pub use models::{
    ApiRequest, ApiRequestHeader, ApiRequestParameter, ApiRequestSchema, ApiResponse, HttpMethod,
    MediaContent, NormalizedSchema, ParamLocation, RequestBody, SchemaType,
};
pub use resolver::resolve;
pub use schema::{normalize, Normalizer, RawSchema};
