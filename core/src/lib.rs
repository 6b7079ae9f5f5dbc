#![deny(missing_docs)]

//! # apiref Core
//!
//! Reference resolution, schema normalization and code-sample generation for
//! OpenAPI 3 documents.

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) loading, resolution and request models.
pub mod oas;

/// Example value synthesis.
pub mod example;

/// Per-language request snippets.
pub mod snippets;

/// API reference page mapping and rendering.
pub mod pages;

/// Per-endpoint batch accounting.
pub mod batch;

pub use batch::{build_all, BatchFailure, BatchReport};
pub use error::{AppError, AppResult};
pub use example::{generate_example, generate_normalized_example, response_example_json};
pub use oas::{
    build_request, normalize, resolve, ApiDocument, ApiRequest, ApiRequestHeader,
    ApiRequestParameter, ApiRequestSchema, ApiResponse, HttpMethod, MediaContent,
    NormalizedSchema, OperationRef, ParamLocation, RequestBody, SchemaType,
};
pub use pages::{
    build_page_mapping, render_category, render_page, request_file_name, Category,
    PageFrontmatter, PageMapping, PageMappings,
};
pub use snippets::{render_snippet, Environment, SnippetContext, SnippetRenderer};
