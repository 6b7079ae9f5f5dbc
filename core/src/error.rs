//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the engine.
//!
//! Every resolution, normalization and build failure is reported through this
//! enum so that batch callers can attribute it to a single endpoint.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Only IO, parse and serialization failures convert implicitly; the structural
/// variants carry a `String` payload and must be built explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A `$ref` that does not point into the current document (`#/...`).
    #[from(ignore)]
    #[display("External references are not supported: {_0}")]
    UnsupportedReference(String),

    /// A local JSON pointer whose path does not exist in the document.
    #[from(ignore)]
    #[display("Reference not found: {_0}")]
    ReferenceNotFound(String),

    /// A reference that is revisited while it is still being followed.
    #[from(ignore)]
    #[display("Cyclic reference: {_0}")]
    CyclicReference(String),

    /// A concrete schema node without a `type`.
    #[from(ignore)]
    #[display("Schema type is required: {_0}")]
    MissingSchemaType(String),

    /// A schema node that cannot be interpreted (not an object, bad `oneOf`, unknown type).
    #[from(ignore)]
    #[display("Invalid schema: {_0}")]
    InvalidSchema(String),

    /// A parameter object lacking a name or carrying an unknown location.
    #[from(ignore)]
    #[display("Invalid parameter: {_0}")]
    InvalidParameter(String),

    /// The requested path is absent from `paths`.
    #[from(ignore)]
    #[display("Path not found: {_0}")]
    PathNotFound(String),

    /// The requested method is absent from the path item.
    #[from(ignore)]
    #[display("Method {method} not found for path: {path}")]
    MethodNotFound {
        /// Lowercase HTTP method.
        method: String,
        /// Path template.
        path: String,
    },

    /// A snippet environment name with no renderer.
    #[from(ignore)]
    #[display("Invalid environment {_0}")]
    InvalidEnvironment(String),

    /// No output page mapping exists for an operation id.
    #[from(ignore)]
    #[display("No mapping found for {_0}")]
    MissingMapping(String),

    /// Input document could not be parsed.
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// JSON (de)serialization failure.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
