//! # Reference Resolver
//!
//! Resolves local JSON-pointer `$ref` strings (`#/components/schemas/User`)
//! against the root document.
//!
//! External documents are never fetched: anything outside `#/` is rejected so
//! resolution stays synchronous and free of side effects.

use crate::error::{AppError, AppResult};
use percent_encoding::percent_decode_str;
use serde_json::Value;

/// Resolves a local `$ref` against `document`, returning the referenced node.
///
/// The pointer is walked segment by segment. Object members are looked up by
/// key and array elements by decimal index.
///
/// # Errors
///
/// * `UnsupportedReference` if `reference` does not start with `#/`.
/// * `ReferenceNotFound` if any segment is missing.
pub fn resolve<'a>(document: &'a Value, reference: &str) -> AppResult<&'a Value> {
    let pointer = reference
        .strip_prefix("#/")
        .ok_or_else(|| AppError::UnsupportedReference(reference.to_string()))?;

    let mut current = document;
    for raw_segment in pointer.split('/') {
        let segment = decode_pointer_segment(raw_segment);
        let next = match current {
            Value::Object(map) => map.get(&segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        current = next.ok_or_else(|| AppError::ReferenceNotFound(reference.to_string()))?;
    }

    tracing::trace!(reference, "resolved reference");
    Ok(current)
}

/// Returns the `$ref` string of a reference object, if `node` is one.
pub fn as_reference(node: &Value) -> Option<&str> {
    node.get("$ref").and_then(Value::as_str)
}

/// Decodes a JSON Pointer segment taken from a URI fragment.
///
/// Percent-decoding runs first, then `~1` and `~0` are unescaped (RFC 6901 §6).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8_lossy()
        .replace("~1", "/")
        .replace("~0", "~")
}
