#![deny(missing_docs)]

//! # Batch Accounting
//!
//! Per-endpoint success/failure bookkeeping for generation passes.
//! One failing endpoint is recorded and skipped; it never aborts the batch.

use crate::oas::document::{ApiDocument, OperationRef};
use crate::oas::models::ApiRequest;
use std::fmt;

/// A failure attributed to one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Endpoint label (e.g. `get /users`) or operation id.
    pub endpoint: String,
    /// Rendered error.
    pub error: String,
}

/// Success and failure counts of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of endpoints processed successfully.
    pub succeeded: usize,
    /// Failed endpoints, in the order they were recorded.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one success.
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    /// Records and logs a failure for `endpoint`.
    pub fn record_failure(&mut self, endpoint: impl Into<String>, error: impl fmt::Display) {
        let endpoint = endpoint.into();
        tracing::error!(endpoint = %endpoint, error = %error, "endpoint failed");
        self.failures.push(BatchFailure {
            endpoint,
            error: error.to_string(),
        });
    }

    /// Number of failed endpoints.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// `true` when nothing failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Folds another report into this one.
    pub fn merge(&mut self, other: BatchReport) {
        self.succeeded += other.succeeded;
        self.failures.extend(other.failures);
    }

    /// Logs the totals under `task`.
    pub fn log_summary(&self, task: &str) {
        if self.is_success() {
            tracing::info!(task, succeeded = self.succeeded, "batch completed");
        } else {
            let endpoints = self
                .failures
                .iter()
                .map(|f| f.endpoint.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                task,
                succeeded = self.succeeded,
                failed = self.failed(),
                endpoints = %endpoints,
                "batch completed with failures"
            );
        }
    }
}

/// Builds the request model of every operation in `document`.
///
/// Returns the successful models in document order, plus the report.
pub fn build_all(document: &ApiDocument) -> (Vec<(OperationRef, ApiRequest)>, BatchReport) {
    let mut report = BatchReport::new();
    let mut requests = Vec::new();

    for operation in document.operations() {
        match document.build_request(&operation.path, operation.method) {
            Ok(request) => {
                report.record_success();
                requests.push((operation, request));
            }
            Err(e) => report.record_failure(operation.label(), &e),
        }
    }

    (requests, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    #[test]
    fn test_dangling_ref_is_isolated() {
        let doc = ApiDocument::from_value(json!({
            "paths": {
                "/a": { "get": { "responses": {} } },
                "/b": { "get": { "responses": {
                    "200": { "content": { "application/json": {
                        "schema": { "$ref": "#/components/schemas/Gone" }
                    } } }
                } } },
                "/c": { "post": { "responses": {} }, "get": { "responses": {} } }
            }
        }));

        let (requests, report) = build_all(&doc);
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].endpoint, "get /b");
        assert!(report.failures[0].error.contains("#/components/schemas/Gone"));
        assert_eq!(requests.len(), 3);
    }

    #[test]
    fn test_merge_reports() {
        let mut a = BatchReport::new();
        a.record_success();
        let mut b = BatchReport::new();
        b.record_failure("post /x", &AppError::PathNotFound("/x".into()));
        a.merge(b);
        assert_eq!(a.succeeded, 1);
        assert_eq!(a.failed(), 1);
        assert!(!a.is_success());
    }
}
