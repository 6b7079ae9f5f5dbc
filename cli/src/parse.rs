#![deny(missing_docs)]

//! # Parse Command
//!
//! Builds the request model of every endpoint and stores each one as JSON.
//! Endpoints are processed concurrently; a failing endpoint is reported and
//! the rest of the batch carries on.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use apiref_core::pages::request_file_name;
use apiref_core::{ApiDocument, BatchReport, OperationRef};
use tokio::sync::Semaphore;

use crate::document::load_document;
use crate::error::{CliError, CliResult};

/// Arguments for the parse command.
#[derive(clap::Args, Debug, Clone)]
pub struct ParseArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long)]
    pub spec: PathBuf,

    /// Directory receiving one `{method}-{path}.json` file per endpoint.
    #[clap(long, default_value = "requests")]
    pub out: PathBuf,
}

/// Executes the parse batch with at most `concurrency` endpoints in flight.
pub async fn execute(args: &ParseArgs, concurrency: usize) -> CliResult<BatchReport> {
    let document = Arc::new(load_document(&args.spec).await?);
    tokio::fs::create_dir_all(&args.out).await?;

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = Vec::new();

    for operation in document.operations() {
        let label = operation.label();
        let document = Arc::clone(&document);
        let semaphore = Arc::clone(&semaphore);
        let out = args.out.clone();

        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            write_request(&document, &operation, &out).await
        });
        tasks.push((label, handle));
    }

    let mut report = BatchReport::new();
    for (label, handle) in tasks {
        match handle.await {
            Ok(Ok(target)) => {
                tracing::debug!(endpoint = %label, file = %target.display(), "request model written");
                report.record_success();
            }
            Ok(Err(e)) => report.record_failure(label, &e),
            Err(e) => report.record_failure(label, CliError::from(e)),
        }
    }

    report.log_summary("parse");
    Ok(report)
}

async fn write_request(
    document: &ApiDocument,
    operation: &OperationRef,
    out: &Path,
) -> CliResult<PathBuf> {
    let request = document.build_request(&operation.path, operation.method)?;
    let json = serde_json::to_string_pretty(&request)?;
    let target = out.join(request_file_name(operation.method, &operation.path));
    tokio::fs::write(&target, json).await?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SPEC: &str = r#"
openapi: 3.0.0
paths:
  /users/{id}:
    get:
      parameters:
        - name: id
          in: path
          schema: { type: string }
      responses:
        200:
          description: OK
  /broken:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Missing'
      responses: {}
"#;

    #[tokio::test]
    async fn test_execute_writes_requests_and_isolates_failures() {
        let dir = tempdir().unwrap();
        let spec = dir.path().join("openapi.yaml");
        fs::write(&spec, SPEC).unwrap();
        let out = dir.path().join("requests");

        let args = ParseArgs {
            spec,
            out: out.clone(),
        };
        let report = execute(&args, 2).await.unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].endpoint, "post /broken");

        let written = fs::read_to_string(out.join("get-users_{id}.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["parameters"]["id"]["required"], true);
        assert!(!out.join("post-broken.json").exists());
    }

    #[tokio::test]
    async fn test_execute_missing_spec() {
        let dir = tempdir().unwrap();
        let args = ParseArgs {
            spec: dir.path().join("missing.yaml"),
            out: dir.path().join("out"),
        };
        assert!(execute(&args, 1).await.is_err());
    }
}
