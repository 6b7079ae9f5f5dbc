//! # Example Command
//!
//! Prints the example JSON of an endpoint's first successful response.

use std::path::PathBuf;

use apiref_core::{response_example_json, HttpMethod};

use crate::document::load_document;
use crate::error::CliResult;

/// Arguments for the example command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExampleArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long)]
    pub spec: PathBuf,

    /// Path template.
    #[clap(long)]
    pub path: String,

    /// HTTP method.
    #[clap(long)]
    pub method: HttpMethod,
}

/// Builds the example JSON text.
pub async fn render(args: &ExampleArgs) -> CliResult<String> {
    let document = load_document(&args.spec).await?;
    let request = document.build_request(&args.path, args.method)?;
    Ok(response_example_json(&request.responses)?)
}

/// Executes the example command.
pub async fn execute(args: &ExampleArgs) -> CliResult<()> {
    println!("{}", render(args).await?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_render_response_example() {
        let dir = tempdir().unwrap();
        let spec = dir.path().join("openapi.yaml");
        fs::write(
            &spec,
            r#"
paths:
  /status:
    get:
      responses:
        200:
          description: OK
          content:
            application/json:
              schema:
                type: object
                properties:
                  status:
                    type: string
                    example: OK
"#,
        )
        .unwrap();

        let args = ExampleArgs {
            spec,
            path: "/status".into(),
            method: HttpMethod::Get,
        };
        assert_eq!(render(&args).await.unwrap(), "{\n  \"status\": \"OK\"\n}");
    }
}
