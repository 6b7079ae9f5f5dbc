#![deny(missing_docs)]

//! # Snippet Command
//!
//! Prints the request snippet of one endpoint for one environment.

use std::path::PathBuf;

use apiref_core::{render_snippet, Environment, HttpMethod};

use crate::document::load_document;
use crate::error::CliResult;

/// Arguments for the snippet command.
#[derive(clap::Args, Debug, Clone)]
pub struct SnippetArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long)]
    pub spec: PathBuf,

    /// Path template, e.g. `/users/{id}`.
    #[clap(long)]
    pub path: String,

    /// HTTP method (case-insensitive).
    #[clap(long)]
    pub method: HttpMethod,

    /// Target environment: shell, nodejs, go or python.
    #[clap(long)]
    pub env: Environment,

    /// Base URL embedded in the snippet.
    #[clap(long, env = "APIREF_API_DOMAIN", default_value = "https://api.example.com")]
    pub api_domain: String,
}

/// Renders the snippet without printing it.
pub async fn render(args: &SnippetArgs) -> CliResult<String> {
    let document = load_document(&args.spec).await?;
    let request = document.build_request(&args.path, args.method)?;
    Ok(render_snippet(&args.api_domain, &request, args.env)?)
}

/// Executes the snippet command.
pub async fn execute(args: &SnippetArgs) -> CliResult<()> {
    let code = render(args).await?;
    println!("{}", code.trim_end());
    Ok(())
}
