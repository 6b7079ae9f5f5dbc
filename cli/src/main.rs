#![deny(missing_docs)]

//! # apiref CLI
//!
//! Command Line Interface for the OpenAPI reference engine.
//!
//! Supported Commands:
//! - `parse`: Writes the request model of every endpoint as JSON.
//! - `snippet`: Prints a request snippet for one endpoint.
//! - `example`: Prints the response example of one endpoint.
//! - `pages`: Generates API reference pages and sidebar categories.

use std::process::ExitCode;

use apiref_core::BatchReport;
use clap::{Parser, Subcommand};

use crate::error::CliResult;
use crate::logging::LogFormat;

mod document;
mod error;
mod example;
mod logging;
mod pages;
mod parse;
mod snippet;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI reference and code-sample generator")]
struct Cli {
    #[clap(flatten)]
    global: GlobalArgs,

    #[clap(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(clap::Args, Debug, Clone)]
struct GlobalArgs {
    /// Maximum number of endpoints processed at once.
    #[clap(long, global = true, env = "APIREF_CONCURRENCY", default_value_t = 8)]
    concurrency: usize,

    /// Log filter used when `RUST_LOG` is unset.
    #[clap(long, global = true, default_value = "info")]
    log_level: String,

    /// Log output format.
    #[clap(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build and store the request model of every endpoint.
    Parse(parse::ParseArgs),
    /// Print a request snippet for one endpoint.
    Snippet(snippet::SnippetArgs),
    /// Print the response example JSON for one endpoint.
    Example(example::ExampleArgs),
    /// Generate API reference pages.
    Pages(pages::PagesArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.global.log_level, cli.global.log_format) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            tracing::error!(failed = report.failed(), "some endpoints failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<BatchReport> {
    match &cli.command {
        Commands::Parse(args) => parse::execute(args, cli.global.concurrency).await,
        Commands::Snippet(args) => {
            snippet::execute(args).await?;
            Ok(BatchReport::new())
        }
        Commands::Example(args) => {
            example::execute(args).await?;
            Ok(BatchReport::new())
        }
        Commands::Pages(args) => pages::execute(args).await,
    }
}
