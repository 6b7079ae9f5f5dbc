#![deny(missing_docs)]

//! # Pages Command
//!
//! Generates API reference pages under `--out`:
//!
//! 1. `{api_name}-mapping.json` with every operation's page mapping.
//! 2. One MDX page per mapped operation at its file path.
//! 3. `_category_.json` for each directory the command creates.
//! 4. Category positions below `{out}/{api_name}` renumbered by label.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use apiref_core::pages::{compare_labels, mapping_for, order_categories, page_directory};
use apiref_core::{build_page_mapping, render_category, render_page, BatchReport, Category};
use indexmap::IndexMap;
use walkdir::WalkDir;

use crate::document::load_document;
use crate::error::CliResult;

const CATEGORY_FILE: &str = "_category_.json";

/// Arguments for the pages command.
#[derive(clap::Args, Debug, Clone)]
pub struct PagesArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long)]
    pub spec: PathBuf,

    /// API name used in page components and the mapping file name (e.g. `cdi`).
    #[clap(long)]
    pub api_name: String,

    /// JSON object mapping operationId to page path relative to `--out`.
    #[clap(long)]
    pub file_paths: PathBuf,

    /// References root directory.
    #[clap(long, default_value = "docs/references")]
    pub out: PathBuf,
}

/// Executes the page generation.
pub async fn execute(args: &PagesArgs) -> CliResult<BatchReport> {
    let document = load_document(&args.spec).await?;
    let file_paths: IndexMap<String, String> =
        serde_json::from_str(&tokio::fs::read_to_string(&args.file_paths).await?)?;

    let mappings = build_page_mapping(&document, &args.api_name, &file_paths);
    tokio::fs::create_dir_all(&args.out).await?;
    let mapping_path = args.out.join(format!("{}-mapping.json", args.api_name));
    tokio::fs::write(&mapping_path, serde_json::to_string_pretty(&mappings)?).await?;
    tracing::info!(file = %mapping_path.display(), pages = mappings.len(), "page mapping written");

    let mut report = BatchReport::new();
    let mut created = HashSet::new();

    for operation in document.operations() {
        let mapping = match mapping_for(&mappings, &operation) {
            Ok(mapping) => mapping,
            Err(e) => {
                report.record_failure(operation.label(), &e);
                continue;
            }
        };
        let Some(file_path) = mapping.file_path.as_deref() else {
            continue;
        };

        let directory = page_directory(file_path);
        let full_dir = args.out.join(&directory);
        if !created.contains(&directory) && !tokio::fs::try_exists(&full_dir).await? {
            tokio::fs::create_dir_all(&full_dir).await?;
            let category = Category {
                label: directory.clone(),
                position: 1,
                extra: Default::default(),
            };
            tokio::fs::write(full_dir.join(CATEGORY_FILE), render_category(&category)?).await?;
            created.insert(directory);
        }

        tokio::fs::write(
            args.out.join(file_path),
            render_page(&args.api_name, mapping),
        )
        .await?;
        report.record_success();
    }

    let api_root = args.out.join(&args.api_name);
    if tokio::fs::try_exists(&api_root).await? {
        tokio::task::spawn_blocking(move || reorder_categories(&api_root)).await??;
    }

    report.log_summary("pages");
    Ok(report)
}

/// Renumbers every `_category_.json` below `root` (excluding `root`'s own) by label.
pub fn reorder_categories(root: &Path) -> CliResult<usize> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).min_depth(2).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && entry.file_name() == CATEGORY_FILE {
            let category: Category = serde_json::from_str(&fs::read_to_string(entry.path())?)?;
            found.push((entry.into_path(), category));
        }
    }

    // Pre-sorted with the same stable order, so paths stay aligned after renumbering.
    found.sort_by(|a, b| compare_labels(&a.1.label, &b.1.label));
    let (paths, mut categories): (Vec<PathBuf>, Vec<Category>) = found.into_iter().unzip();
    order_categories(&mut categories);

    for (path, category) in paths.iter().zip(&categories) {
        fs::write(path, render_category(category)?)?;
    }

    tracing::debug!(root = %root.display(), count = categories.len(), "categories reordered");
    Ok(categories.len())
}
