#![deny(missing_docs)]

//! # Reference Pages
//!
//! Pure parts of API reference page generation: the operation -> page mapping,
//! sidebar ordering, and the text of pages and category files.
//!
//! Placement of pages cannot be derived from the OpenAPI document alone, so
//! callers pass the operation id -> file path table in explicitly.

use crate::error::{AppError, AppResult};
use crate::oas::document::{ApiDocument, OperationRef};
use crate::oas::models::HttpMethod;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::path::Path;

/// Front matter of one reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFrontmatter {
    /// 1-based position within the page's sidebar category.
    pub sidebar_position: usize,
    /// `"{method} {summary or path}"`, suffixed with ` (deprecated)`.
    pub sidebar_label: String,
    /// Summary, or the path when there is none.
    pub title: String,
    /// Operation description or a generated fallback.
    pub description: String,
}

/// Where and how one operation is documented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMapping {
    /// Path template.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Page front matter.
    pub frontmatter: PageFrontmatter,
    /// Page location relative to the references root, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Operation id -> page mapping, in document order.
pub type PageMappings = IndexMap<String, PageMapping>;

/// A sidebar category file (`_category_.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Display label.
    pub label: String,
    /// 1-based position.
    pub position: usize,
    /// Any other keys, kept as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Builds the page mapping for every operation that has an `operationId`.
///
/// Operations whose id is missing from `file_paths` keep `file_path: None`
/// and take no sidebar position.
pub fn build_page_mapping(
    document: &ApiDocument,
    api_name: &str,
    file_paths: &IndexMap<String, String>,
) -> PageMappings {
    let mut mappings = PageMappings::new();

    for operation in document.operations() {
        let Some(operation_id) = operation.operation_id.clone() else {
            tracing::warn!(endpoint = %operation.label(), "operation has no operationId");
            continue;
        };
        let raw = document.operation(&operation.path, operation.method);
        let text = |key: &str| {
            raw.and_then(|op| op.get(key))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let deprecated = raw
            .and_then(|op| op.get("deprecated"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let title = text("summary").unwrap_or_else(|| operation.path.clone());
        let frontmatter = PageFrontmatter {
            sidebar_position: 1,
            sidebar_label: format!(
                "{} {}{}",
                operation.method,
                title,
                if deprecated { " (deprecated)" } else { "" }
            ),
            description: text("description").unwrap_or_else(|| {
                format!(
                    "{} API specification for the {} endpoint",
                    api_name.to_uppercase(),
                    operation.path
                )
            }),
            title,
        };

        let file_path = file_paths.get(&operation_id).cloned();
        if file_path.is_none() {
            tracing::error!(operation_id = %operation_id, "file path not found");
        }

        mappings.insert(
            operation_id,
            PageMapping {
                path: operation.path,
                method: operation.method,
                frontmatter,
                file_path,
            },
        );
    }

    assign_sidebar_positions(&mut mappings);
    mappings
}

/// Sort key for methods within a sidebar category.
pub fn method_priority(method: HttpMethod) -> u8 {
    match method {
        HttpMethod::Get => 1,
        HttpMethod::Post => 2,
        HttpMethod::Put => 3,
        HttpMethod::Patch => 4,
        HttpMethod::Delete => 5,
        _ => 6,
    }
}

/// Numbers the pages of each directory by method priority, then path.
pub fn assign_sidebar_positions(mappings: &mut PageMappings) {
    let mut folders: IndexMap<String, Vec<String>> = IndexMap::new();
    for (operation_id, mapping) in mappings.iter() {
        if let Some(file_path) = &mapping.file_path {
            folders
                .entry(page_directory(file_path))
                .or_default()
                .push(operation_id.clone());
        }
    }

    for ids in folders.values_mut() {
        ids.sort_by(|a, b| compare_pages(&mappings[a], &mappings[b]));
        for (index, id) in ids.iter().enumerate() {
            if let Some(mapping) = mappings.get_mut(id) {
                mapping.frontmatter.sidebar_position = index + 1;
            }
        }
    }
}

fn compare_pages(a: &PageMapping, b: &PageMapping) -> Ordering {
    method_priority(a.method)
        .cmp(&method_priority(b.method))
        .then_with(|| a.path.to_lowercase().cmp(&b.path.to_lowercase()))
}

/// Directory part of a page path (`""` for top-level pages).
pub fn page_directory(file_path: &str) -> String {
    Path::new(file_path)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Looks up the mapping for `operation`.
///
/// # Errors
///
/// `MissingMapping` if the operation has no id, no mapping, or no file path.
pub fn mapping_for<'m>(
    mappings: &'m PageMappings,
    operation: &OperationRef,
) -> AppResult<&'m PageMapping> {
    let id = operation
        .operation_id
        .as_deref()
        .ok_or_else(|| AppError::MissingMapping(operation.label()))?;
    mappings
        .get(id)
        .filter(|mapping| mapping.file_path.is_some())
        .ok_or_else(|| AppError::MissingMapping(id.to_string()))
}

/// Renders the MDX page for one operation.
pub fn render_page(api_name: &str, mapping: &PageMapping) -> String {
    let fm = &mapping.frontmatter;
    let description = fm
        .description
        .trim()
        .lines()
        .map(|line| format!("   {}", line.trim()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "---\ntitle: {title}\nsidebar_label: {label}\nsidebar_position: {position}\ndescription: >-\n{description}\npage_type: api-reference\nhide_title: true\n---\n\n<APIRequestPage apiName=\"{api}\" method=\"{method}\" path=\"{path}\" title=\"{path}\" />\n",
        title = fm.title,
        label = fm.sidebar_label,
        position = fm.sidebar_position,
        description = description,
        api = api_name,
        method = mapping.method,
        path = mapping.path,
    )
}

/// Pretty JSON for a `_category_.json` file.
pub fn render_category(category: &Category) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(category)?)
}

/// Case-insensitive label order; exact comparison breaks ties.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Renumbers categories alphabetically by label, ignoring case.
pub fn order_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| compare_labels(&a.label, &b.label));
    for (index, category) in categories.iter_mut().enumerate() {
        category.position = index + 1;
    }
}

/// File name of a stored request model: `get-users_{id}.json` for `GET /users/{id}`.
pub fn request_file_name(method: HttpMethod, path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    format!("{}-{}.json", method, trimmed.replace('/', "_"))
}
