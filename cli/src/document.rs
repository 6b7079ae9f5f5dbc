//! Loading OpenAPI documents from disk.

use std::path::Path;

use apiref_core::ApiDocument;

use crate::error::CliResult;

/// Reads `path` as JSON when it has a `.json` extension, YAML otherwise.
pub async fn load_document(path: &Path) -> CliResult<ApiDocument> {
    let content = tokio::fs::read_to_string(path).await?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let document = if is_json {
        ApiDocument::from_json_str(&content)?
    } else {
        ApiDocument::from_yaml_str(&content)?
    };
    tracing::info!(spec = %path.display(), "loaded OpenAPI document");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_loads_yaml_and_json() {
        let dir = tempdir().unwrap();
        let yaml = dir.path().join("openapi.yaml");
        fs::write(&yaml, "paths:\n  /a:\n    get:\n      responses: {}\n").unwrap();
        let json = dir.path().join("openapi.json");
        fs::write(&json, r#"{"paths":{"/b":{"post":{"responses":{}}}}}"#).unwrap();

        assert_eq!(load_document(&yaml).await.unwrap().operations()[0].path, "/a");
        assert_eq!(load_document(&json).await.unwrap().operations()[0].path, "/b");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_document(&dir.path().join("nope.yaml")).await.unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
