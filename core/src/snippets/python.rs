//! # Python Renderer
//!
//! Emits a `requests` call. The payload is printed by [`python_literal`].

use crate::error::AppResult;
use crate::oas::models::ApiRequest;
use crate::snippets::literal::python_literal;
use crate::snippets::{quoted_string, Environment, SnippetContext, SnippetRenderer};
use serde_json::Value;

/// Renders Python `requests` snippets.
pub struct PythonRenderer;

impl SnippetRenderer for PythonRenderer {
    fn environment(&self) -> Environment {
        Environment::Python
    }

    fn render_with_context(
        &self,
        api_domain: &str,
        request: &ApiRequest,
        context: &SnippetContext,
    ) -> AppResult<String> {
        let payload = match &context.body {
            Some(body) => {
                let annotation = match body {
                    Value::Object(_) => "Dict[str, Any]",
                    _ => "Any",
                };
                format!("payload: {} = {}\n\n", annotation, python_literal(body))
            }
            None => String::new(),
        };
        let json_arg = if context.body.is_some() {
            ", json=payload"
        } else {
            ""
        };

        Ok(format!(
            r#"import requests
from typing import Any, Dict

BASE_URL = {domain}

url = f"{{BASE_URL}}{path}"

{payload}headers = {{
    "Content-Type": "application/json",
}}

response = requests.{method}(url{json_arg}, headers=headers)

print(response.json())
"#,
            domain = quoted_string(api_domain),
            path = f_string_text(&context.path_with_query_params),
            payload = payload,
            method = request.method.as_str(),
            json_arg = json_arg,
        ))
    }
}

/// Path templates like `/users/{id}` must not become f-string fields.
fn f_string_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('{', "{{")
        .replace('}', "}}")
}
