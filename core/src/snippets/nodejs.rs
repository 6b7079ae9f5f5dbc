//! # Node.js Renderer
//!
//! Emits a `fetch` call with a templated `BASE_URL`.

use crate::error::AppResult;
use crate::oas::models::ApiRequest;
use crate::snippets::{pretty_json, quoted_string, Environment, SnippetContext, SnippetRenderer};

/// Renders `fetch` snippets.
pub struct NodeJsRenderer;

impl SnippetRenderer for NodeJsRenderer {
    fn environment(&self) -> Environment {
        Environment::NodeJs
    }

    fn render_with_context(
        &self,
        api_domain: &str,
        request: &ApiRequest,
        context: &SnippetContext,
    ) -> AppResult<String> {
        let body_line = match &context.body {
            Some(body) => format!("\n  body: JSON.stringify({})", pretty_json(body)?),
            None => String::new(),
        };

        Ok(format!(
            r#"const BASE_URL = {domain}

const url = `${{BASE_URL}}{path}`;
const options = {{
  method: '{method}',
  headers: {{
    'Content-Type': 'application/json; charset=utf-8',
  }},{body_line}
}}

fetch(url, options)
  .then(response => response.json())
  .then(json => console.log(json))
  .catch(err => console.error(err));
"#,
            domain = quoted_string(api_domain),
            path = template_literal_text(&context.path_with_query_params),
            method = request.method.as_upper(),
            body_line = body_line,
        ))
    }
}

/// Escapes text embedded in a JavaScript template literal.
fn template_literal_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}
