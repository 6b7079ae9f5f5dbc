//! # Shell Renderer
//!
//! Emits a `curl` invocation.

use crate::error::AppResult;
use crate::oas::models::ApiRequest;
use crate::snippets::{pretty_json, Environment, SnippetContext, SnippetRenderer};

/// Renders cURL commands.
pub struct ShellRenderer;

impl SnippetRenderer for ShellRenderer {
    fn environment(&self) -> Environment {
        Environment::Shell
    }

    fn render_with_context(
        &self,
        api_domain: &str,
        request: &ApiRequest,
        context: &SnippetContext,
    ) -> AppResult<String> {
        let url = format!("{}{}", api_domain, context.path_with_query_params);
        let mut snippet = format!(
            "curl --location --request {} '{}' \\\n     --header 'Content-Type: application/json; charset=utf-8'",
            request.method.as_upper(),
            shell_single_quoted(&url)
        );

        if let Some(body) = &context.body {
            snippet.push_str(&format!(
                " \\\n     --data-raw '{}'\n",
                shell_single_quoted(&pretty_json(body)?)
            ));
        }

        Ok(snippet)
    }
}

/// Escapes `'` for use inside a single-quoted shell word.
fn shell_single_quoted(text: &str) -> String {
    text.replace('\'', r"'\''")
}
