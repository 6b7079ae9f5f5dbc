//! # Go Renderer
//!
//! Emits an `http.NewRequest` program. The JSON body is embedded as a raw
//! string literal rather than marshaled from a struct.

use crate::error::AppResult;
use crate::oas::models::ApiRequest;
use crate::snippets::{pretty_json, quoted_string, Environment, SnippetContext, SnippetRenderer};

/// Renders Go `net/http` snippets.
pub struct GoRenderer;

impl SnippetRenderer for GoRenderer {
    fn environment(&self) -> Environment {
        Environment::Go
    }

    fn render_with_context(
        &self,
        api_domain: &str,
        request: &ApiRequest,
        context: &SnippetContext,
    ) -> AppResult<String> {
        let method = request.method.as_upper();

        let mut imports = vec!["fmt", "io", "net/http"];
        let request_code = match &context.body {
            Some(body) => {
                imports.push("strings");
                format!(
                    "payload := strings.NewReader(`{}`)\n  req, _ := http.NewRequest(\"{}\", url, payload)",
                    go_raw_string_text(&pretty_json(body)?),
                    method
                )
            }
            None => format!("req, _ := http.NewRequest(\"{}\", url, nil)", method),
        };
        let imports = imports
            .iter()
            .map(|import| format!("  \"{}\"", import))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!(
            r#"package main

import (
{imports}
)

func main() {{
  baseUrl := {domain}
  url := fmt.Sprintf("%s{path}", baseUrl)
  {request_code}

  req.Header.Add("accept", "application/json")
  req.Header.Add("content-type", "application/json")

  res, _ := http.DefaultClient.Do(req)

  defer res.Body.Close()
  body, _ := io.ReadAll(res.Body)

  fmt.Println(string(body))
}}
"#,
            imports = imports,
            domain = quoted_string(api_domain),
            path = go_format_text(&context.path_with_query_params),
            request_code = request_code,
        ))
    }
}

/// Escapes text for the inside of an interpreted `Sprintf` format string.
/// Percent-encoded query values must not be read as verbs.
fn go_format_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('%', "%%")
}

/// Splices backticks out of a Go raw string literal.
fn go_raw_string_text(text: &str) -> String {
    text.replace('`', "` + \"`\" + `")
}
