#![deny(missing_docs)]

//! # Snippets
//!
//! Per-language request snippets for API reference pages.
//!
//! - **context**: Derived state shared by every renderer.
//! - **shell** / **nodejs** / **go** / **python**: One renderer per environment.
//! - **literal**: Value-to-source printer for Python literals.
//!
//! Renderers are selected through a static lookup table keyed by environment name.

pub mod context;
pub mod go;
pub mod literal;
pub mod nodejs;
pub mod python;
pub mod shell;

use crate::error::{AppError, AppResult};
use crate::oas::models::ApiRequest;
use std::fmt;
use std::str::FromStr;

pub use context::SnippetContext;
pub use go::GoRenderer;
pub use nodejs::NodeJsRenderer;
pub use python::PythonRenderer;
pub use shell::ShellRenderer;

/// Target environments for request snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// cURL.
    Shell,
    /// `fetch` in Node.js.
    NodeJs,
    /// `net/http` in Go.
    Go,
    /// `requests` in Python.
    Python,
}

impl Environment {
    /// Every environment, in display order.
    pub const ALL: [Environment; 4] = [
        Environment::Shell,
        Environment::NodeJs,
        Environment::Go,
        Environment::Python,
    ];

    /// The environment key (`shell`, `nodejs`, `go`, `python`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Shell => "shell",
            Environment::NodeJs => "nodejs",
            Environment::Go => "go",
            Environment::Python => "python",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| AppError::InvalidEnvironment(s.to_string()))
    }
}

/// Turns a request model into source text for one environment.
pub trait SnippetRenderer: Sync {
    /// The environment this renderer targets.
    fn environment(&self) -> Environment;

    /// Renders using an already derived context.
    fn render_with_context(
        &self,
        api_domain: &str,
        request: &ApiRequest,
        context: &SnippetContext,
    ) -> AppResult<String>;

    /// Renders `request` against `api_domain` (e.g. `https://api.example.com`).
    fn render(&self, api_domain: &str, request: &ApiRequest) -> AppResult<String> {
        let context = SnippetContext::new(request);
        self.render_with_context(api_domain, request, &context)
    }
}

static RENDERERS: [(&str, &dyn SnippetRenderer); 4] = [
    ("shell", &ShellRenderer),
    ("nodejs", &NodeJsRenderer),
    ("go", &GoRenderer),
    ("python", &PythonRenderer),
];

/// Looks up the renderer registered under `name`.
pub fn renderer_named(name: &str) -> AppResult<&'static dyn SnippetRenderer> {
    RENDERERS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, renderer)| *renderer)
        .ok_or_else(|| AppError::InvalidEnvironment(name.to_string()))
}

/// The renderer for `environment`.
pub fn renderer_for(environment: Environment) -> AppResult<&'static dyn SnippetRenderer> {
    renderer_named(environment.as_str())
}

/// Renders one snippet.
pub fn render_snippet(
    api_domain: &str,
    request: &ApiRequest,
    environment: Environment,
) -> AppResult<String> {
    renderer_for(environment)?.render(api_domain, request)
}

/// A double-quoted string literal valid in JavaScript, Python and Go.
pub(crate) fn quoted_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// Pretty JSON with two-space indentation, shared by the JSON-based renderers.
pub(crate) fn pretty_json(value: &serde_json::Value) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::HttpMethod;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("nodejs".parse::<Environment>().unwrap(), Environment::NodeJs);
        let err = "invalid".parse::<Environment>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid environment invalid");
    }

    #[test]
    fn test_lookup_table_covers_every_environment() {
        for env in Environment::ALL {
            assert_eq!(renderer_for(env).unwrap().environment(), env);
        }
        assert!(renderer_named("ruby").is_err());
    }

    #[test]
    fn test_quoted_string_escapes() {
        assert_eq!(quoted_string("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn test_every_renderer_handles_a_bare_request() {
        let request = ApiRequest::new("/health", HttpMethod::Get);
        for env in Environment::ALL {
            let code = render_snippet("https://api.example.com", &request, env).unwrap();
            assert!(code.contains("/health"), "{} snippet lacks the path", env);
        }
    }
}
