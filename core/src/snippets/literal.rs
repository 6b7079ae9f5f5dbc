//! # Python Literals
//!
//! Prints a JSON value as Python literal source (`True`, `False`, `None`,
//! quoted keys). Works on the structured value, so string contents such as
//! `"true"` are never rewritten.

use serde_json::Value;

const INDENT: &str = "    ";

/// Renders `value` as a Python literal, four-space indented.
pub fn python_literal(value: &Value) -> String {
    let mut out = String::new();
    write_python(value, 0, &mut out);
    out
}

fn write_python(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&python_string(s)),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(depth + 1, out);
                write_python(item, depth + 1, out);
                out.push_str(if i + 1 < items.len() { ",\n" } else { "\n" });
            }
            push_indent(depth, out);
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                push_indent(depth + 1, out);
                out.push_str(&python_string(key));
                out.push_str(": ");
                write_python(item, depth + 1, out);
                out.push_str(if i + 1 < map.len() { ",\n" } else { "\n" });
            }
            push_indent(depth, out);
            out.push('}');
        }
    }
}

/// JSON string escapes (`\"`, `\\`, `\n`, `\uXXXX`) are valid Python escapes.
fn python_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(python_literal(&json!(null)), "None");
        assert_eq!(python_literal(&json!(true)), "True");
        assert_eq!(python_literal(&json!(false)), "False");
        assert_eq!(python_literal(&json!(1.5)), "1.5");
        assert_eq!(python_literal(&json!("a\"b")), r#""a\"b""#);
    }

    #[test]
    fn test_string_contents_are_untouched() {
        assert_eq!(python_literal(&json!("true null")), "\"true null\"");
    }

    #[test]
    fn test_nested_structure() {
        let value = json!({ "name": "John", "flags": [true, null], "meta": {} });
        assert_eq!(
            python_literal(&value),
            "{\n    \"name\": \"John\",\n    \"flags\": [\n        True,\n        None\n    ],\n    \"meta\": {}\n}"
        );
    }
}
