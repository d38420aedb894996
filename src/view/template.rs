//! Placeholder substitution for template files.
//!
//! Templates are plain text with `{{ name }}` placeholders. A dotted name
//! walks nested objects. Missing variables render as nothing; an unclosed
//! `{{` is copied through unchanged.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Result;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Render the template file at `path`.
pub fn render_file(path: &Path, variables: &Map<String, Value>) -> Result<String> {
    let template = fs::read_to_string(path)?;
    tracing::trace!(template = %path.display(), "Rendering template");
    Ok(render_str(&template, variables))
}

/// Render a template held in memory.
pub fn render_str(template: &str, variables: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];

        match after.find(CLOSE) {
            Some(end) => {
                let name = after[..end].trim();
                if let Some(value) = lookup(variables, name) {
                    push_value(&mut out, value);
                }
                rest = &after[end + CLOSE.len()..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn lookup<'a>(variables: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    let mut parts = name.split('.');
    let first = variables.get(parts.next()?)?;
    parts.try_fold(first, |value, key| value.get(key))
}

fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            for item in items {
                push_value(out, item);
            }
        }
        other => out.push_str(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_placeholders_are_substituted() {
        let variables = vars(json!({"title": "Hi", "content": "<p>body</p>"}));
        assert_eq!(
            render_str("<title>{{ title }}</title>{{content}}", &variables),
            "<title>Hi</title><p>body</p>"
        );
    }

    #[test]
    fn test_missing_and_null_render_empty() {
        let variables = vars(json!({"messages": null}));
        assert_eq!(render_str("[{{ messages }}][{{ nothing }}]", &variables), "[][]");
    }

    #[test]
    fn test_nested_and_scalar_values() {
        let variables = vars(json!({"regions": {"left": "L"}, "count": 3, "items": ["a", "b"]}));
        assert_eq!(render_str("{{ regions.left }}-{{ count }}-{{ items }}", &variables), "L-3-ab");
    }

    #[test]
    fn test_unclosed_placeholder_is_literal() {
        let variables = vars(json!({"a": "x"}));
        assert_eq!(render_str("{{ a }} and {{ b", &variables), "x and {{ b");
    }

    #[test]
    fn test_render_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.tpl.html");
        std::fs::write(&path, "<main>{{ content }}</main>").unwrap();
        let variables = vars(json!({"content": "Hello"}));
        assert_eq!(render_file(&path, &variables).unwrap(), "<main>Hello</main>");
    }

    #[test]
    fn test_render_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_file(&dir.path().join("none.tpl.html"), &Map::new()).unwrap_err();
        assert!(matches!(err, crate::error::LapurdError::Io(_)));
    }
}
