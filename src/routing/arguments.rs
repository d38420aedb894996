//! Positional argument templates for route callbacks.

use serde::{Deserialize, Serialize};

/// One element of an argument template.
///
/// Integers in a `paths` hook result select a segment of the concrete path,
/// strings are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Segment(usize),
    Literal(String),
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Literal(value.to_string())
    }
}

impl From<usize> for Argument {
    fn from(index: usize) -> Self {
        Argument::Segment(index)
    }
}

/// Derive callback arguments from a template and the concrete path.
///
/// Segment indexes address the full `/`-split path; an index past the end
/// yields an empty string.
pub fn map_arguments(template: &[Argument], path: &str) -> Vec<String> {
    let parts: Vec<&str> = path.split('/').collect();

    template
        .iter()
        .map(|argument| match argument {
            Argument::Literal(value) => value.clone(),
            Argument::Segment(index) => parts.get(*index).map(|s| s.to_string()).unwrap_or_default(),
        })
        .collect()
}
