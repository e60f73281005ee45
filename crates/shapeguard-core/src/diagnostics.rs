//! Rendering of schema errors
//!
//! Rendering is pure: matching never formats anything, callers decide when
//! an error becomes text.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaErrorKind};
use crate::types::ValueType;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

/// Longest value excerpt embedded in a message
pub const MAX_VALUE_CHARS: usize = 80;

const INDENT: &str = "  ";

/// Render a single human-readable message for `error`.
///
/// Exhausted alternations list every branch failure, one per line, prefixed
/// with the branch index and indented per nesting level.
pub fn render(error: &SchemaError) -> String {
    let mut out = String::new();
    render_into(&mut out, error, 0);
    out
}

fn render_into(out: &mut String, error: &SchemaError, level: usize) {
    let path = error.path();
    // Writing into a String cannot fail
    let _ = match error {
        SchemaError::TypeMismatch {
            actual, expected, ..
        } => write!(
            out,
            "at {}: expected value of type {}, but got {} of type {}",
            path,
            expected,
            excerpt(actual),
            ValueType::of(actual)
        ),
        SchemaError::MissingKey { key, expected, .. } => write!(
            out,
            "at {}: expected key '{}' with value of type {}, but it was missing",
            path, key, expected
        ),
        SchemaError::UnexpectedKey { key, value, .. } => write!(
            out,
            "at {}: did not expect key '{}' (value {}); key is not declared in the schema",
            path,
            key,
            excerpt(value)
        ),
        SchemaError::NotAMapping { actual, .. } => write!(
            out,
            "at {}: expected a mapping, but got {} of type {}",
            path,
            excerpt(actual),
            ValueType::of(actual)
        ),
        SchemaError::NotASequence { actual, .. } => write!(
            out,
            "at {}: expected a sequence, but got {} of type {}",
            path,
            excerpt(actual),
            ValueType::of(actual)
        ),
        SchemaError::LengthMismatch {
            expected_len,
            actual_len,
            ..
        } => write!(
            out,
            "at {}: expected a sequence of length {}, but got length {}",
            path, expected_len, actual_len
        ),
        SchemaError::AlternationExhausted { branch_errors, .. } => {
            let _ = write!(
                out,
                "at {}: value did not match any of {} alternatives:",
                path,
                branch_errors.len()
            );
            for (index, branch) in branch_errors.iter().enumerate() {
                out.push('\n');
                out.push_str(&INDENT.repeat(level + 1));
                let _ = write!(out, "branch {}: ", index);
                render_into(out, branch, level + 1);
            }
            Ok(())
        }
    };
}

/// Compact JSON excerpt of a value, truncated to [`MAX_VALUE_CHARS`]
pub fn excerpt(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= MAX_VALUE_CHARS {
        return text;
    }
    let mut truncated: String = text.chars().take(MAX_VALUE_CHARS).collect();
    truncated.push_str("...");
    truncated
}

/// Structured form of a [`SchemaError`] for machine-readable reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Error kind code
    pub kind: SchemaErrorKind,
    /// Rendered key path, `$`-rooted
    pub path: String,
    /// Rendered message, including branch reasons
    pub message: String,
    /// The offending value, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    /// Observed type of the offending value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_type: Option<ValueType>,
    /// Description of what was expected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Per-branch diagnostics of an exhausted alternation
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Build the structured description of `error`
    pub fn from_error(error: &SchemaError) -> Self {
        let (actual, expected) = match error {
            SchemaError::TypeMismatch {
                actual, expected, ..
            } => (Some(actual.clone()), Some(expected.to_string())),
            SchemaError::MissingKey { expected, .. } => (None, Some(expected.to_string())),
            SchemaError::UnexpectedKey { value, .. } => {
                (Some(value.clone()), Some("no undeclared keys".to_string()))
            }
            SchemaError::NotAMapping { actual, .. } => {
                (Some(actual.clone()), Some("mapping".to_string()))
            }
            SchemaError::NotASequence { actual, .. } => {
                (Some(actual.clone()), Some("sequence".to_string()))
            }
            SchemaError::LengthMismatch { expected_len, .. } => {
                (None, Some(format!("sequence of length {}", expected_len)))
            }
            SchemaError::AlternationExhausted { branch_errors, .. } => (
                None,
                Some(format!("one of {} alternatives", branch_errors.len())),
            ),
        };

        Self {
            kind: error.kind(),
            path: error.path().to_string(),
            message: render(error),
            actual_type: actual.as_ref().map(ValueType::of),
            actual,
            expected,
            branches: error.branch_errors().iter().map(Diagnostic::from_error).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::KeyPath;
    use crate::spec::SchemaSpec;
    use serde_json::json;

    #[test]
    fn test_type_mismatch_message() {
        let error = SchemaError::TypeMismatch {
            path: KeyPath::root().child_key("hello"),
            actual: json!("x"),
            expected: ValueType::Int,
        };
        assert_eq!(
            render(&error),
            "at $['hello']: expected value of type int, but got \"x\" of type str"
        );
    }

    #[test]
    fn test_missing_key_message() {
        let error = SchemaError::MissingKey {
            path: KeyPath::root().child_key("count"),
            key: "count".to_string(),
            expected: SchemaSpec::exact(ValueType::Int),
        };
        assert_eq!(
            render(&error),
            "at $['count']: expected key 'count' with value of type int, but it was missing"
        );
    }

    #[test]
    fn test_alternation_lists_branches() {
        let error = SchemaError::AlternationExhausted {
            path: KeyPath::root(),
            branch_errors: vec![
                SchemaError::MissingKey {
                    path: KeyPath::root().child_index(0).child_key("count"),
                    key: "count".to_string(),
                    expected: SchemaSpec::exact(ValueType::Int),
                },
                SchemaError::TypeMismatch {
                    path: KeyPath::root().child_index(1),
                    actual: json!({}),
                    expected: ValueType::Float,
                },
            ],
        };
        let rendered = render(&error);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "at $: value did not match any of 2 alternatives:");
        assert!(lines[1].starts_with("  branch 0: at $[0]['count']: expected key 'count'"));
        assert_eq!(
            lines[2],
            "  branch 1: at $[1]: expected value of type float, but got {} of type dict"
        );
    }

    #[test]
    fn test_nested_alternation_indents() {
        let inner = SchemaError::AlternationExhausted {
            path: KeyPath::root().child_index(0),
            branch_errors: vec![SchemaError::LengthMismatch {
                path: KeyPath::root().child_index(0).child_index(0),
                expected_len: 2,
                actual_len: 1,
            }],
        };
        let outer = SchemaError::AlternationExhausted {
            path: KeyPath::root(),
            branch_errors: vec![inner],
        };
        let rendered = render(&outer);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "  branch 0: at $[0]: value did not match any of 1 alternatives:");
        assert_eq!(
            lines[2],
            "    branch 0: at $[0][0]: expected a sequence of length 2, but got length 1"
        );
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = json!("a".repeat(200));
        let text = excerpt(&long);
        assert!(text.ends_with("..."));
        assert_eq!(text.chars().count(), MAX_VALUE_CHARS + 3);
        assert_eq!(excerpt(&json!(5)), "5");
    }

    #[test]
    fn test_diagnostic_structure() {
        let error = SchemaError::NotASequence {
            path: KeyPath::root().child_key("people"),
            actual: json!("gone now"),
        };
        let diagnostic = error.diagnostic();
        assert_eq!(diagnostic.kind, SchemaErrorKind::NotASequence);
        assert_eq!(diagnostic.path, "$['people']");
        assert_eq!(diagnostic.actual_type, Some(ValueType::Str));
        assert_eq!(diagnostic.expected.as_deref(), Some("sequence"));
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert!(json.get("branches").is_none());
    }
}
