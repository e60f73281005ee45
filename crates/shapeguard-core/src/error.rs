//! Schema matching error types
//!
//! Errors are plain values: the matcher returns them and never logs or
//! prints. Their `Display` output is the diagnostics rendering.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::diagnostics::{self, Diagnostic};
use crate::path::KeyPath;
use crate::spec::SchemaSpec;
use crate::types::ValueType;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Why a value failed to match a spec
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaError {
    /// Value is not an instance of the expected type
    TypeMismatch {
        path: KeyPath,
        actual: Value,
        expected: ValueType,
    },
    /// A declared key that cannot be omitted is absent; `path` ends with the key
    MissingKey {
        path: KeyPath,
        key: String,
        expected: SchemaSpec,
    },
    /// The mapping at `path` has a key the schema does not declare
    UnexpectedKey {
        path: KeyPath,
        key: String,
        value: Value,
    },
    /// A mapping schema met a non-associative value
    NotAMapping { path: KeyPath, actual: Value },
    /// A sequence schema met a non-sequence value
    NotASequence { path: KeyPath, actual: Value },
    /// A positional sequence schema met a sequence of another length
    LengthMismatch {
        path: KeyPath,
        expected_len: usize,
        actual_len: usize,
    },
    /// Every alternation branch failed; errors are in branch order
    AlternationExhausted {
        path: KeyPath,
        branch_errors: Vec<SchemaError>,
    },
}

/// Stable identifier of a [`SchemaError`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaErrorKind {
    TypeMismatch,
    MissingKey,
    UnexpectedKey,
    NotAMapping,
    NotASequence,
    LengthMismatch,
    AlternationExhausted,
}

impl SchemaErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaErrorKind::TypeMismatch => "type_mismatch",
            SchemaErrorKind::MissingKey => "missing_key",
            SchemaErrorKind::UnexpectedKey => "unexpected_key",
            SchemaErrorKind::NotAMapping => "not_a_mapping",
            SchemaErrorKind::NotASequence => "not_a_sequence",
            SchemaErrorKind::LengthMismatch => "length_mismatch",
            SchemaErrorKind::AlternationExhausted => "alternation_exhausted",
        }
    }
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SchemaError {
    /// The variant of this error
    pub fn kind(&self) -> SchemaErrorKind {
        match self {
            SchemaError::TypeMismatch { .. } => SchemaErrorKind::TypeMismatch,
            SchemaError::MissingKey { .. } => SchemaErrorKind::MissingKey,
            SchemaError::UnexpectedKey { .. } => SchemaErrorKind::UnexpectedKey,
            SchemaError::NotAMapping { .. } => SchemaErrorKind::NotAMapping,
            SchemaError::NotASequence { .. } => SchemaErrorKind::NotASequence,
            SchemaError::LengthMismatch { .. } => SchemaErrorKind::LengthMismatch,
            SchemaError::AlternationExhausted { .. } => SchemaErrorKind::AlternationExhausted,
        }
    }

    /// Where in the value the failure was detected
    pub fn path(&self) -> &KeyPath {
        match self {
            SchemaError::TypeMismatch { path, .. }
            | SchemaError::MissingKey { path, .. }
            | SchemaError::UnexpectedKey { path, .. }
            | SchemaError::NotAMapping { path, .. }
            | SchemaError::NotASequence { path, .. }
            | SchemaError::LengthMismatch { path, .. }
            | SchemaError::AlternationExhausted { path, .. } => path,
        }
    }

    /// Branch errors of an exhausted alternation, empty otherwise
    pub fn branch_errors(&self) -> &[SchemaError] {
        match self {
            SchemaError::AlternationExhausted { branch_errors, .. } => branch_errors,
            _ => &[],
        }
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        diagnostics::render(self)
    }

    /// Structured, serializable description
    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic::from_error(self)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&diagnostics::render(self))
    }
}

/// Result type for single-error validation
pub type ValidationResult<T> = Result<T, SchemaError>;

/// Multiple schema errors collected by collect-all or batch validation
#[derive(Debug, Clone, Default, PartialEq, Error, Serialize)]
pub struct ValidationErrors {
    /// Errors in the order they were detected
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} schema error(s) occurred:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    /// Create an empty collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection
    pub fn add(&mut self, error: SchemaError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaError> {
        self.errors.iter()
    }

    /// The first recorded error
    pub fn first(&self) -> Option<&SchemaError> {
        self.errors.first()
    }

    /// Ok if no errors were recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<SchemaError> for ValidationErrors {
    fn from(error: SchemaError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<SchemaError>> for ValidationErrors {
    fn from(errors: Vec<SchemaError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a SchemaError;
    type IntoIter = std::slice::Iter<'a, SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mismatch(key: &str) -> SchemaError {
        SchemaError::TypeMismatch {
            path: KeyPath::root().child_key(key),
            actual: json!("x"),
            expected: ValueType::Int,
        }
    }

    #[test]
    fn test_kind_and_path() {
        let error = mismatch("hello");
        assert_eq!(error.kind(), SchemaErrorKind::TypeMismatch);
        assert_eq!(error.kind().as_str(), "type_mismatch");
        assert_eq!(error.path().render(), "['hello']");
        assert!(error.branch_errors().is_empty());
    }

    #[test]
    fn test_serialize_tagged() {
        let value = serde_json::to_value(mismatch("hello")).unwrap();
        assert_eq!(value["kind"], "type_mismatch");
        assert_eq!(value["path"], "$['hello']");
        assert_eq!(value["expected"], "int");
        assert_eq!(value["actual"], "x");
    }

    #[test]
    fn test_errors_collection() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result().is_ok());
        errors.add(mismatch("a"));
        errors.add(mismatch("b"));
        assert_eq!(errors.len(), 2);
        let rendered = errors.to_string();
        assert!(rendered.starts_with("2 schema error(s) occurred:"));
        assert!(rendered.contains("\n1. at $['a']"));
        assert!(rendered.contains("\n2. at $['b']"));
        assert!(errors.into_result().is_err());
    }
}
