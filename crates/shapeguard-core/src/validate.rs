//! Public validation entry points
//!
//! Failures are reported through `Result`: on success the validated value is
//! handed back unchanged, on failure the structured error is returned.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, ValidationErrors, ValidationResult};
use crate::matcher::{match_value, match_with_config, MatchConfig, MatchMode};
use crate::path::KeyPath;
use crate::spec::SchemaSpec;
use serde_json::Value;
use std::sync::Arc;

/// Validate `value` against `spec`, stopping at the first failure.
///
/// # Examples
///
/// ```rust
/// use shapeguard_core::{validate, SchemaSpec, ValueType};
/// use serde_json::json;
///
/// let spec = SchemaSpec::mapping_builder()
///     .key("hello", ValueType::Int)
///     .build()
///     .unwrap();
///
/// let value = json!({"hello": 5});
/// assert_eq!(validate(&value, &spec).unwrap(), &value);
/// assert!(validate(&json!({"hello": "x"}), &spec).is_err());
/// ```
pub fn validate<'v>(value: &'v Value, spec: &SchemaSpec) -> ValidationResult<&'v Value> {
    match_value(value, spec, &KeyPath::root())?;
    Ok(value)
}

/// Owned variant of [`validate`]
pub fn validate_owned(value: Value, spec: &SchemaSpec) -> ValidationResult<Value> {
    match_value(&value, spec, &KeyPath::root())?;
    Ok(value)
}

/// Validate with an explicit [`MatchConfig`], possibly collecting several errors
pub fn validate_with_config<'v>(
    value: &'v Value,
    spec: &SchemaSpec,
    config: &MatchConfig,
) -> Result<&'v Value, ValidationErrors> {
    match_with_config(value, spec, &KeyPath::root(), config)?;
    Ok(value)
}

/// Batch validation for multiple documents sharing one spec.
///
/// Each document is checked under the path `[i]`. In fail-fast mode the
/// batch stops at the first failing document.
pub fn validate_batch(
    values: &[Value],
    spec: &SchemaSpec,
    config: &MatchConfig,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let root = KeyPath::root();

    for (i, value) in values.iter().enumerate() {
        let remaining = match config.max_errors {
            0 => 0,
            max => max - errors.len(),
        };
        let document_config = MatchConfig {
            mode: config.mode,
            max_errors: remaining,
        };

        let path = root.child_index(i);
        if let Err(document_errors) = match_with_config(value, spec, &path, &document_config) {
            for error in document_errors {
                errors.add(error);
            }

            if config.mode == MatchMode::FailFast {
                break;
            }

            if config.max_errors > 0 && errors.len() >= config.max_errors {
                break;
            }
        }
    }

    errors.into_result()
}

/// A spec paired with a matching configuration, cheap to clone and share
#[derive(Debug, Clone)]
pub struct Validator {
    spec: Arc<SchemaSpec>,
    config: MatchConfig,
}

impl Validator {
    /// Fail-fast validator for `spec`
    pub fn new(spec: impl Into<Arc<SchemaSpec>>) -> Self {
        Self {
            spec: spec.into(),
            config: MatchConfig::default(),
        }
    }

    /// Replace the matching configuration
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn spec(&self) -> &SchemaSpec {
        &self.spec
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// First failure only, regardless of the configured mode
    pub fn validate<'v>(&self, value: &'v Value) -> Result<&'v Value, SchemaError> {
        validate(value, &self.spec)
    }

    /// All failures permitted by the configuration
    pub fn collect_errors(&self, value: &Value) -> ValidationErrors {
        match match_with_config(value, &self.spec, &KeyPath::root(), &self.config) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        }
    }

    /// Validate several documents, see [`validate_batch`]
    pub fn validate_batch(&self, values: &[Value]) -> Result<(), ValidationErrors> {
        validate_batch(values, &self.spec, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaErrorKind;
    use crate::types::ValueType;
    use serde_json::json;

    fn record_spec() -> SchemaSpec {
        SchemaSpec::mapping_builder()
            .key("id", ValueType::Int)
            .key("name", ValueType::Str)
            .build()
            .unwrap()
    }

    #[test]
    fn test_validate_returns_same_value() {
        let value = json!({"id": 1, "name": "a"});
        let returned = validate(&value, &record_spec()).unwrap();
        assert!(std::ptr::eq(returned, &value));
    }

    #[test]
    fn test_validate_owned() {
        let value = json!({"id": 1, "name": "a"});
        assert_eq!(validate_owned(value.clone(), &record_spec()).unwrap(), value);
        assert!(validate_owned(json!(1), &record_spec()).is_err());
    }

    #[test]
    fn test_batch_prefixes_document_index() {
        let values = vec![
            json!({"id": 1, "name": "a"}),
            json!({"id": "2", "name": "b"}),
            json!({"id": 3}),
        ];

        let errors = validate_batch(&values, &record_spec(), &MatchConfig::collect_all()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors[0].path().render(), "[1]['id']");
        assert_eq!(errors.errors[1].kind(), SchemaErrorKind::MissingKey);
        assert_eq!(errors.errors[1].path().render(), "[2]['name']");

        let errors = validate_batch(&values, &record_spec(), &MatchConfig::fail_fast()).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_batch_max_errors_across_documents() {
        let values = vec![json!({}), json!({}), json!({})];
        let config = MatchConfig::collect_all().with_max_errors(3);
        let errors = validate_batch(&values, &record_spec(), &config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.errors[2].path().render(), "[1]['id']");
    }

    #[test]
    fn test_validator_collects() {
        let validator = Validator::new(record_spec()).with_config(MatchConfig::collect_all());
        let errors = validator.collect_errors(&json!({"id": "x", "extra": 1}));
        assert_eq!(errors.len(), 3);
        assert!(validator.collect_errors(&json!({"id": 1, "name": "n"})).is_empty());
        assert!(validator.validate(&json!({"id": 1, "name": "n"})).is_ok());
    }
}
