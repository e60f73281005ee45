//! Recursive schema matching
//!
//! [`match_value`] walks a value and a [`SchemaSpec`] together, extending the
//! [`KeyPath`] on every descent. Sequence elements are walked by a loop, so
//! recursion depth is bounded by the nesting depth of the spec, never by the
//! length of a sequence.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, ValidationErrors, ValidationResult};
use crate::path::KeyPath;
use crate::spec::{MappingSpec, SchemaSpec, SequenceSpec};
use crate::types::ValueType;
use serde_json::Value;

/// How many failures a match reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Stop at the first failure, in declaration order
    #[default]
    FailFast,
    /// Keep checking sibling keys and elements after a failure
    CollectAll,
}

/// Matching configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchConfig {
    /// Failure reporting mode
    pub mode: MatchMode,
    /// Maximum number of errors to collect (0 = unlimited)
    pub max_errors: usize,
}

impl MatchConfig {
    /// Stop at the first failure
    pub fn fail_fast() -> Self {
        Self {
            mode: MatchMode::FailFast,
            max_errors: 0,
        }
    }

    /// Report every failing key and element
    pub fn collect_all() -> Self {
        Self {
            mode: MatchMode::CollectAll,
            max_errors: 0,
        }
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Match `value` against `spec`, returning the first failure.
///
/// `path` locates `value` inside the top-level value being validated.
pub fn match_value(value: &Value, spec: &SchemaSpec, path: &KeyPath) -> ValidationResult<()> {
    match spec {
        SchemaSpec::ExactType(expected) => match_exact(value, *expected, path),
        SchemaSpec::Mapping(mapping) => match_mapping(value, mapping, path),
        SchemaSpec::Sequence(SequenceSpec::Homogeneous(inner)) => {
            match_homogeneous(value, inner, path)
        }
        SchemaSpec::Sequence(SequenceSpec::Heterogeneous(positions)) => {
            match_heterogeneous(value, positions, path)
        }
        SchemaSpec::Alternation(branches) => match_alternation(value, branches, path),
    }
}

/// Match with an explicit [`MatchConfig`]
pub fn match_with_config(
    value: &Value,
    spec: &SchemaSpec,
    path: &KeyPath,
    config: &MatchConfig,
) -> Result<(), ValidationErrors> {
    match config.mode {
        MatchMode::FailFast => match_value(value, spec, path).map_err(ValidationErrors::from),
        MatchMode::CollectAll => {
            let mut collector = Collector::new(config.max_errors);
            collector.visit(value, spec, path);
            collector.errors.into_result()
        }
    }
}

fn match_exact(value: &Value, expected: ValueType, path: &KeyPath) -> ValidationResult<()> {
    if expected.matches(value) {
        Ok(())
    } else {
        Err(SchemaError::TypeMismatch {
            path: path.clone(),
            actual: value.clone(),
            expected,
        })
    }
}

fn match_mapping(value: &Value, mapping: &MappingSpec, path: &KeyPath) -> ValidationResult<()> {
    let object = value.as_object().ok_or_else(|| SchemaError::NotAMapping {
        path: path.clone(),
        actual: value.clone(),
    })?;

    for (key, subspec) in mapping.entries() {
        match object.get(key) {
            Some(child) => match_value(child, subspec, &path.child_key(key.as_str()))?,
            None if subspec.accepts_absent() => {}
            None => return Err(missing_key(path, key, subspec)),
        }
    }

    // Closed world: every present key must be declared
    if let Some((key, child)) = object.iter().find(|(key, _)| !mapping.contains_key(key)) {
        return Err(unexpected_key(path, key, child));
    }

    Ok(())
}

fn match_homogeneous(value: &Value, inner: &SchemaSpec, path: &KeyPath) -> ValidationResult<()> {
    let items = sequence_items(value, path)?;
    for (index, item) in items.iter().enumerate() {
        match_value(item, inner, &path.child_index(index))?;
    }
    Ok(())
}

fn match_heterogeneous(
    value: &Value,
    positions: &[SchemaSpec],
    path: &KeyPath,
) -> ValidationResult<()> {
    let items = sequence_items(value, path)?;
    check_length(items, positions, path)?;
    for (index, (item, spec)) in items.iter().zip(positions).enumerate() {
        match_value(item, spec, &path.child_index(index))?;
    }
    Ok(())
}

fn match_alternation(
    value: &Value,
    branches: &[SchemaSpec],
    path: &KeyPath,
) -> ValidationResult<()> {
    let mut branch_errors = Vec::with_capacity(branches.len());
    for (index, branch) in branches.iter().enumerate() {
        // Branch errors are reported under the alternation path plus the branch index
        match match_value(value, branch, &path.child_index(index)) {
            Ok(()) => return Ok(()),
            Err(error) => branch_errors.push(error),
        }
    }
    Err(SchemaError::AlternationExhausted {
        path: path.clone(),
        branch_errors,
    })
}

fn sequence_items<'v>(value: &'v Value, path: &KeyPath) -> ValidationResult<&'v Vec<Value>> {
    // Strings are scalars here, never sequences of characters
    value.as_array().ok_or_else(|| SchemaError::NotASequence {
        path: path.clone(),
        actual: value.clone(),
    })
}

fn check_length(items: &[Value], positions: &[SchemaSpec], path: &KeyPath) -> ValidationResult<()> {
    if items.len() == positions.len() {
        Ok(())
    } else {
        Err(SchemaError::LengthMismatch {
            path: path.clone(),
            expected_len: positions.len(),
            actual_len: items.len(),
        })
    }
}

fn missing_key(path: &KeyPath, key: &str, expected: &SchemaSpec) -> SchemaError {
    SchemaError::MissingKey {
        path: path.child_key(key),
        key: key.to_string(),
        expected: expected.clone(),
    }
}

fn unexpected_key(path: &KeyPath, key: &str, value: &Value) -> SchemaError {
    SchemaError::UnexpectedKey {
        path: path.clone(),
        key: key.to_string(),
        value: value.clone(),
    }
}

/// Error accumulator for [`MatchMode::CollectAll`]
struct Collector {
    max_errors: usize,
    errors: ValidationErrors,
}

impl Collector {
    fn new(max_errors: usize) -> Self {
        Self {
            max_errors,
            errors: ValidationErrors::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.max_errors > 0 && self.errors.len() >= self.max_errors
    }

    fn record(&mut self, error: SchemaError) {
        if !self.is_full() {
            self.errors.add(error);
        }
    }

    fn visit(&mut self, value: &Value, spec: &SchemaSpec, path: &KeyPath) {
        if self.is_full() {
            return;
        }

        match spec {
            SchemaSpec::Mapping(mapping) => self.visit_mapping(value, mapping, path),
            SchemaSpec::Sequence(SequenceSpec::Homogeneous(inner)) => {
                let items = match sequence_items(value, path) {
                    Ok(items) => items,
                    Err(error) => return self.record(error),
                };
                for (index, item) in items.iter().enumerate() {
                    if self.is_full() {
                        return;
                    }
                    self.visit(item, inner, &path.child_index(index));
                }
            }
            SchemaSpec::Sequence(SequenceSpec::Heterogeneous(positions)) => {
                let items = match sequence_items(value, path)
                    .and_then(|items| check_length(items, positions, path).map(|_| items))
                {
                    Ok(items) => items,
                    Err(error) => return self.record(error),
                };
                for (index, (item, spec)) in items.iter().zip(positions).enumerate() {
                    if self.is_full() {
                        return;
                    }
                    self.visit(item, spec, &path.child_index(index));
                }
            }
            // A branch either matches or fails with its first error
            SchemaSpec::ExactType(_) | SchemaSpec::Alternation(_) => {
                if let Err(error) = match_value(value, spec, path) {
                    self.record(error);
                }
            }
        }
    }

    fn visit_mapping(&mut self, value: &Value, mapping: &MappingSpec, path: &KeyPath) {
        let object = match value.as_object() {
            Some(object) => object,
            None => {
                return self.record(SchemaError::NotAMapping {
                    path: path.clone(),
                    actual: value.clone(),
                })
            }
        };

        for (key, subspec) in mapping.entries() {
            if self.is_full() {
                return;
            }
            match object.get(key) {
                Some(child) => self.visit(child, subspec, &path.child_key(key.as_str())),
                None if subspec.accepts_absent() => {}
                None => self.record(missing_key(path, key, subspec)),
            }
        }

        for (key, child) in object {
            if self.is_full() {
                return;
            }
            if !mapping.contains_key(key) {
                self.record(unexpected_key(path, key, child));
            }
        }
    }
}
