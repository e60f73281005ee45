//! Guarding named arguments and return values
//!
//! A [`Signature`] binds parameter names to specs and optionally declares a
//! return spec. Callers hand it `(name, value)` pairs; parameters without a
//! declared spec are not checked.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaError;
use crate::matcher::match_value;
use crate::path::KeyPath;
use crate::spec::SchemaSpec;
use serde_json::{Map, Value};
use thiserror::Error;

/// A schema check on a named argument or return value failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignatureError {
    /// An argument did not match its parameter spec
    #[error("in schema for argument '{name}': {source}")]
    Argument {
        name: String,
        #[source]
        source: SchemaError,
    },

    /// The return value did not match the return spec
    #[error("in schema for return value: {source}")]
    Return {
        #[source]
        source: SchemaError,
    },
}

impl SignatureError {
    /// The underlying schema error
    pub fn schema_error(&self) -> &SchemaError {
        match self {
            SignatureError::Argument { source, .. } | SignatureError::Return { source } => source,
        }
    }

    /// Parameter name, or `return`
    pub fn identifier(&self) -> &str {
        match self {
            SignatureError::Argument { name, .. } => name,
            SignatureError::Return { .. } => "return",
        }
    }
}

/// Named parameter specs plus an optional return spec
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<(String, SchemaSpec)>,
    returns: Option<SchemaSpec>,
}

impl Signature {
    /// Signature with no declared specs
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the spec of a parameter; redeclaring a name replaces its spec
    pub fn param(mut self, name: impl Into<String>, spec: impl Into<SchemaSpec>) -> Self {
        let name = name.into();
        let spec = spec.into();
        match self.params.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = spec,
            None => self.params.push((name, spec)),
        }
        self
    }

    /// Declare the spec of the return value
    pub fn returns(mut self, spec: impl Into<SchemaSpec>) -> Self {
        self.returns = Some(spec.into());
        self
    }

    /// Spec declared for `name`
    pub fn param_spec(&self, name: &str) -> Option<&SchemaSpec> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, spec)| spec)
    }

    pub fn return_spec(&self) -> Option<&SchemaSpec> {
        self.returns.as_ref()
    }

    /// Check one argument; names without a declared spec pass
    pub fn check_argument(&self, name: &str, value: &Value) -> Result<(), SignatureError> {
        match self.param_spec(name) {
            Some(spec) => match_value(value, spec, &KeyPath::root()).map_err(|source| {
                SignatureError::Argument {
                    name: name.to_string(),
                    source,
                }
            }),
            None => Ok(()),
        }
    }

    /// Check arguments in the given order; the first failure wins
    pub fn check_arguments<'a, I>(&self, args: I) -> Result<(), SignatureError>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        args.into_iter()
            .try_for_each(|(name, value)| self.check_argument(name, value))
    }

    /// Check a return value; passes when no return spec is declared
    pub fn check_return(&self, value: &Value) -> Result<(), SignatureError> {
        match &self.returns {
            Some(spec) => match_value(value, spec, &KeyPath::root())
                .map_err(|source| SignatureError::Return { source }),
            None => Ok(()),
        }
    }

    /// Check `args`, call `f` with them, then check and return its result
    pub fn invoke<F>(&self, args: &Map<String, Value>, f: F) -> Result<Value, SignatureError>
    where
        F: FnOnce(&Map<String, Value>) -> Value,
    {
        self.check_arguments(args.iter().map(|(name, value)| (name.as_str(), value)))?;
        let result = f(args);
        self.check_return(&result)?;
        Ok(result)
    }
}
