//! Concrete value types used by exact-type schema checks
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A concrete type a value can be an instance of.
///
/// `Number` and `Any` are families: they are never reported as the observed
/// type of a value, only used as expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// The absent/null marker
    Null,
    /// `true` or `false`
    Bool,
    /// A number with an integer representation
    Int,
    /// A number with a floating point representation
    Float,
    /// `Int` or `Float`
    Number,
    /// Text
    Str,
    /// Any ordered sequence
    List,
    /// Any associative structure
    Dict,
    /// Every value, null included
    Any,
}

impl ValueType {
    /// All types, in the order they are documented
    pub const ALL: [ValueType; 9] = [
        ValueType::Null,
        ValueType::Bool,
        ValueType::Int,
        ValueType::Float,
        ValueType::Number,
        ValueType::Str,
        ValueType::List,
        ValueType::Dict,
        ValueType::Any,
    ];

    /// The observed concrete type of a value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(n) if n.is_f64() => ValueType::Float,
            Value::Number(_) => ValueType::Int,
            Value::String(_) => ValueType::Str,
            Value::Array(_) => ValueType::List,
            Value::Object(_) => ValueType::Dict,
        }
    }

    /// Instance check: does `value` belong to this type?
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ValueType::Any => true,
            ValueType::Number => value.is_number(),
            expected => ValueType::of(value) == expected,
        }
    }

    /// Whether the null marker is an instance of this type.
    ///
    /// Mapping keys bound to such a type may be omitted.
    pub fn accepts_null(self) -> bool {
        matches!(self, ValueType::Null | ValueType::Any)
    }

    /// Canonical name as used in schema documents and diagnostics
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Number => "number",
            ValueType::Str => "str",
            ValueType::List => "list",
            ValueType::Dict => "dict",
            ValueType::Any => "any",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a type name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown type name '{0}'")]
pub struct UnknownTypeName(pub String);

impl FromStr for ValueType {
    type Err = UnknownTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" | "none" => Ok(ValueType::Null),
            "bool" | "boolean" => Ok(ValueType::Bool),
            "int" | "integer" => Ok(ValueType::Int),
            "float" => Ok(ValueType::Float),
            "number" => Ok(ValueType::Number),
            "str" | "string" => Ok(ValueType::Str),
            "list" | "array" => Ok(ValueType::List),
            "dict" | "object" | "map" => Ok(ValueType::Dict),
            "any" => Ok(ValueType::Any),
            other => Err(UnknownTypeName(other.to_string())),
        }
    }
}
