//! Schema specification model
//!
//! A [`SchemaSpec`] is an immutable tree describing the expected shape of a
//! value. Specs are built once, typically at program start, and then shared
//! read-only across any number of validations and threads.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::types::ValueType;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors raised while constructing a spec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A mapping declared the same key twice
    #[error("duplicate key '{key}' in mapping schema")]
    DuplicateKey { key: String },

    /// A positional sequence needs at least one position
    #[error("heterogeneous sequence schema requires at least one positional schema")]
    EmptyTuple,

    /// An alternation needs at least one branch
    #[error("alternation schema requires at least one branch")]
    EmptyAlternation,
}

/// Declarative description of an expected value shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaSpec {
    /// Value must be an instance of the given type
    ExactType(ValueType),
    /// Associative structure with declared keys (closed world)
    Mapping(MappingSpec),
    /// Ordered sequence
    Sequence(SequenceSpec),
    /// Value must match at least one branch, tried in order
    Alternation(Vec<SchemaSpec>),
}

/// Ordered `key -> spec` bindings with unique keys
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MappingSpec {
    entries: Vec<(String, SchemaSpec)>,
}

/// Sequence schemas
///
/// The constructor decides which rule applies, never the length of the
/// checked value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceSpec {
    /// Zero or more elements, each matching the inner spec
    Homogeneous(Box<SchemaSpec>),
    /// Exactly `len()` elements, position `i` matching spec `i`
    Heterogeneous(Vec<SchemaSpec>),
}

impl MappingSpec {
    /// Build a mapping spec, rejecting duplicate keys
    pub fn new<I, K>(entries: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = (K, SchemaSpec)>,
        K: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut collected = Vec::new();
        for (key, spec) in entries {
            let key = key.into();
            if !seen.insert(key.clone()) {
                return Err(SpecError::DuplicateKey { key });
            }
            collected.push((key, spec));
        }
        Ok(Self { entries: collected })
    }

    /// Entries in declared order
    pub fn entries(&self) -> &[(String, SchemaSpec)] {
        &self.entries
    }

    /// Look up the spec bound to `key`
    pub fn get(&self, key: &str) -> Option<&SchemaSpec> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, spec)| spec)
    }

    /// Whether `key` is declared
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SchemaSpec {
    /// `ExactType(ty)`
    pub fn exact(ty: ValueType) -> Self {
        SchemaSpec::ExactType(ty)
    }

    /// Mapping spec from ordered entries
    pub fn mapping<I, K>(entries: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = (K, SchemaSpec)>,
        K: Into<String>,
    {
        MappingSpec::new(entries).map(SchemaSpec::Mapping)
    }

    /// Start a mapping spec builder
    pub fn mapping_builder() -> MappingBuilder {
        MappingBuilder::new()
    }

    /// Homogeneous sequence: zero or more elements matching `inner`
    pub fn list_of(inner: impl Into<SchemaSpec>) -> Self {
        SchemaSpec::Sequence(SequenceSpec::Homogeneous(Box::new(inner.into())))
    }

    /// Heterogeneous sequence with one spec per position
    pub fn tuple<I>(positions: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = SchemaSpec>,
    {
        let positions: Vec<_> = positions.into_iter().collect();
        if positions.is_empty() {
            return Err(SpecError::EmptyTuple);
        }
        Ok(SchemaSpec::Sequence(SequenceSpec::Heterogeneous(positions)))
    }

    /// Alternation over the given branches
    pub fn any_of<I>(branches: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = SchemaSpec>,
    {
        let branches: Vec<_> = branches.into_iter().collect();
        if branches.is_empty() {
            return Err(SpecError::EmptyAlternation);
        }
        Ok(SchemaSpec::Alternation(branches))
    }

    /// `spec` or null; as a mapping value the key becomes optional
    pub fn optional(spec: impl Into<SchemaSpec>) -> Self {
        SchemaSpec::Alternation(vec![spec.into(), SchemaSpec::ExactType(ValueType::Null)])
    }

    /// Whether a mapping key bound to this spec may be omitted.
    ///
    /// True for exact types the null marker is an instance of, and for
    /// alternations with such a branch.
    pub fn accepts_absent(&self) -> bool {
        match self {
            SchemaSpec::ExactType(ty) => ty.accepts_null(),
            SchemaSpec::Alternation(branches) => branches.iter().any(SchemaSpec::accepts_absent),
            SchemaSpec::Mapping(_) | SchemaSpec::Sequence(_) => false,
        }
    }

    /// Short name of the spec kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaSpec::ExactType(_) => "exact_type",
            SchemaSpec::Mapping(_) => "mapping",
            SchemaSpec::Sequence(SequenceSpec::Homogeneous(_)) => "homogeneous_sequence",
            SchemaSpec::Sequence(SequenceSpec::Heterogeneous(_)) => "heterogeneous_sequence",
            SchemaSpec::Alternation(_) => "alternation",
        }
    }

    /// Nesting depth of the spec tree (an exact type has depth 1)
    pub fn depth(&self) -> usize {
        let children = match self {
            SchemaSpec::ExactType(_) => return 1,
            SchemaSpec::Mapping(mapping) => mapping.entries().iter().map(|(_, s)| s.depth()).max(),
            SchemaSpec::Sequence(SequenceSpec::Homogeneous(inner)) => Some(inner.depth()),
            SchemaSpec::Sequence(SequenceSpec::Heterogeneous(positions)) => {
                positions.iter().map(SchemaSpec::depth).max()
            }
            SchemaSpec::Alternation(branches) => branches.iter().map(SchemaSpec::depth).max(),
        };
        1 + children.unwrap_or(0)
    }
}

impl From<ValueType> for SchemaSpec {
    fn from(ty: ValueType) -> Self {
        SchemaSpec::ExactType(ty)
    }
}

/// A bare ordered pair of exact types is shorthand for alternation over the
/// two types. Fixed two-element sequences go through [`SchemaSpec::tuple`].
impl From<(ValueType, ValueType)> for SchemaSpec {
    fn from((first, second): (ValueType, ValueType)) -> Self {
        SchemaSpec::Alternation(vec![SchemaSpec::ExactType(first), SchemaSpec::ExactType(second)])
    }
}

impl From<MappingSpec> for SchemaSpec {
    fn from(mapping: MappingSpec) -> Self {
        SchemaSpec::Mapping(mapping)
    }
}

impl fmt::Display for SchemaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSpec::ExactType(ty) => write!(f, "{}", ty),
            SchemaSpec::Mapping(mapping) => {
                write!(f, "{{")?;
                for (i, (key, spec)) in mapping.entries().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}': {}", key, spec)?;
                }
                write!(f, "}}")
            }
            SchemaSpec::Sequence(SequenceSpec::Homogeneous(inner)) => write!(f, "[{}, ...]", inner),
            SchemaSpec::Sequence(SequenceSpec::Heterogeneous(positions)) => {
                write!(f, "(")?;
                for (i, spec) in positions.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", spec)?;
                }
                write!(f, ")")
            }
            SchemaSpec::Alternation(branches) => {
                for (i, spec) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    // Nested alternations would be ambiguous without grouping
                    if matches!(spec, SchemaSpec::Alternation(_)) {
                        write!(f, "({})", spec)?;
                    } else {
                        write!(f, "{}", spec)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Builder for mapping specs
#[derive(Debug, Default)]
pub struct MappingBuilder {
    entries: Vec<(String, SchemaSpec)>,
}

impl MappingBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a key
    pub fn key(mut self, key: impl Into<String>, spec: impl Into<SchemaSpec>) -> Self {
        self.entries.push((key.into(), spec.into()));
        self
    }

    /// Declare a key that may be omitted or null
    pub fn optional_key(mut self, key: impl Into<String>, spec: impl Into<SchemaSpec>) -> Self {
        self.entries.push((key.into(), SchemaSpec::optional(spec)));
        self
    }

    /// Build the mapping spec
    pub fn build(self) -> Result<SchemaSpec, SpecError> {
        SchemaSpec::mapping(self.entries)
    }
}
