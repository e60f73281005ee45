//! Schema literal notation
//!
//! Schema documents are plain JSON or YAML values:
//!
//! | notation | spec |
//! |---|---|
//! | `"int"` | exact type |
//! | `{"a": "int"}` | mapping, entries in document order |
//! | `["str"]` | zero or more `str` |
//! | `["int", "null"]` | `int` or `null` |
//! | `null` | the null type |
//! | `{"$or": [...]}` | alternation |
//! | `{"$list": s}` | zero or more `s` |
//! | `{"$tuple": [...]}` | positional sequence |
//! | `{"$optional": s}` | `s` or `null` |
//! | `{"$mapping": {...}}` | mapping whose keys are taken literally |
//!
//! An object is read as a directive only when it has exactly one key and
//! that key is a directive name.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};
use shapeguard_core::{KeyPath, SchemaSpec, SequenceSpec, SpecError, ValueType};
use thiserror::Error;

/// Alternation directive
pub const OR_DIRECTIVE: &str = "$or";
/// Homogeneous sequence directive
pub const LIST_DIRECTIVE: &str = "$list";
/// Positional sequence directive
pub const TUPLE_DIRECTIVE: &str = "$tuple";
/// Optional value directive
pub const OPTIONAL_DIRECTIVE: &str = "$optional";
/// Literal mapping directive
pub const MAPPING_DIRECTIVE: &str = "$mapping";

const DIRECTIVES: [&str; 5] = [
    OR_DIRECTIVE,
    LIST_DIRECTIVE,
    TUPLE_DIRECTIVE,
    OPTIONAL_DIRECTIVE,
    MAPPING_DIRECTIVE,
];

/// Errors found while compiling a schema document.
///
/// Paths locate the offending node inside the schema document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotationError {
    /// A type-name string is not known
    #[error("at {path}: unknown type name '{name}'")]
    UnknownType { path: KeyPath, name: String },

    /// A JSON value that has no schema meaning
    #[error("at {path}: {found} is not a schema; expected a type name, object or array")]
    InvalidSchema { path: KeyPath, found: ValueType },

    /// An array literal that is neither `[s]` nor a pair of type names
    #[error(
        "at {path}: array of length {len} is ambiguous; use {{\"$tuple\": [...]}} or {{\"$or\": [...]}}"
    )]
    AmbiguousSequence { path: KeyPath, len: usize },

    /// A directive received an argument of the wrong shape
    #[error("at {path}: directive '{directive}' expects {expected}")]
    InvalidDirective {
        path: KeyPath,
        directive: &'static str,
        expected: &'static str,
    },

    /// The compiled parts do not form a valid spec
    #[error("at {path}: {source}")]
    Spec {
        path: KeyPath,
        #[source]
        source: SpecError,
    },
}

impl NotationError {
    /// Location of the error inside the schema document
    pub fn path(&self) -> &KeyPath {
        match self {
            NotationError::UnknownType { path, .. }
            | NotationError::InvalidSchema { path, .. }
            | NotationError::AmbiguousSequence { path, .. }
            | NotationError::InvalidDirective { path, .. }
            | NotationError::Spec { path, .. } => path,
        }
    }
}

/// Result type for notation compilation
pub type NotationResult<T> = Result<T, NotationError>;

/// Compiles schema documents into [`SchemaSpec`] trees and back
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaCompiler;

impl SchemaCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile a schema document
    pub fn compile(&self, document: &Value) -> NotationResult<SchemaSpec> {
        self.compile_node(document, &KeyPath::root())
    }

    fn compile_node(&self, node: &Value, path: &KeyPath) -> NotationResult<SchemaSpec> {
        match node {
            Value::String(name) => self.compile_type_name(name, path),
            Value::Object(object) => match directive_of(object) {
                Some((directive, argument)) => {
                    self.compile_directive(directive, argument, &path.child_key(directive))
                }
                None => self.compile_mapping(object, path),
            },
            Value::Array(items) => self.compile_array(items, path),
            Value::Null => Ok(SchemaSpec::exact(ValueType::Null)),
            other => Err(NotationError::InvalidSchema {
                path: path.clone(),
                found: ValueType::of(other),
            }),
        }
    }

    fn compile_type_name(&self, name: &str, path: &KeyPath) -> NotationResult<SchemaSpec> {
        parse_type_name(name, path).map(SchemaSpec::exact)
    }

    fn compile_mapping(
        &self,
        object: &Map<String, Value>,
        path: &KeyPath,
    ) -> NotationResult<SchemaSpec> {
        let entries = object
            .iter()
            .map(|(key, node)| {
                self.compile_node(node, &path.child_key(key.as_str()))
                    .map(|spec| (key.clone(), spec))
            })
            .collect::<NotationResult<Vec<_>>>()?;

        SchemaSpec::mapping(entries).map_err(|source| NotationError::Spec {
            path: path.clone(),
            source,
        })
    }

    fn compile_array(&self, items: &[Value], path: &KeyPath) -> NotationResult<SchemaSpec> {
        match items {
            [inner] => Ok(SchemaSpec::list_of(self.compile_node(inner, &path.child_index(0))?)),
            [first, second] if is_type_literal(first) && is_type_literal(second) => {
                let first = parse_type_literal(first, &path.child_index(0))?;
                let second = parse_type_literal(second, &path.child_index(1))?;
                Ok(SchemaSpec::from((first, second)))
            }
            _ => Err(NotationError::AmbiguousSequence {
                path: path.clone(),
                len: items.len(),
            }),
        }
    }

    fn compile_directive(
        &self,
        directive: &'static str,
        argument: &Value,
        path: &KeyPath,
    ) -> NotationResult<SchemaSpec> {
        match directive {
            OR_DIRECTIVE => {
                let branches = self.compile_items(directive, argument, path)?;
                SchemaSpec::any_of(branches).map_err(|source| NotationError::Spec {
                    path: path.clone(),
                    source,
                })
            }
            TUPLE_DIRECTIVE => {
                let positions = self.compile_items(directive, argument, path)?;
                SchemaSpec::tuple(positions).map_err(|source| NotationError::Spec {
                    path: path.clone(),
                    source,
                })
            }
            LIST_DIRECTIVE => Ok(SchemaSpec::list_of(self.compile_node(argument, path)?)),
            OPTIONAL_DIRECTIVE => Ok(SchemaSpec::optional(self.compile_node(argument, path)?)),
            _ => match argument {
                Value::Object(object) => self.compile_mapping(object, path),
                _ => Err(NotationError::InvalidDirective {
                    path: path.clone(),
                    directive,
                    expected: "an object",
                }),
            },
        }
    }

    fn compile_items(
        &self,
        directive: &'static str,
        argument: &Value,
        path: &KeyPath,
    ) -> NotationResult<Vec<SchemaSpec>> {
        let items = argument
            .as_array()
            .ok_or_else(|| NotationError::InvalidDirective {
                path: path.clone(),
                directive,
                expected: "an array",
            })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.compile_node(item, &path.child_index(i)))
            .collect()
    }

    /// Write a spec back as a schema document.
    ///
    /// Compiling the result yields a spec equal to `spec`.
    pub fn to_notation(&self, spec: &SchemaSpec) -> Value {
        match spec {
            SchemaSpec::ExactType(ty) => Value::String(ty.name().to_string()),
            SchemaSpec::Mapping(mapping) => {
                let object: Map<String, Value> = mapping
                    .entries()
                    .iter()
                    .map(|(key, spec)| (key.clone(), self.to_notation(spec)))
                    .collect();
                if directive_of(&object).is_some() {
                    wrap(MAPPING_DIRECTIVE, Value::Object(object))
                } else {
                    Value::Object(object)
                }
            }
            SchemaSpec::Sequence(SequenceSpec::Homogeneous(inner)) => {
                Value::Array(vec![self.to_notation(inner)])
            }
            SchemaSpec::Sequence(SequenceSpec::Heterogeneous(positions)) => wrap(
                TUPLE_DIRECTIVE,
                Value::Array(positions.iter().map(|s| self.to_notation(s)).collect()),
            ),
            SchemaSpec::Alternation(branches) => match branches.as_slice() {
                [SchemaSpec::ExactType(a), SchemaSpec::ExactType(b)] => Value::Array(vec![
                    Value::String(a.name().to_string()),
                    Value::String(b.name().to_string()),
                ]),
                [inner, SchemaSpec::ExactType(ValueType::Null)] => {
                    wrap(OPTIONAL_DIRECTIVE, self.to_notation(inner))
                }
                _ => wrap(
                    OR_DIRECTIVE,
                    Value::Array(branches.iter().map(|s| self.to_notation(s)).collect()),
                ),
            },
        }
    }
}

fn parse_type_name(name: &str, path: &KeyPath) -> NotationResult<ValueType> {
    name.parse().map_err(|_| NotationError::UnknownType {
        path: path.clone(),
        name: name.to_string(),
    })
}

/// A type name, or the null literal standing for the null type
fn is_type_literal(node: &Value) -> bool {
    matches!(node, Value::String(_) | Value::Null)
}

fn parse_type_literal(node: &Value, path: &KeyPath) -> NotationResult<ValueType> {
    match node {
        Value::String(name) => parse_type_name(name, path),
        _ => Ok(ValueType::Null),
    }
}

/// The directive and its argument, if `object` is a directive object
fn directive_of(object: &Map<String, Value>) -> Option<(&'static str, &Value)> {
    if object.len() != 1 {
        return None;
    }
    let (key, argument) = object.iter().next()?;
    DIRECTIVES
        .iter()
        .find(|directive| **directive == key.as_str())
        .map(|directive| (*directive, argument))
}

fn wrap(directive: &str, argument: Value) -> Value {
    let mut object = Map::new();
    object.insert(directive.to_string(), argument);
    Value::Object(object)
}

/// Compile a schema document with a default [`SchemaCompiler`]
pub fn compile(document: &Value) -> NotationResult<SchemaSpec> {
    SchemaCompiler::new().compile(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_names_and_aliases() {
        assert_eq!(compile(&json!("int")).unwrap(), SchemaSpec::exact(ValueType::Int));
        assert_eq!(compile(&json!("string")).unwrap(), SchemaSpec::exact(ValueType::Str));
        let error = compile(&json!({"a": "integr"})).unwrap_err();
        assert_eq!(error.to_string(), "at $['a']: unknown type name 'integr'");
    }

    #[test]
    fn test_mapping_keeps_document_order() {
        let spec = compile(&json!({"z": "int", "a": ["str"]})).unwrap();
        assert_eq!(spec.to_string(), "{'z': int, 'a': [str, ...]}");
    }

    #[test]
    fn test_pair_of_type_names_is_alternation() {
        let spec = compile(&json!(["int", "null"])).unwrap();
        assert_eq!(spec, SchemaSpec::from((ValueType::Int, ValueType::Null)));
    }

    #[test]
    fn test_null_literal_is_null_type() {
        assert_eq!(compile(&json!(null)).unwrap(), SchemaSpec::exact(ValueType::Null));
        let spec = compile(&json!(["int", null])).unwrap();
        assert_eq!(spec, SchemaSpec::from((ValueType::Int, ValueType::Null)));
    }

    #[test]
    fn test_other_arrays_are_ambiguous() {
        for document in [json!([]), json!(["int", "str", "int"]), json!([{"a": "int"}, "int"])] {
            let error = compile(&document).unwrap_err();
            assert!(matches!(error, NotationError::AmbiguousSequence { .. }), "{}", document);
        }
    }

    #[test]
    fn test_directives() {
        let spec = compile(&json!({"$tuple": ["str", "int", "str"]})).unwrap();
        assert_eq!(spec.to_string(), "(str, int, str)");

        let spec = compile(&json!({"$or": [{"count": "int"}, "float"]})).unwrap();
        assert_eq!(spec.to_string(), "{'count': int} | float");

        let spec = compile(&json!({"$optional": ["str"]})).unwrap();
        assert!(spec.accepts_absent());

        let spec = compile(&json!({"$mapping": {"$or": "int"}})).unwrap();
        assert_eq!(spec.to_string(), "{'$or': int}");
    }

    #[test]
    fn test_directive_errors_carry_path() {
        let error = compile(&json!({"a": {"$or": []}})).unwrap_err();
        assert_eq!(error.path().render(), "['a']['$or']");
        assert!(matches!(
            error,
            NotationError::Spec {
                source: SpecError::EmptyAlternation,
                ..
            }
        ));

        let error = compile(&json!({"$tuple": "int"})).unwrap_err();
        assert!(matches!(error, NotationError::InvalidDirective { .. }));
    }

    #[test]
    fn test_scalars_are_not_schemas() {
        let error = compile(&json!({"a": 5})).unwrap_err();
        assert_eq!(
            error.to_string(),
            "at $['a']: int is not a schema; expected a type name, object or array"
        );
    }

    #[test]
    fn test_to_notation_shorthands() {
        let compiler = SchemaCompiler::new();
        let document = json!({
            "hello": "int",
            "optional": {"$optional": "int"},
            "pair": ["str", "null"],
            "world": {"people": ["str"], "slots": {"$tuple": ["str", "int"]}}
        });
        let spec = compiler.compile(&document).unwrap();
        assert_eq!(compiler.to_notation(&spec)["world"], document["world"]);
        assert_eq!(compiler.to_notation(&spec)["pair"], json!(["str", "null"]));
        // `$optional` over an exact type prints as the pair shorthand
        assert_eq!(compiler.to_notation(&spec)["optional"], json!(["int", "null"]));
        assert_eq!(compiler.compile(&compiler.to_notation(&spec)).unwrap(), spec);
    }
}
