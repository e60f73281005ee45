//! Shapeguard Core - structural validation of runtime values
//!
//! This crate checks that a `serde_json::Value` conforms to a declaratively
//! described shape and reports precise, path-qualified diagnostics when it
//! does not:
//! - **Exact types**: `int`, `float`, `str`, `null`, `any` and friends
//! - **Mappings**: closed-world key sets with optional keys
//! - **Sequences**: homogeneous (`[str, ...]`) or positional (`(str, int)`)
//! - **Alternation**: first matching branch wins
//!
//! ## Quick Start
//!
//! ```rust
//! use shapeguard_core::{validate, SchemaSpec, ValueType};
//! use serde_json::json;
//!
//! let spec = SchemaSpec::mapping_builder()
//!     .key("hello", ValueType::Int)
//!     .optional_key("optional", ValueType::Int)
//!     .key("world", SchemaSpec::mapping_builder()
//!         .key("people", SchemaSpec::list_of(ValueType::Str))
//!         .build()
//!         .unwrap())
//!     .build()
//!     .unwrap();
//!
//! let value = json!({"hello": 5, "world": {"people": ["Me"]}});
//! assert!(validate(&value, &spec).is_ok());
//!
//! let error = validate(&json!({"hello": 5, "world": {"people": "gone"}}), &spec).unwrap_err();
//! assert_eq!(error.path().to_string(), "$['world']['people']");
//! ```
//!
//! ## Matching Modes
//!
//! - **FailFast**: the first failure is returned (default)
//! - **CollectAll**: mapping keys and sequence elements keep being checked,
//!   optionally capped by `max_errors`
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

pub mod diagnostics;
pub mod error;
pub mod matcher;
pub mod path;
pub mod signature;
pub mod spec;
pub mod types;
pub mod validate;

// Re-export commonly used types for convenience
pub use diagnostics::{render, Diagnostic};
pub use error::{SchemaError, SchemaErrorKind, ValidationErrors, ValidationResult};
pub use matcher::{match_value, match_with_config, MatchConfig, MatchMode};
pub use path::{KeyPath, PathSegment};
pub use signature::{Signature, SignatureError};
pub use spec::{MappingBuilder, MappingSpec, SchemaSpec, SequenceSpec, SpecError};
pub use types::{UnknownTypeName, ValueType};
pub use validate::{validate, validate_batch, validate_owned, validate_with_config, Validator};
