//! Shapeguard Schemas - schema documents and loaders
//!
//! This crate turns JSON and YAML schema documents into
//! [`shapeguard_core::SchemaSpec`] trees:
//! - **Notation**: type names, mappings and directive objects
//! - **Loading**: format detection from file extensions
//! - **Caching**: compiled schemas are reused while files are unchanged
//!
//! ## Quick Start
//!
//! ```rust
//! use shapeguard_schemas::{parse_schema_str, Format};
//! use serde_json::json;
//!
//! let spec = parse_schema_str(
//!     "hello: int\nworld:\n  people: [str]\n",
//!     Format::Yaml,
//! ).unwrap();
//!
//! let value = json!({"hello": 5, "world": {"people": ["Me"]}});
//! assert!(shapeguard_core::validate(&value, &spec).is_ok());
//! ```
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

pub mod loader;
pub mod notation;

// Re-export commonly used types for convenience
pub use loader::{
    parse_schema_str, CacheStats, Format, LoaderConfig, LoaderError, LoaderResult, SchemaLoader,
};
pub use notation::{compile, NotationError, NotationResult, SchemaCompiler};
