//! Schema loading and parsing functionality
//!
//! This module provides:
//! - YAML and JSON parsing with format detection
//! - Compilation of schema documents into [`shapeguard_core::SchemaSpec`]
//! - In-memory caching of compiled schemas
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use shapeguard_schemas::loader::SchemaLoader;
//! use std::path::Path;
//!
//! let mut loader = SchemaLoader::new();
//! let spec = loader.load_schema(Path::new("schema.yaml"))?;
//! let value = loader.load_value(Path::new("document.json"))?;
//! shapeguard_core::validate(&value, &spec)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

pub mod cache;
pub mod error;
pub mod parser;
pub mod schema_loader;

pub use cache::{CacheConfig, CacheEntry, CacheStats, SchemaCache};
pub use error::{LoaderError, LoaderResult};
pub use parser::{parse_schema_str, DocumentParser, Format};
pub use schema_loader::{LoaderConfig, SchemaLoader};
