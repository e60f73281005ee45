//! Schema loader with format detection and caching
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::loader::{
    cache::{CacheConfig, CacheStats, SchemaCache},
    error::{LoaderError, LoaderResult},
    parser::DocumentParser,
};
use crate::notation::SchemaCompiler;
use serde_json::Value;
use shapeguard_core::SchemaSpec;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Configuration for schema loader behavior
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Cache configuration
    pub cache: CacheConfig,
    /// Base directory for relative paths
    pub base_dir: Option<PathBuf>,
}

/// Loads schema and value documents from disk
#[derive(Debug)]
pub struct SchemaLoader {
    config: LoaderConfig,
    cache: SchemaCache,
    parser: DocumentParser,
    compiler: SchemaCompiler,
}

impl SchemaLoader {
    /// Create a new schema loader with default configuration
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a new schema loader with custom configuration
    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            cache: SchemaCache::with_config(config.cache.clone()),
            parser: DocumentParser::new(),
            compiler: SchemaCompiler::new(),
            config,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load and compile a schema document, reusing a cached compilation
    /// while the file is unchanged
    pub fn load_schema(&mut self, path: &Path) -> LoaderResult<Arc<SchemaSpec>> {
        let path = self.resolve_path(path);

        if let Some(spec) = self.cache.get(&path)? {
            trace!(path = %path.display(), "schema cache hit");
            return Ok(spec);
        }

        debug!(path = %path.display(), "loading schema");
        let document = self.parser.parse_file(&path)?;
        let spec = self
            .compiler
            .compile(&document)
            .map(Arc::new)
            .map_err(|e| LoaderError::notation(path.clone(), e))?;
        debug!(
            path = %path.display(),
            kind = spec.kind_name(),
            depth = spec.depth(),
            "compiled schema"
        );

        self.cache.put(&path, Arc::clone(&spec))?;
        Ok(spec)
    }

    /// Load a value document, never cached
    pub fn load_value(&self, path: &Path) -> LoaderResult<Value> {
        let path = self.resolve_path(path);
        debug!(path = %path.display(), "loading value document");
        self.parser.parse_file(&path)
    }

    /// Reload a schema, bypassing cache
    pub fn reload_schema(&mut self, path: &Path) -> LoaderResult<Arc<SchemaSpec>> {
        let resolved = self.resolve_path(path);
        self.cache.remove(&resolved)?;
        self.load_schema(path)
    }

    /// Check if a schema is cached
    pub fn is_cached(&self, path: &Path) -> LoaderResult<bool> {
        self.cache.contains(&self.resolve_path(path))
    }

    /// Clear all caches
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.config.base_dir {
            Some(base_dir) if path.is_relative() => base_dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeguard_core::ValueType;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_schema_is_cached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        fs::write(&path, "hello: int\n").unwrap();

        let mut loader = SchemaLoader::new();
        let first = loader.load_schema(&path).unwrap();
        let second = loader.load_schema(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(loader.is_cached(&path).unwrap());

        loader.clear_cache();
        assert!(!loader.is_cached(&path).unwrap());
    }

    #[test]
    fn test_base_dir_resolution() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("names.json"), r#"["str"]"#).unwrap();

        let mut loader = SchemaLoader::with_config(LoaderConfig {
            base_dir: Some(dir.path().to_path_buf()),
            ..LoaderConfig::default()
        });
        let spec = loader.load_schema(Path::new("names.json")).unwrap();
        assert_eq!(*spec, SchemaSpec::list_of(ValueType::Str));
    }

    #[test]
    fn test_notation_error_reports_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "a: [int, str, int]\n").unwrap();

        let error = SchemaLoader::new().load_schema(&path).unwrap_err();
        assert!(matches!(error, LoaderError::Notation { .. }));
        assert_eq!(error.path(), &path);
    }
}
