//! In-memory cache of compiled schemas
//!
//! Entries are keyed by canonical path and invalidated whenever the
//! file's modification time differs from the one recorded at insertion.
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use shapeguard_core::SchemaSpec;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Cached compiled schema and its file metadata
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The compiled schema
    pub spec: Arc<SchemaSpec>,
    /// File modification time when cached
    pub file_mtime: SystemTime,
    /// Canonical file path
    pub file_path: PathBuf,
}

impl CacheEntry {
    pub fn new(spec: Arc<SchemaSpec>, file_path: PathBuf, file_mtime: SystemTime) -> Self {
        Self {
            spec,
            file_mtime,
            file_path,
        }
    }

    /// Whether the file has not changed since it was cached
    pub fn is_valid(&self, current_mtime: SystemTime) -> bool {
        current_mtime == self.file_mtime
    }
}

/// Configuration for cache behavior
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum cache size (number of entries)
    pub max_entries: usize,
    /// Whether to enable cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            enabled: true,
        }
    }
}

/// LRU cache of compiled schemas
#[derive(Debug)]
pub struct SchemaCache {
    entries: HashMap<PathBuf, CacheEntry>,
    config: CacheConfig,
    access_order: Vec<PathBuf>,
    hits: u64,
    misses: u64,
}

impl SchemaCache {
    /// Create a new schema cache with default configuration
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a new schema cache with custom configuration
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            access_order: Vec::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Get a cached schema if it exists and the file is unchanged
    pub fn get(&mut self, path: &Path) -> LoaderResult<Option<Arc<SchemaSpec>>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let canonical_path = canonicalize(path)?;
        let valid = match self.entries.get(&canonical_path) {
            Some(entry) => entry.is_valid(modified_time(path)?),
            None => false,
        };

        if valid {
            self.hits += 1;
            self.touch(&canonical_path);
            Ok(self.entries.get(&canonical_path).map(|entry| Arc::clone(&entry.spec)))
        } else {
            self.misses += 1;
            self.remove_path(&canonical_path);
            Ok(None)
        }
    }

    /// Cache a compiled schema
    pub fn put(&mut self, path: &Path, spec: Arc<SchemaSpec>) -> LoaderResult<()> {
        if !self.config.enabled || self.config.max_entries == 0 {
            return Ok(());
        }

        let canonical_path = canonicalize(path)?;
        let entry = CacheEntry::new(spec, canonical_path.clone(), modified_time(path)?);

        if !self.entries.contains_key(&canonical_path)
            && self.entries.len() >= self.config.max_entries
        {
            self.evict_lru();
        }

        self.entries.insert(canonical_path.clone(), entry);
        self.touch(&canonical_path);
        Ok(())
    }

    /// Remove a specific entry from cache
    pub fn remove(&mut self, path: &Path) -> LoaderResult<bool> {
        let canonical_path = canonicalize(path)?;
        let removed = self.entries.contains_key(&canonical_path);
        self.remove_path(&canonical_path);
        Ok(removed)
    }

    /// Check if cache contains a path
    pub fn contains(&self, path: &Path) -> LoaderResult<bool> {
        Ok(self.entries.contains_key(&canonicalize(path)?))
    }

    /// Clear all cache entries
    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            max_entries: self.config.max_entries,
            hits: self.hits,
            misses: self.misses,
            enabled: self.config.enabled,
        }
    }

    fn evict_lru(&mut self) {
        if let Some(oldest_path) = self.access_order.first().cloned() {
            self.remove_path(&oldest_path);
        }
    }

    fn touch(&mut self, path: &Path) {
        self.access_order.retain(|p| p != path);
        self.access_order.push(path.to_path_buf());
    }

    fn remove_path(&mut self, path: &Path) {
        self.entries.remove(path);
        self.access_order.retain(|p| p != path);
    }
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new()
    }
}

fn canonicalize(path: &Path) -> LoaderResult<PathBuf> {
    path.canonicalize()
        .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))
}

fn modified_time(path: &Path) -> LoaderResult<SystemTime> {
    std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))
}

/// Cache statistics for monitoring and debugging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub max_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub enabled: bool,
}

impl CacheStats {
    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}
