//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use shapeguard_schemas::Format;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory searched for schemas when the config names none
const LOCAL_SCHEMAS_DIR: &str = "schemas";

/// Resolve a schema argument to a file.
///
/// An existing path wins. Otherwise `name` is looked up as `<name>.yaml`,
/// `<name>.yml` or `<name>.json` in the configured schemas directory and
/// then in `./schemas`.
pub fn resolve_schema_path(name: &str, config: &Config) -> Result<PathBuf> {
    let literal = Path::new(name);
    if literal.is_file() {
        return Ok(literal.to_path_buf());
    }

    let candidates = schema_candidates(name, config);
    debug!(schema = name, candidates = candidates.len(), "Searching for named schema");

    candidates
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .ok_or_else(|| Error::SchemaNotFound {
            name: name.to_string(),
            searched: candidates.iter().map(|p| p.display().to_string()).collect(),
        })
}

fn schema_candidates(name: &str, config: &Config) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = &config.paths.schemas_dir {
        dirs.push(dir.clone());
    }
    dirs.push(PathBuf::from(LOCAL_SCHEMAS_DIR));

    let extensions = Format::Yaml
        .extensions()
        .iter()
        .chain(Format::Json.extensions());

    let mut candidates = Vec::new();
    for dir in &dirs {
        for extension in extensions.clone() {
            candidates.push(dir.join(format!("{}.{}", name, extension)));
        }
    }
    candidates
}

/// Fail with [`Error::FileNotFound`] unless `path` exists
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
