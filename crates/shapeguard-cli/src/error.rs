//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! the failure modes of the CLI application.

use shapeguard_schemas::LoaderError;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Schema or value document could not be loaded
    #[error("{0}")]
    Loader(#[from] LoaderError),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Schema name did not resolve to a file
    #[error("Schema '{}' not found; searched: {}", name, searched.join(", "))]
    SchemaNotFound { name: String, searched: Vec<String> },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// One or more documents did not match the schema
    #[error("{failed} of {total} document(s) failed schema validation")]
    ValidationFailed { failed: usize, total: usize },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::ValidationFailed { .. } => 2,
            Self::FileNotFound { .. } => 3,
            Self::Loader(_) => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::SchemaNotFound { .. } => 7,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let error = Error::ValidationFailed { failed: 1, total: 3 };
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "1 of 3 document(s) failed schema validation");

        let error = Error::FileNotFound {
            path: PathBuf::from("missing.json"),
        };
        assert_eq!(error.exit_code(), 3);
        assert!(!error.should_show_help());

        assert!(Error::invalid_args("bad").should_show_help());
    }

    #[test]
    fn test_schema_not_found_lists_candidates() {
        let error = Error::SchemaNotFound {
            name: "greeting".to_string(),
            searched: vec!["schemas/greeting.yaml".to_string(), "schemas/greeting.json".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Schema 'greeting' not found; searched: schemas/greeting.yaml, schemas/greeting.json"
        );
    }

    #[test]
    fn test_format_error_plain() {
        let error = Error::config("unsupported config format");
        assert_eq!(
            format_error(&error, false),
            "Error: Configuration error: unsupported config format"
        );
    }
}
