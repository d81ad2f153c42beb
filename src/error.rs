//! Error types for user.js editing and related operations
//!
//! This module defines the error types used throughout the ffopt library.
//! All public functions return [`Result<T, Error>`] for consistent error handling.

use std::path::PathBuf;

/// Errors that can occur while reading, writing or managing override files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Lexer error during tokenization
    #[error("Lexer error at line {line}, column {column}: {message}")]
    Lexer {
        line: usize,
        column: usize,
        message: String,
    },

    /// Parser error during parsing
    #[error("Parser error at line {line}, column {column}: {message}")]
    Parser {
        line: usize,
        column: usize,
        message: String,
    },

    /// Category name not present in the catalog
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    /// Apply was called without any category
    #[error("No categories selected")]
    EmptySelection,

    /// The override file could not be created or written
    #[error("Cannot write to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Restore was requested but the backup slot is empty
    #[error("No backup found at {0}")]
    NoBackupFound(PathBuf),

    /// Remote version lookup failed (network, HTTP status or payload)
    #[error("Update check failed: {0}")]
    CheckFailed(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile not found
    #[error("Profile '{name}' not found in {directory}")]
    ProfileNotFound { name: String, directory: PathBuf },

    /// Invalid profile directory
    #[error("Invalid profile directory: {0}")]
    InvalidProfileDirectory(PathBuf),

    /// profiles.ini parsing error
    #[error("Failed to parse profiles.ini: {0}")]
    ProfilesIniParse(String),
}

/// Result type alias for convenience
///
/// # Example
///
/// ```rust
/// use ffopt::{Catalog, Result};
///
/// fn count_settings(category: &str) -> Result<usize> {
///     Ok(Catalog::builtin().entries_for(category)?.len())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
