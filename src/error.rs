//! Error types for pbxproj-localize.
//!
//! All operations return `Result<T>` which aliases `Result<T, LocalizeError>`.

use thiserror::Error;

/// Errors from localize operations.
#[derive(Debug, Error)]
pub enum LocalizeError {
    /// A rule in the table failed validation.
    #[error("Invalid rule '{0}': {1}")]
    InvalidRule(String, String),

    /// Rule file is valid TOML but has the wrong shape.
    #[error("Invalid rule file: {0}")]
    InvalidConfig(String),

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML parse error in a rule file.
    #[error("TOML error: {0}")]
    Toml(#[from] toml_edit::TomlError),

    /// Regex compilation failed.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pbxproj-localize operations.
pub type Result<T> = std::result::Result<T, LocalizeError>;
