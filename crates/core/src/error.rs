//! Error types for Proscore operations.
//!
//! Analysis itself is total: [`crate::analyze`] never fails. The error type
//! [`ProscoreError`] covers the fallible edges around it, namely loading and
//! validating configuration, compiling custom language patterns, and
//! serializing reports.
//!
//! # Example
//!
//! ```rust
//! use proscore_core::{AnalyzerConfig, ProscoreError};
//!
//! match AnalyzerConfig::from_json(r#"{ "site_base_url": "not a url" }"#) {
//!     Ok(_) => unreachable!(),
//!     Err(ProscoreError::InvalidUrl(msg)) => println!("bad base url: {}", msg),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Proscore.
#[derive(Error, Debug)]
pub enum ProscoreError {
    /// Invalid URL provided.
    ///
    /// Returned when the configured site base URL cannot be parsed as an
    /// absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration errors.
    ///
    /// Returned when a configuration document is malformed or contains
    /// inconsistent thresholds.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors while reading configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A language pattern failed to compile.
    #[error("Invalid language pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Language code is not one of the registered languages.
    ///
    /// Only produced by strict parsing through [`std::str::FromStr`]; analysis
    /// falls back to English instead of returning this.
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for ProscoreError.
pub type Result<T> = std::result::Result<T, ProscoreError>;
