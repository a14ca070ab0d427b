//! Error types for Summarist operations.
//!
//! This module defines the main error type [`SummaristError`] which covers
//! page loading, content extraction, sanitization and the outbound
//! clipboard and browser hand-off.
//!
//! # Example
//!
//! ```rust
//! use summarist_core::{SummaristError, Result};
//!
//! fn require_content(raw: &str) -> Result<&str> {
//!     if raw.trim().is_empty() {
//!         return Err(SummaristError::ExtractionUnavailable);
//!     }
//!     Ok(raw)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::sources::SourceKind;

/// Main error type for Summarist operations.
#[derive(Error, Debug)]
pub enum SummaristError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures and connection issues.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML rewriting or selector errors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No source produced any content.
    ///
    /// Every source was exhausted, or the resolution deadline passed first.
    #[error("Could not detect content. Please ensure you are on a post or page.")]
    ExtractionUnavailable,

    /// A single source failed while probing or retrieving.
    ///
    /// The resolver recovers from this by moving on to the next source.
    #[error("{kind} source failed: {reason}")]
    SourceProbe { kind: SourceKind, reason: String },

    /// The system clipboard could not be written.
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    /// The browsing context could not be opened.
    #[error("Could not open a browser window. Please allow popups to use the summarizer.")]
    PopupBlocked,

    /// The browsing context failed to navigate.
    #[error("Failed to open {url}: {reason}")]
    Launch { url: String, reason: String },

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file errors.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<toml::de::Error> for SummaristError {
    fn from(err: toml::de::Error) -> Self {
        SummaristError::ConfigError(err.to_string())
    }
}

/// Result type alias for SummaristError.
pub type Result<T> = std::result::Result<T, SummaristError>;
