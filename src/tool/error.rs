//! Tool-specific error types.
//!
//! Errors raised by the tool layer (version parsing, registry lookup and
//! provider operations) are returned as values so the command layer can
//! decide what is fatal.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Version string is not three dot-separated segments
    #[error("{input} can not be parsed as SemVer")]
    InvalidVersion { input: String },

    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Source answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The release listing contained no usable version
    #[error("No releases found at {url}")]
    NoReleases { url: String },

    /// Operation timed out
    #[error("Operation timed out after {elapsed:?}: {operation}")]
    Timeout {
        operation: String,
        elapsed: Duration,
    },

    /// Capability is declared but the provider does not implement it yet
    #[error("{operation} is not yet implemented for {tool}")]
    NotImplemented { tool: String, operation: String },

    /// Unknown tool name
    #[error("Unknown tool: {name}. Supported tools: {supported:?}")]
    UnknownTool {
        name: String,
        supported: Vec<String>,
    },

    /// Path handed to a provider escapes the install location
    #[error("Refusing to touch {}: outside of install location {}", .path.display(), .install_dir.display())]
    InvalidPath { path: PathBuf, install_dir: PathBuf },

    /// Filesystem error while installing or removing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// Create an invalid version error
    pub fn invalid_version(input: impl Into<String>) -> Self {
        Self::InvalidVersion {
            input: input.into(),
        }
    }

    /// Create an API error from status code and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a not implemented error
    pub fn not_implemented(tool: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            tool: tool.into(),
            operation: operation.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for tool operations
pub type ToolResult<T> = std::result::Result<T, ToolError>;
