//! Tool provider configuration types.

use std::time::Duration;

use super::error::ToolError;

/// Timeout configuration for tool operations.
///
/// Every HTTP call a provider makes is bounded by these values.
#[derive(Debug, Clone)]
pub struct ToolTimeouts {
    /// HTTP request timeout (whole request, body included)
    pub http_request: Duration,

    /// TCP connect timeout
    pub http_connect: Duration,
}

impl Default for ToolTimeouts {
    fn default() -> Self {
        Self {
            http_request: Duration::from_secs(30),
            http_connect: Duration::from_secs(10),
        }
    }
}

impl ToolTimeouts {
    /// Override the request timeout, keeping the connect timeout no larger
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.http_request = timeout;
        self.http_connect = self.http_connect.min(timeout);
        self
    }
}

/// Supported tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Terraform,
}

impl ToolKind {
    /// Get all supported tool kinds
    pub fn all() -> &'static [ToolKind] {
        &[Self::Terraform]
    }

    /// Get tool name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Terraform => "terraform",
        }
    }

    /// Get list of supported tool names
    pub fn supported_names() -> Vec<String> {
        Self::all().iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ToolKind {
    type Err = ToolError;

    /// Parse the tool name declared in the configuration (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ToolError::UnknownTool {
                name: s.to_string(),
                supported: Self::supported_names(),
            })
    }
}
