//! Tool provider abstraction layer.
//!
//! Every managed tool is backed by a provider implementing the [`Tool`]
//! trait. The registry creates providers by the name declared in the
//! configuration file.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  ToolRegistry   │  ← Creates providers by name
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    dyn Tool     │  ← Common interface
//! └────────┬────────┘
//!          │
//!          ▼
//!    ┌───────────┐
//!    │ Terraform │  ← Implementations
//!    └───────────┘
//! ```
//!
//! # Adding a New Tool
//!
//! 1. Create a new module (e.g., `kubectl.rs`)
//! 2. Implement the `Tool` trait
//! 3. Implement the `ToolFactory` trait
//! 4. Add a `ToolKind` variant and register in `ToolRegistry::register_defaults()`

pub mod config;
pub mod error;
pub mod registry;
pub mod terraform;
pub mod version;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub use config::{ToolKind, ToolTimeouts};
pub use error::{ToolError, ToolResult};
pub use registry::ToolRegistry;
pub use version::{SemVer, VersionRequest};

use crate::config::{AppConfig, ToolEntry};

/// Where a tool lives on disk and which version it is.
///
/// Passed explicitly to `update` and `remove` so providers never have to
/// remember what they installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledTool {
    pub name: String,
    pub path: PathBuf,
    pub version: Option<SemVer>,
}

impl InstalledTool {
    /// Record for `name` inside `install_dir`.
    pub fn new(name: impl Into<String>, install_dir: &Path, version: Option<SemVer>) -> Self {
        let name = name.into();
        Self {
            path: install_dir.join(&name),
            name,
            version,
        }
    }

    /// Record for a provider's binary inside the configured install location.
    ///
    /// The file is named after the provider, whatever casing the configuration
    /// uses. Installed versions are not tracked on disk, so the version is
    /// unknown.
    pub fn locate(config: &AppConfig, tool: &dyn Tool) -> Self {
        Self::new(tool.name(), &config.install_dir(), None)
    }

    /// Directory the tool is installed in.
    pub fn install_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Core trait that all tool providers must implement.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name
    fn name(&self) -> &'static str;

    /// Query `src_url` for the newest available version.
    ///
    /// Must not touch local state.
    async fn latest_version(&self, src_url: &str) -> ToolResult<SemVer>;

    /// Fetch `version` from `src_url` and install it into `install_dir`.
    async fn install(
        &self,
        src_url: &str,
        version: &SemVer,
        install_dir: &Path,
    ) -> ToolResult<InstalledTool>;

    /// Move an installed tool to `version`.
    ///
    /// No-op when `current` already is at `version`, otherwise installs
    /// `version` next to `current`.
    async fn update(
        &self,
        src_url: &str,
        version: &SemVer,
        current: &InstalledTool,
    ) -> ToolResult<InstalledTool> {
        if current.version.as_ref() == Some(version) {
            tracing::debug!("{} already at {}", current.name, version);
            return Ok(current.clone());
        }
        self.install(src_url, version, current.install_dir()).await
    }

    /// Uninstall the tool described by `installed`.
    ///
    /// This operation is idempotent - removing a tool that is not present
    /// should succeed silently.
    async fn remove(&self, installed: &InstalledTool) -> ToolResult<()>;
}

/// Create the provider for a declared tool.
///
/// # Example
///
/// ```ignore
/// let entry = config.find_tool("terraform")?;
/// let tool = create_tool(entry, &ToolTimeouts::default())?;
/// let latest = tool.latest_version(&entry.src_location).await?;
/// ```
pub fn create_tool(entry: &ToolEntry, timeouts: &ToolTimeouts) -> ToolResult<Box<dyn Tool>> {
    ToolRegistry::with_defaults().create_by_name(&entry.name, timeouts)
}

/// Resolve the version a declared tool asks for, querying the source for
/// `latest`.
pub async fn resolve_version(tool: &dyn Tool, entry: &ToolEntry) -> ToolResult<SemVer> {
    match entry.version_request()? {
        VersionRequest::Exact(version) => Ok(version),
        VersionRequest::Latest => tool.latest_version(&entry.src_location).await,
    }
}
