use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{DoaError, Result};
use crate::tool::VersionRequest;
use crate::utils::expand_path;

pub const DEFAULT_CONFIG_PATH: &str = "~/.doa.yaml";
pub const API_VERSION: &str = "v1";

/// Settings document stored in `~/.doa.yaml`.
///
/// Fields missing from the file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub doa_api_version: String,
    pub install_location: String,
    pub spec: ToolsSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsSpec {
    pub tools: Vec<ToolEntry>,
}

/// A tool declared in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub src_location: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    VersionRequest::LATEST.to_string()
}

impl ToolEntry {
    /// Parse the `version` field.
    pub fn version_request(&self) -> crate::tool::ToolResult<VersionRequest> {
        self.version.parse()
    }
}

impl Default for ToolsSpec {
    fn default() -> Self {
        Self {
            tools: vec![ToolEntry {
                name: "terraform".to_string(),
                src_location: "https://releases.hashicorp.com/terraform".to_string(),
                version: default_version(),
            }],
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            doa_api_version: API_VERSION.to_string(),
            install_location: shellexpand::tilde("~/doa/bin").to_string(),
            spec: ToolsSpec::default(),
        }
    }
}

impl AppConfig {
    /// Resolve the configuration path given on the command line.
    pub fn config_path(raw: &str) -> PathBuf {
        expand_path(raw)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DoaError::Config(format!(
                "Config file not found: {}. Run 'doa init' first.",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content).map_err(|e| {
            DoaError::Config(format!("Invalid config {}: {}", path.display(), e))
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write the configuration to a new file at `path`.
    ///
    /// Never overwrites: an existing file yields `AlreadyInitialized` and is
    /// left untouched. The content goes to a temporary file next to `path`
    /// first, so a failed write leaves nothing behind.
    pub fn save_new(&self, path: &Path) -> Result<()> {
        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        let content = serde_yaml::to_string(self)
            .map_err(|e| DoaError::Config(format!("Failed to serialize config: {}", e)))?;

        // Temporary files are created owner-only (0600 on unix)
        let mut file = tempfile::NamedTempFile::new_in(parent)?;
        file.write_all(content.as_bytes())?;
        file.as_file().sync_all()?;

        match file.persist_noclobber(path) {
            Ok(_) => Ok(()),
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(DoaError::AlreadyInitialized {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => Err(e.error.into()),
        }
    }

    /// Render the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| DoaError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Install location with `~` expanded.
    pub fn install_dir(&self) -> PathBuf {
        expand_path(&self.install_location)
    }

    /// Look up a declared tool by name (case-insensitive).
    pub fn find_tool(&self, name: &str) -> Result<&ToolEntry> {
        self.spec
            .tools
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| DoaError::ToolNotConfigured {
                name: name.to_string(),
                available: self.tool_names(),
            })
    }

    /// Declared tools matching `name`, or every declared tool when `None`.
    pub fn select_tools(&self, name: Option<&str>) -> Result<Vec<&ToolEntry>> {
        match name {
            Some(name) => Ok(vec![self.find_tool(name)?]),
            None => Ok(self.spec.tools.iter().collect()),
        }
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.spec.tools.iter().map(|t| t.name.clone()).collect()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.doa_api_version != API_VERSION {
            return Err(DoaError::Config(format!(
                "Unsupported doa_api_version '{}'. Supported: {}",
                self.doa_api_version, API_VERSION
            )));
        }

        if self.install_location.trim().is_empty() {
            return Err(DoaError::Config(
                "install_location must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for tool in &self.spec.tools {
            if tool.name.trim().is_empty() {
                return Err(DoaError::Config("Tool name must not be empty".to_string()));
            }

            if !seen.insert(tool.name.to_lowercase()) {
                return Err(DoaError::Config(format!(
                    "Tool '{}' is declared more than once",
                    tool.name
                )));
            }

            if tool.src_location.trim().is_empty() {
                return Err(DoaError::Config(format!(
                    "Tool '{}' has an empty src_location",
                    tool.name
                )));
            }

            if let Err(e) = tool.version_request() {
                return Err(DoaError::Config(format!(
                    "Invalid version for tool '{}': {}. Use 'latest' or MAJOR.MINOR.PATCH",
                    tool.name, e
                )));
            }
        }

        Ok(())
    }
}
