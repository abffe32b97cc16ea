//! Tool registry for creating providers by name.
//!
//! Each provider registers a factory keyed by its [`ToolKind`]. Declared
//! tool names from the configuration file are resolved through here.

use std::collections::HashMap;
use std::sync::Arc;

use super::config::{ToolKind, ToolTimeouts};
use super::error::{ToolError, ToolResult};
use super::Tool;

/// Factory trait for creating tool providers.
pub trait ToolFactory: Send + Sync {
    /// Get the tool kind this factory creates
    fn kind(&self) -> ToolKind;

    /// Create a new provider instance
    fn create(&self, timeouts: &ToolTimeouts) -> ToolResult<Box<dyn Tool>>;
}

/// Registry for tool factories.
pub struct ToolRegistry {
    factories: HashMap<ToolKind, Arc<dyn ToolFactory>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with all built-in tools registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    /// Register all default tool factories
    pub fn register_defaults(&mut self) {
        use super::terraform::TerraformFactory;
        self.register(TerraformFactory);
    }

    /// Register a tool factory
    pub fn register<F: ToolFactory + 'static>(&mut self, factory: F) {
        self.factories.insert(factory.kind(), Arc::new(factory));
    }

    /// Create a provider by kind
    pub fn create(&self, kind: ToolKind, timeouts: &ToolTimeouts) -> ToolResult<Box<dyn Tool>> {
        let factory = self.factories.get(&kind).ok_or_else(|| ToolError::UnknownTool {
            name: kind.to_string(),
            supported: self.registered_names(),
        })?;

        factory.create(timeouts)
    }

    /// Create a provider by the name used in the configuration file
    pub fn create_by_name(&self, name: &str, timeouts: &ToolTimeouts) -> ToolResult<Box<dyn Tool>> {
        let kind: ToolKind = name.parse()?;
        self.create(kind, timeouts)
    }

    fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .factories
            .keys()
            .map(|k| k.as_str().to_string())
            .collect();
        names.sort();
        names
    }
}
