use std::path::PathBuf;

use thiserror::Error;

use crate::tool::ToolError;

#[derive(Error, Debug)]
pub enum DoaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Skipping initialization: config file {} already exists", .path.display())]
    AlreadyInitialized { path: PathBuf },

    #[error("Tool '{name}' is not declared in the configuration. Declared tools: {available:?}")]
    ToolNotConfigured {
        name: String,
        available: Vec<String>,
    },

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DoaError>;
