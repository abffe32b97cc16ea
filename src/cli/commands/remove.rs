use console::style;

use crate::config::AppConfig;
use crate::error::Result;
use crate::tool::{create_tool, InstalledTool, ToolTimeouts};

pub async fn execute(config: &AppConfig, name: &str, timeouts: &ToolTimeouts) -> Result<()> {
    let entry = config.find_tool(name)?;
    let tool = create_tool(entry, timeouts)?;
    let installed = InstalledTool::locate(config, tool.as_ref());

    tracing::info!("Removing {} from {}", entry.name, installed.path.display());
    tool.remove(&installed).await?;

    println!(
        "  {} Removed {}",
        style("✓").green().bold(),
        style(&entry.name).white().bold()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DoaError;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            install_location: dir.to_str().unwrap().to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_remove_deletes_binary() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("terraform");
        std::fs::write(&binary, b"binary").unwrap();

        execute(&config_in(dir.path()), "terraform", &ToolTimeouts::default())
            .await
            .unwrap();
        assert!(!binary.exists());
    }

    #[tokio::test]
    async fn test_remove_twice_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        execute(&config, "terraform", &ToolTimeouts::default())
            .await
            .unwrap();
        execute(&config, "terraform", &ToolTimeouts::default())
            .await
            .unwrap();
    }

    // Needs a case-sensitive filesystem
    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_remove_uses_provider_binary_name() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("terraform");
        let stray = dir.path().join("Terraform");
        std::fs::write(&binary, b"binary").unwrap();
        std::fs::write(&stray, b"keep").unwrap();

        let mut config = config_in(dir.path());
        config.spec.tools[0].name = "Terraform".to_string();

        execute(&config, "terraform", &ToolTimeouts::default())
            .await
            .unwrap();
        assert!(!binary.exists());
        assert!(stray.exists());
    }

    #[tokio::test]
    async fn test_remove_undeclared_tool() {
        let dir = tempfile::tempdir().unwrap();
        let result = execute(&config_in(dir.path()), "vault", &ToolTimeouts::default()).await;
        assert!(matches!(result, Err(DoaError::ToolNotConfigured { .. })));
    }
}
