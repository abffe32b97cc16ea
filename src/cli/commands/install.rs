use console::style;

use crate::config::AppConfig;
use crate::error::Result;
use crate::tool::{create_tool, resolve_version, InstalledTool, ToolTimeouts};

/// Install every selected tool at its declared version.
pub async fn install(config: &AppConfig, name: Option<&str>, timeouts: &ToolTimeouts) -> Result<()> {
    let install_dir = config.install_dir();

    for entry in config.select_tools(name)? {
        let tool = create_tool(entry, timeouts)?;
        let version = resolve_version(tool.as_ref(), entry).await?;

        tracing::info!(
            "Installing {} {} into {}",
            entry.name,
            version,
            install_dir.display()
        );
        let installed = tool
            .install(&entry.src_location, &version, &install_dir)
            .await?;

        print_done("Installed", &installed);
    }

    Ok(())
}

/// Bring every selected tool to its declared version.
pub async fn update(config: &AppConfig, name: Option<&str>, timeouts: &ToolTimeouts) -> Result<()> {
    for entry in config.select_tools(name)? {
        let tool = create_tool(entry, timeouts)?;
        let version = resolve_version(tool.as_ref(), entry).await?;
        let current = InstalledTool::locate(config, tool.as_ref());

        tracing::info!("Updating {} to {}", entry.name, version);
        let installed = tool.update(&entry.src_location, &version, &current).await?;

        print_done("Updated", &installed);
    }

    Ok(())
}

fn print_done(action: &str, installed: &InstalledTool) {
    let version = installed
        .version
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!(
        "  {} {} {} {}",
        style("✓").green().bold(),
        action,
        style(&installed.name).white().bold(),
        style(version).cyan()
    );
    println!("    {}", style(installed.path.display()).dim());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DoaError;
    use crate::tool::ToolError;

    fn pinned_config(install_location: &str) -> AppConfig {
        let mut config = AppConfig {
            install_location: install_location.to_string(),
            ..Default::default()
        };
        config.spec.tools[0].version = "1.9.5".to_string();
        config
    }

    #[tokio::test]
    async fn test_install_terraform_not_implemented() {
        let dir = tempfile::tempdir().unwrap();
        let config = pinned_config(dir.path().to_str().unwrap());

        let result = install(&config, Some("terraform"), &ToolTimeouts::default()).await;
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            DoaError::Tool(ToolError::NotImplemented { .. })
        ));
        assert!(err.to_string().contains("not yet implemented"));
    }

    #[tokio::test]
    async fn test_update_terraform_not_implemented() {
        let dir = tempfile::tempdir().unwrap();
        let config = pinned_config(dir.path().to_str().unwrap());

        let result = update(&config, None, &ToolTimeouts::default()).await;
        assert!(matches!(
            result,
            Err(DoaError::Tool(ToolError::NotImplemented { .. }))
        ));
    }

    #[tokio::test]
    async fn test_install_undeclared_tool() {
        let config = pinned_config("/opt/doa/bin");
        let result = install(&config, Some("vault"), &ToolTimeouts::default()).await;
        assert!(matches!(result, Err(DoaError::ToolNotConfigured { .. })));
    }
}
