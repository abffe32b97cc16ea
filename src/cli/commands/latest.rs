use console::style;

use crate::config::{AppConfig, ToolEntry};
use crate::error::Result;
use crate::tool::{create_tool, SemVer, ToolTimeouts};

pub async fn execute(config: &AppConfig, name: &str, timeouts: &ToolTimeouts) -> Result<()> {
    let latest = latest_version(config, name, timeouts).await?;
    let entry = config.find_tool(name)?;

    println!(
        "  {} {} {}",
        style("●").green().bold(),
        style(&entry.name).white().bold(),
        style(&latest).cyan()
    );
    if let Some(pinned) = outdated_pin(entry, &latest)? {
        println!(
            "  {}  {} {}",
            style("Pinned").dim(),
            style(pinned).yellow(),
            style("(newer release available)").dim()
        );
    }

    Ok(())
}

/// The pinned version of `entry` when it is older than `latest`.
fn outdated_pin(entry: &ToolEntry, latest: &SemVer) -> Result<Option<SemVer>> {
    Ok(entry
        .version_request()?
        .exact()
        .filter(|pinned| *pinned < latest)
        .cloned())
}

pub async fn latest_version(
    config: &AppConfig,
    name: &str,
    timeouts: &ToolTimeouts,
) -> Result<SemVer> {
    let entry = config.find_tool(name)?;
    let tool = create_tool(entry, timeouts)?;

    tracing::info!("Checking {} for the latest {}", entry.src_location, entry.name);
    Ok(tool.latest_version(&entry.src_location).await?)
}
