use std::path::Path;

use console::style;

use crate::config::AppConfig;
use crate::error::Result;

/// Write the default configuration to `path`.
///
/// Fails with `AlreadyInitialized` when the file exists; the file is not
/// modified in that case.
pub async fn execute(path: &Path) -> Result<()> {
    tracing::info!("Initializing DOA...");

    let config = AppConfig::default();
    config.save_new(path)?;

    println!("{}", style("✓ Configuration saved!").green().bold());
    println!("Config file: {}", style(path.display()).dim());
    println!(
        "\nEdit {} to declare your tools, then run {}.",
        style("spec.tools").cyan(),
        style("doa install").cyan()
    );

    Ok(())
}
