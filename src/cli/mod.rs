pub mod commands;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::error::Result;
use crate::tool::ToolTimeouts;

#[derive(Parser)]
#[command(name = "doa")]
#[command(version)]
#[command(about = "DOA - DevOps Assistant")]
#[command(long_about = "The DevOps Assistant is a tool designed to make getting all of the tooling that you use as a DevOps Engineer and/or an SRE easy.\n\nRun without a subcommand to print the active configuration.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// The configuration file to read from
    #[arg(short = 'f', long, global = true, env = "DOA_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// HTTP timeout in seconds for tool sources
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize DOA
    Init,

    /// Show the latest available version of a tool
    Latest {
        /// Tool name as declared in the configuration
        tool: String,
    },

    /// Install tools in an AdHoc fashion
    Install {
        /// Tool to install (default: every declared tool)
        tool: Option<String>,
    },

    /// Update installed tools to their declared version
    Update {
        /// Tool to update (default: every declared tool)
        tool: Option<String>,
    },

    /// Remove tools in an AdHoc fashion
    Remove {
        /// Tool to remove
        tool: String,
    },
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        AppConfig::config_path(&self.config)
    }

    pub fn timeouts(&self) -> ToolTimeouts {
        ToolTimeouts::default().with_request_timeout(Duration::from_secs(self.timeout.max(1)))
    }

    pub async fn execute(self) -> Result<()> {
        let path = self.config_path();
        let timeouts = self.timeouts();

        match self.command {
            None => {
                let config = load_config(&path)?;
                commands::show::execute(&config, &path)
            }
            Some(Commands::Init) => commands::init::execute(&path).await,
            Some(Commands::Latest { tool }) => {
                let config = load_config(&path)?;
                commands::latest::execute(&config, &tool, &timeouts).await
            }
            Some(Commands::Install { tool }) => {
                let config = load_config(&path)?;
                commands::install::install(&config, tool.as_deref(), &timeouts).await
            }
            Some(Commands::Update { tool }) => {
                let config = load_config(&path)?;
                commands::install::update(&config, tool.as_deref(), &timeouts).await
            }
            Some(Commands::Remove { tool }) => {
                let config = load_config(&path)?;
                commands::remove::execute(&config, &tool, &timeouts).await
            }
        }
    }
}

fn load_config(path: &Path) -> Result<AppConfig> {
    let config = AppConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults() {
        let cli = Cli::try_parse_from(["doa"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.timeout, 30);
        assert!(!cli.verbose);
        assert!(cli.config_path().ends_with(".doa.yaml"));
    }

    #[test]
    fn test_config_flag_short_and_global() {
        let cli = Cli::try_parse_from(["doa", "-f", "/tmp/doa.yaml"]).unwrap();
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/doa.yaml"));

        let cli = Cli::try_parse_from(["doa", "init", "--config", "/tmp/other.yaml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init)));
        assert_eq!(cli.config, "/tmp/other.yaml");
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["doa", "install"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Install { tool: None })));

        let cli = Cli::try_parse_from(["doa", "update", "terraform"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Update { tool: Some(ref t) }) if t == "terraform"));

        let cli = Cli::try_parse_from(["doa", "remove", "terraform"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Remove { ref tool }) if tool == "terraform"));

        assert!(Cli::try_parse_from(["doa", "remove"]).is_err());
        assert!(Cli::try_parse_from(["doa", "latest"]).is_err());
    }

    #[test]
    fn test_timeout_flag() {
        let cli = Cli::try_parse_from(["doa", "--timeout", "5", "latest", "terraform"]).unwrap();
        assert_eq!(cli.timeouts().http_request, Duration::from_secs(5));

        let cli = Cli::try_parse_from(["doa", "--timeout", "0"]).unwrap();
        assert_eq!(cli.timeouts().http_request, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_execute_without_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".doa.yaml");
        let cli = Cli::try_parse_from(["doa", "-f", path.to_str().unwrap()]).unwrap();

        let err = cli.execute().await.unwrap_err();
        assert!(err.to_string().contains("doa init"));
    }

    #[tokio::test]
    async fn test_execute_init_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".doa.yaml");
        let path = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["doa", "-f", path, "init"]).unwrap();
        cli.execute().await.unwrap();

        let cli = Cli::try_parse_from(["doa", "-f", path]).unwrap();
        cli.execute().await.unwrap();
    }
}
