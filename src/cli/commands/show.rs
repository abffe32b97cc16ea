use std::path::Path;

use console::style;

use crate::config::AppConfig;
use crate::error::Result;

pub fn execute(config: &AppConfig, path: &Path) -> Result<()> {
    tracing::info!("Using configuration {}", path.display());
    print!("{}", render(config, path)?);
    Ok(())
}

fn render(config: &AppConfig, path: &Path) -> Result<String> {
    Ok(format!(
        "{}\n\n{}\nConfig file: {}\n",
        style("Current Configuration").bold().cyan(),
        config.to_yaml()?,
        style(path.display()).dim()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_config() {
        let path = Path::new("/home/me/.doa.yaml");
        let output = console::strip_ansi_codes(&render(&AppConfig::default(), path).unwrap()).into_owned();

        assert!(output.starts_with("Current Configuration"));
        assert!(output.contains("doa_api_version: v1"));
        assert!(output.contains("install_location:"));
        assert!(output.contains("doa/bin"));
        assert!(output.contains("name: terraform"));
        assert!(output.contains("releases.hashicorp.com/terraform"));
        assert!(output.contains("version: latest"));
        assert!(output.ends_with("Config file: /home/me/.doa.yaml\n"));
    }

    #[test]
    fn test_render_loaded_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".doa.yaml");
        std::fs::write(
            &path,
            "install_location: /opt/doa/bin\nspec:\n  tools:\n    - name: terraform\n      src_location: https://mirror.example.com/terraform\n      version: 1.9.5\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        let output = console::strip_ansi_codes(&render(&config, &path).unwrap()).into_owned();
        assert!(output.contains("install_location: /opt/doa/bin"));
        assert!(output.contains("version: 1.9.5"));
        assert!(output.contains("mirror.example.com/terraform"));
    }
}
