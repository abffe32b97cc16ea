//! Terraform provider.
//!
//! Release discovery scrapes the HashiCorp release index, an HTML page with
//! one `<li><a href="/terraform/1.9.5/">terraform_1.9.5</a></li>` entry per
//! published version.

use std::ffi::OsStr;
use std::path::{Component, Path};
use std::sync::OnceLock;

use async_trait::async_trait;
use regex_lite::Regex;
use reqwest::Client;

use super::config::{ToolKind, ToolTimeouts};
use super::error::{ToolError, ToolResult};
use super::registry::ToolFactory;
use super::version::SemVer;
use super::{InstalledTool, Tool};
use crate::utils::truncate;

const LABEL_PREFIX: &str = "terraform_";

fn body_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?is)<body\b[^>]*>(.*)</body>").expect("body pattern is valid"))
}

fn list_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?is)<ul\b[^>]*>(.*?)</ul>").expect("list pattern is valid"))
}

fn release_link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)<li\b[^>]*>\s*<a\b[^>]*>([^<]*)</a>").expect("release link pattern is valid")
    })
}

#[derive(Debug)]
pub struct TerraformTool {
    client: Client,
    timeouts: ToolTimeouts,
}

impl TerraformTool {
    pub fn new(timeouts: &ToolTimeouts) -> ToolResult<Self> {
        let client = Client::builder()
            .timeout(timeouts.http_request)
            .connect_timeout(timeouts.http_connect)
            .user_agent(concat!("doa/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            timeouts: timeouts.clone(),
        })
    }

    async fn fetch_index(&self, src_url: &str) -> ToolResult<String> {
        tracing::debug!("Fetching Terraform release index from {}", src_url);

        let response = self
            .client
            .get(src_url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_request_error(e))?;

        if !status.is_success() {
            return Err(ToolError::api(status.as_u16(), truncate(body.trim(), 200)));
        }

        Ok(body)
    }

    fn map_request_error(&self, err: reqwest::Error) -> ToolError {
        if err.is_timeout() {
            ToolError::Timeout {
                operation: "fetch Terraform release index".to_string(),
                elapsed: self.timeouts.http_request,
            }
        } else {
            ToolError::Network(err)
        }
    }
}

/// Extract every stable version linked from a release index page.
///
/// Only `<li><a>terraform_X.Y.Z</a></li>` entries of the `<ul>` lists in the
/// page body count. Links in the head or in other list kinds are ignored.
fn parse_release_index(html: &str) -> Vec<SemVer> {
    let Some(body) = body_pattern().captures(html).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    list_pattern()
        .captures_iter(body.as_str())
        .filter_map(|caps| caps.get(1))
        .flat_map(|list| release_link_pattern().captures_iter(list.as_str()))
        .filter_map(|caps| caps.get(1))
        .filter_map(|label| parse_release_label(label.as_str().trim()))
        .filter(|v| !v.is_prerelease())
        .collect()
}

fn parse_release_label(label: &str) -> Option<SemVer> {
    let Some(raw) = label.strip_prefix(LABEL_PREFIX) else {
        tracing::debug!("Skipping release link '{}'", label);
        return None;
    };

    match SemVer::parse(raw) {
        Ok(version) => Some(version),
        Err(_) => {
            tracing::debug!("Skipping release link '{}'", label);
            None
        }
    }
}

// The record must name a file directly inside its install directory.
fn check_install_path(installed: &InstalledTool) -> ToolResult<()> {
    let path = &installed.path;
    let escapes = path.components().any(|c| matches!(c, Component::ParentDir))
        || path.file_name() != Some(OsStr::new(&installed.name));

    if escapes {
        return Err(ToolError::InvalidPath {
            path: path.clone(),
            install_dir: installed.install_dir().to_path_buf(),
        });
    }
    Ok(())
}

#[async_trait]
impl Tool for TerraformTool {
    fn name(&self) -> &'static str {
        ToolKind::Terraform.as_str()
    }

    async fn latest_version(&self, src_url: &str) -> ToolResult<SemVer> {
        let body = self.fetch_index(src_url).await?;
        let versions = parse_release_index(&body);
        tracing::debug!("Found {} stable Terraform releases", versions.len());

        versions.into_iter().max().ok_or_else(|| ToolError::NoReleases {
            url: src_url.to_string(),
        })
    }

    async fn install(
        &self,
        _src_url: &str,
        version: &SemVer,
        install_dir: &Path,
    ) -> ToolResult<InstalledTool> {
        tracing::debug!(
            "Requested Terraform {} into {}",
            version,
            install_dir.display()
        );
        Err(ToolError::not_implemented(self.name(), "install"))
    }

    async fn remove(&self, installed: &InstalledTool) -> ToolResult<()> {
        check_install_path(installed)?;

        match tokio::fs::remove_file(&installed.path).await {
            Ok(()) => {
                tracing::info!("Removed {}", installed.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("{} not installed, nothing to remove", installed.path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

pub struct TerraformFactory;

impl ToolFactory for TerraformFactory {
    fn kind(&self) -> ToolKind {
        ToolKind::Terraform
    }

    fn create(&self, timeouts: &ToolTimeouts) -> ToolResult<Box<dyn Tool>> {
        Ok(Box::new(TerraformTool::new(timeouts)?))
    }
}
