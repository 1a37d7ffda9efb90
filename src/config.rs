use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::viewer::query::PerPage;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub vim_mode: bool,
}

fn default_per_page() -> u32 {
    10
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Config {
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_yaml(&contents).with_context(|| format!("Invalid config file: {:?}", path))
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https:// (got {})", self.base_url);
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }
        PerPage::try_from(self.default_per_page).context("Invalid default_per_page")?;
        Ok(())
    }

    pub fn per_page(&self) -> PerPage {
        PerPage::try_from(self.default_per_page).unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Locations searched for the config file, in order
pub fn config_candidates(cli_path: Option<&str>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = cli_path {
        candidates.push(PathBuf::from(path));
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("ptwtui").join("config.yaml"));
    }
    candidates.push(PathBuf::from("config.yaml"));
    candidates
}

/// Resolve the config file path
///
/// An explicit `--config` path must exist; otherwise the first existing
/// default location wins.
pub fn get_config_path(cli_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
        anyhow::bail!("Config file not found: {:?}", path);
    }

    let candidates = config_candidates(None);
    if let Some(found) = candidates.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let searched: Vec<String> = candidates.iter().map(|p| format!("  {}", p.display())).collect();
    anyhow::bail!(
        "No config file found. Searched:\n{}\nCreate one with at least `base_url: http://...`",
        searched.join("\n")
    )
}
