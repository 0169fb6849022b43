use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::api::sanitize_base_url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
const APP_DIR: &str = "blogboard";

#[derive(Debug, Clone, PartialEq)]
pub struct FrontendConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub toast_seconds: u64,
}

/// Shape of `config.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    session_file: Option<PathBuf>,
    toast_seconds: Option<u64>,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            session_file: config_dir().join("session.json"),
            toast_seconds: 4,
        }
    }
}

impl FrontendConfig {
    /// Defaults, then `config.toml` in the user config dir, then env vars.
    pub fn load() -> Result<Self> {
        let file = config_dir().join("config.toml");
        let mut config = Self::default();
        if file.exists() {
            config = config.merge_file(&file)?;
        }
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn merge_file(self, path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        self.merge_toml(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    fn merge_toml(mut self, raw: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(raw)?;
        if let Some(url) = file.api_base_url {
            self.api_base_url = sanitize_base_url(url)?;
        }
        if let Some(path) = file.session_file {
            self.session_file = path;
        }
        if let Some(seconds) = file.toast_seconds {
            self.toast_seconds = seconds;
        }
        Ok(self)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("BLOGBOARD_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api_base_url =
                sanitize_base_url(url).context("BLOGBOARD_API_URL is not a usable URL")?;
        }
        if let Some(path) = lookup("BLOGBOARD_SESSION_FILE").filter(|v| !v.trim().is_empty()) {
            self.session_file = PathBuf::from(path);
        }
        Ok(())
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds.max(1))
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")))
}
