//! Configuration for sokolgen.
//!
//! Resolution order (later wins):
//! 1. Built-in defaults (upstream sokol master, `sokol/`, eight headers)
//! 2. `~/.sokolgen/config.toml`
//! 3. `<target>/sokolgen.toml`
//! 4. `SOKOLGEN_BASE_URL`, `SOKOLGEN_TIMEOUT_SECS`
//!
//! CLI flags are applied on top by the command layer.

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::RemoteFileSpec;
use crate::paths;

pub const BASE_URL_ENV: &str = "SOKOLGEN_BASE_URL";
pub const TIMEOUT_ENV: &str = "SOKOLGEN_TIMEOUT_SECS";

/// On-disk shape of a config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub remote: RemoteSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteSection {
    pub base_url: Option<String>,
    pub dir: Option<PathBuf>,
    pub headers: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

/// Resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub remote: RemoteFileSpec,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load configuration for a project rooted at `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let mut config = Self::default();

        for path in [paths::user_config_path(), paths::project::config_path(root)] {
            if let Some(file) = read_config_file(&path)? {
                debug!("applying config from {}", path.display());
                config.apply(file);
            }
        }

        config.apply_env(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )?;

        debug!("resolved config: {:?}", config);
        Ok(config)
    }

    /// Overlay whatever keys `file` sets.
    pub fn apply(&mut self, file: ConfigFile) {
        let remote = file.remote;
        if let Some(url) = remote.base_url {
            self.set_base_url(url);
        }
        if let Some(dir) = remote.dir {
            self.remote.dir = dir;
        }
        if let Some(headers) = remote.headers {
            self.remote.files = headers;
        }
        if let Some(secs) = remote.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
    }

    fn apply_env(&mut self, base_url: Option<String>, timeout: Option<String>) -> Result<()> {
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            self.set_base_url(url);
        }
        if let Some(raw) = timeout.filter(|t| !t.is_empty()) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{TIMEOUT_ENV} must be a number of seconds, got '{raw}'"))?;
            self.timeout = Some(Duration::from_secs(secs));
        }
        Ok(())
    }

    /// Set the base URL, adding the trailing slash filenames are joined onto.
    pub fn set_base_url(&mut self, url: String) {
        self.remote.base_url = if url.ends_with('/') { url } else { format!("{url}/") };
    }
}

fn read_config_file(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let file = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(Some(file))
}
