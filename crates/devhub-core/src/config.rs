//! DevHub configuration.
//!
//! Read from `<data_dir>/config.toml` when present, then overridden by
//! environment variables:
//!
//! | variable          | field        |
//! |-------------------|--------------|
//! | `DEVHUB_DATA_DIR` | `data_dir`   |
//! | `DEVHUB_API_URL`  | `api_url`    |
//! | `REDIS_URL`       | `redis_url`  |

use crate::api::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{DevhubError, DevhubResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevhubConfig {
    /// Base URL of the DevHub backend.
    pub api_url: String,
    /// Redis URL for layout persistence. File storage is used when unset.
    pub redis_url: Option<String>,
    /// Directory holding the config file and file-backed state. Never read
    /// from the file itself.
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for DevhubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            redis_url: None,
            data_dir: default_data_dir(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DevhubConfig {
    /// Load configuration from the environment and the config file.
    pub fn load() -> DevhubResult<Self> {
        let data_dir = std::env::var("DEVHUB_DATA_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let mut config = Self::load_from_dir(&data_dir)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load `<dir>/config.toml`, falling back to defaults when it is
    /// missing. `data_dir` is set to `dir`.
    pub fn load_from_dir(dir: &Path) -> DevhubResult<Self> {
        let path = dir.join(CONFIG_FILE);
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), "Loading config file");
                Self::parse(&content)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };
        config.data_dir = dir.to_path_buf();
        Ok(config)
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn parse(content: &str) -> DevhubResult<Self> {
        toml::from_str(content).map_err(|e| DevhubError::config(e.to_string()))
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("DEVHUB_API_URL").filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(url) = lookup("REDIS_URL").filter(|v| !v.is_empty()) {
            self.redis_url = Some(url);
        }
        if let Some(dir) = lookup("DEVHUB_DATA_DIR").filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
    }

    /// Directory for file-backed state.
    pub fn state_dir(&self) -> PathBuf {
        self.data_dir.join("state")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".devhub")
}
