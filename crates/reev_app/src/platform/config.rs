use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use reev_engine::ClientConfig;
use reev_logging::{reev_info, reev_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "reev.ron";

const ENV_API_BASE_URL: &str = "REEV_API_BASE_URL";
const ENV_CSRF_TOKEN: &str = "REEV_CSRF_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Falls back to the base URL baked in at build time.
    pub api_base_url: Option<String>,
    pub csrf_token: Option<String>,
    /// Directory holding the persisted records.
    pub data_dir: PathBuf,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            csrf_token: None,
            data_dir: PathBuf::from("./reev_data"),
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(url) = &self.api_base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(token) = &self.csrf_token {
            config = config.with_csrf_token(token.clone());
        }
        if let Some(secs) = self.request_timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Reads the RON config at `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            reev_info!("No config at {:?}, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading config {}", path.display()));
        }
    };

    let config: AppConfig =
        ron::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
    reev_info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Environment variables win over the file. Empty values are ignored.
pub fn apply_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(url) = non_empty(ENV_API_BASE_URL) {
        if config.api_base_url.is_some() {
            reev_warn!("{} overrides api_base_url from the config file", ENV_API_BASE_URL);
        }
        config.api_base_url = Some(url);
    }
    if let Some(token) = non_empty(ENV_CSRF_TOKEN) {
        config.csrf_token = Some(token);
    }
    config
}
