use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Retry policy parameters (optional section in config.toml).
///
/// Applies to the HTTP transport only; the duration estimator itself never
/// retries a failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/rmd/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmdConfig {
    /// Connect timeout for each HTTP request, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout, in seconds. The probes fetch at most a handful
    /// of bytes, so this can stay short.
    pub request_timeout_secs: u64,
    /// Optional User-Agent header sent with every request.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Optional retry policy for the transport; if missing, requests are not retried.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for RmdConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
            user_agent: None,
            retry: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rmd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RmdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RmdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: RmdConfig = toml::from_str(&data)?;
    Ok(cfg)
}
