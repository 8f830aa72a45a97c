use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crpt_throttle::{SlidingWindowLimiter, ThrottleError, TimeUnit};

/// Configuration for crpt.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (CRPT_* prefix)
/// 3. Config file (~/.config/crpt/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the document API.
    ///
    /// Can be set via:
    /// - CLI: --base-url https://...
    /// - ENV: CRPT_BASE_URL
    /// - Config: base_url = "https://..."
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Token sent in the `Authorization` header (required to submit).
    ///
    /// Can be set via:
    /// - CLI: --token ...
    /// - ENV: CRPT_AUTH_TOKEN
    /// - Config: auth_token = "..."
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Maximum number of requests per `time_unit`.
    #[serde(default = "default_request_limit")]
    pub request_limit: usize,

    /// Unit the request limit is expressed in.
    #[serde(default = "default_time_unit")]
    pub time_unit: TimeUnit,

    /// HTTP timeout for a single request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: None,
            request_limit: default_request_limit(),
            time_unit: default_time_unit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the default file and environment variables.
    ///
    /// Searches for config file at: ~/.config/crpt/config.toml
    /// Reads environment variables with CRPT_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` (if it exists) and the
    /// environment.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("crpt");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Build the shared request throttle described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the limit is zero or the unit is shorter than a
    /// millisecond.
    pub fn limiter(&self) -> std::result::Result<SlidingWindowLimiter, ThrottleError> {
        SlidingWindowLimiter::per(self.time_unit, self.request_limit)
    }
}

fn default_base_url() -> String {
    String::from("https://ismp.crpt.ru")
}

const fn default_request_limit() -> usize {
    10
}

const fn default_time_unit() -> TimeUnit {
    TimeUnit::Second
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/crpt/config.toml
/// - macOS: ~/Library/Application Support/crpt/config.toml
/// - Windows: %APPDATA%\crpt\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crpt")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# crpt Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (CRPT_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Base URL of the document API
#
# Can also be set via:
# - CLI: crpt --base-url https://ismp.crpt.ru introduce ...
# - Environment: CRPT_BASE_URL=https://ismp.crpt.ru
base_url = "https://ismp.crpt.ru"

# Token sent in the Authorization header
#
# Can also be set via:
# - CLI: crpt --token ... introduce ...
# - Environment: CRPT_AUTH_TOKEN=your-token-here
#auth_token = "your-token-here"

# Request throttle: at most `request_limit` requests per `time_unit`.
# Every request made by this process shares one throttle.
#
# time_unit is one of: millisecond, second, minute, hour, day
request_limit = 10
time_unit = "second"

# HTTP timeout for a single request, in seconds
timeout_secs = 30
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}
