pub mod config;
pub mod introduce;
pub mod throttle;
pub mod validate;

pub use introduce::run_introduce;
pub use throttle::run_throttle;
pub use validate::run_validate;

use anyhow::Result;
use crpt_api::Config;

/// Settings given on the command line, which win over every other source.
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

/// Load the configuration and apply command-line overrides.
pub fn load_config(overrides: &Overrides) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(base_url) = &overrides.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(token) = &overrides.token {
        config.auth_token = Some(token.clone());
    }
    Ok(config)
}
