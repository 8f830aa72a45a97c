use anyhow::Result;
use crpt_api::config;

use super::{load_config, Overrides};

/// Show the current effective configuration.
pub fn show_config(overrides: &Overrides) -> Result<()> {
    let config = load_config(overrides)?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  base_url: {}", config.base_url);
    println!(
        "  auth_token: {}",
        if config.auth_token.is_some() { "<set>" } else { "<not set>" }
    );
    println!("  request_limit: {}", config.request_limit);
    println!("  time_unit: {}", config.time_unit);
    println!("  timeout_secs: {}", config.timeout_secs);

    println!("\nPriority: CLI args > ENV vars (CRPT_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure crpt.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
