//! Status command - show configuration state

use colored::Colorize;

use crate::config::Config;
use crate::error::{Error, Result};

/// Run the status command
pub fn run(config_path: Option<&str>) -> Result<()> {
    let path = match config_path {
        Some(p) => p.to_string(),
        None => Config::default_path()?.display().to_string(),
    };

    match Config::load(config_path) {
        Ok(config) => {
            println!("Config file:    {}", path);
            println!(
                "API URL:        {}",
                config.api_url.as_deref().unwrap_or("(not set)")
            );
            println!(
                "API key:        {}",
                if config.api_key.is_some() {
                    "configured".green().to_string()
                } else {
                    "missing".red().to_string()
                }
            );
            Ok(())
        }
        Err(Error::Config(crate::error::ConfigError::NotFound)) => {
            println!("No configuration found at {}", path);
            println!("Run `venuecache init --url <URL> --api-key <KEY>` to set up.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
