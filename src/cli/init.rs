//! Init command - write the initial configuration

use std::path::PathBuf;

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;

/// Run the init command, writing url/key to the config file.
///
/// An existing config is updated in place so re-running init with a new key
/// keeps other settings.
pub fn run(url: &str, api_key: &str, config_path: Option<&str>) -> Result<()> {
    let path: PathBuf = match config_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_path()?,
    };

    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };

    config.api_url = Some(url.trim_end_matches('/').to_string());
    config.api_key = Some(api_key.to_string());
    config.save_to(&path)?;

    println!(
        "{} Wrote configuration to {}",
        "✓".green(),
        path.display()
    );

    Ok(())
}
