//! `learnpal config`: Configuration management commands.

use std::path::Path;

use learnpal_config::{AppConfig, CONFIG_PATH_ENV};

pub async fn show(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config.redacted())?;
    println!("{toml_str}");
    println!("# database url: {}", config.redacted().database_url());
    Ok(())
}

pub async fn path(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = AppConfig::resolve_path(config_path, std::env::var(CONFIG_PATH_ENV).ok());
    if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{} (not found, defaults in use)", path.display());
    }
    Ok(())
}
