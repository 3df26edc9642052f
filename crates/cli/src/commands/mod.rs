pub mod config_cmd;
pub mod doctor;
pub mod migrate;
pub mod seed;
pub mod serve;

use std::path::Path;

use learnpal_config::AppConfig;

/// Load and validate the configuration, with a readable error.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load(path).map_err(|e| format!("Failed to load config: {e}"))?)
}
