//! `learnpal migrate`: Create the database tables.

use std::path::Path;

use learnpal_config::redact_url;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let url = config.database_url();

    println!("🔄 Migrating {}", redact_url(&url));
    let store = learnpal_storage::connect(&url, config.database.max_connections).await?;
    store.migrate().await?;
    println!("   ✅ Tables ready ({})", store.name());

    Ok(())
}
