//! `learnpal serve`: Start the HTTP API server.

use std::path::Path;

use learnpal_config::redact_url;

pub async fn run(
    config_path: Option<&Path>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = port_override {
        config.server.port = port;
    }

    println!("🎓 learnpal");
    println!("   Listening: {}", config.bind_addr());
    println!("   Database:  {}", redact_url(&config.database_url()));
    println!("   Engine:    {}", config.completion.engine);
    if !config.has_api_key() {
        println!("   ⚠️  No API key configured, /ask_gpt/ will fail until one is set");
    }

    learnpal_gateway::start(config).await?;

    Ok(())
}
