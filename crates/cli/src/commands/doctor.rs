//! `learnpal doctor`: Diagnose system health.

use std::path::Path;

use learnpal_config::{AppConfig, CONFIG_PATH_ENV, redact_url};

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 learnpal Doctor: System Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    // Check config
    let path = AppConfig::resolve_path(config_path, std::env::var(CONFIG_PATH_ENV).ok());
    if !path.exists() {
        println!("  ⚠️  No config file at {}, using defaults", path.display());
    }
    let config = match AppConfig::load(config_path) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  Fix the config before running further checks.");
            return Ok(());
        }
    };

    // Check database
    let url = config.database_url();
    match learnpal_storage::connect(&url, 1).await {
        Ok(store) => match store.ping().await {
            Ok(()) => println!("  ✅ Database reachable ({})", redact_url(&url)),
            Err(e) => {
                println!("  ❌ Database not responding: {e}");
                issues += 1;
            }
        },
        Err(e) => {
            println!("  ❌ Database unreachable ({}): {e}", redact_url(&url));
            issues += 1;
        }
    }

    // Check API key and completion endpoint
    if config.has_api_key() {
        println!("  ✅ API key configured");
        match learnpal_providers::build_from_config(&config) {
            Ok(provider) => match provider.health_check().await {
                Ok(true) => println!(
                    "  ✅ Completion service reachable ({})",
                    config.completion.api_url
                ),
                Ok(false) | Err(_) => {
                    println!(
                        "  ⚠️  Completion service not reachable at {}",
                        config.completion.api_url
                    );
                    issues += 1;
                }
            },
            Err(e) => {
                println!("  ❌ Completion client failed to build: {e}");
                issues += 1;
            }
        }
    } else {
        println!("  ⚠️  No API key configured, set OPENAI_API_KEY or completion.api_key");
        issues += 1;
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
