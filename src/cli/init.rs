//! Init command - write an example pinecheck.toml

use crate::config::{example_config, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let scripts_dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !scripts_dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", scripts_dir.display());
    }

    println!("\n{} Initializing pinecheck\n", style("🌲").bold());

    let config_path = scripts_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, example_config())
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!("  {} List the scripts your suite needs", style("[integration] expected_scripts").cyan());
    println!("  {} Validate every script", style("pinecheck validate").cyan());
    println!("  {} Check cross-script wiring", style("pinecheck health").cyan());

    Ok(())
}
