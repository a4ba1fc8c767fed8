use crate::config::{CONFIG_FILE_NAME, RosterConfig};
use anyhow::Result;
use colored::Colorize;

/// Write a `roster.yml` with the current effective settings.
pub fn handle_init(config: RosterConfig) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        anyhow::bail!("Config already exists at {}", config_path.display());
    }

    config.save(&config_path)?;

    println!("{} {}", "Created".green(), config_path.display());
    println!("  Database: {}", config.database.name);
    println!("  URI:      {}", config.database.redacted_uri());
    Ok(())
}
