//! `aifa config` command implementation
//!
//! Shows the effective configuration after all layers are applied.

use crate::config::{
    Config, BACKEND_ENV, CONFIG_KEYS, CONFIG_PATH_ENV, DATA_DIR_ENV, QUOTA_ENV, STORAGE_KEY_ENV,
};
use crate::error::Result;
use colored::Colorize;

/// Print one configuration value
pub fn get(config: &Config, key: &str) -> Result<()> {
    println!("{}", config.get(key)?);
    Ok(())
}

/// Print the config file location
pub fn path() -> Result<()> {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("(no config directory on this platform)"),
    }
    Ok(())
}

/// Show all configuration
pub fn show(config: &Config) -> Result<()> {
    println!("{}", "AIFA Configuration:".cyan().bold());
    println!();
    for key in CONFIG_KEYS {
        println!("{:<15} {}", format!("{}:", key), config.get(key)?);
    }
    println!();
    println!("{}", "Environment Variables:".cyan());
    println!("  {:<22} - Config file location", CONFIG_PATH_ENV);
    println!("  {:<22} - Data directory", DATA_DIR_ENV);
    println!("  {:<22} - Storage backend (file, sqlite)", BACKEND_ENV);
    println!("  {:<22} - Storage slot name", STORAGE_KEY_ENV);
    println!("  {:<22} - Maximum archive size in bytes", QUOTA_ENV);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_get() {
        let config = Config::default();
        assert!(get(&config, "backend").is_ok());
        assert!(get(&config, "server_url").is_err());
    }

    #[test]
    fn test_config_show() {
        assert!(show(&Config::default()).is_ok());
    }
}
