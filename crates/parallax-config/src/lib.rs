mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Directory name under the platform config root.
const APP_DIR: &str = "parallax-motion";
const CONFIG_FILE: &str = "config.toml";

/// Returns the app's config directory, creating it if needed.
pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("could not determine platform config directory")?
        .join(APP_DIR);
    fs::create_dir_all(&dir).with_context(|| format!("could not create {}", dir.display()))?;
    Ok(dir)
}

/// Returns the config file path inside [`config_dir`].
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Load config from disk; a missing file means defaults.
pub fn load_config() -> Result<AppConfig> {
    let path = config_path()?;
    if !path.exists() {
        info!("No config found, using defaults");
        return Ok(AppConfig::default());
    }

    let contents =
        fs::read_to_string(&path).with_context(|| format!("could not read {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("malformed config at {}", path.display()))?;
    info!(?path, "Loaded config");
    Ok(config)
}

/// Save config to disk.
pub fn save_config(config: &AppConfig) -> Result<()> {
    let path = config_path()?;
    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, contents).with_context(|| format!("could not write {}", path.display()))?;
    info!(?path, "Saved config");
    Ok(())
}
