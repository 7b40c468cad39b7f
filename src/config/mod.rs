//! Configuration module for shopsearch
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are read once at startup and handed to the parts that need
//! them; there is no global configuration state.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Candidate settings files, first match wins
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(path) = std::env::var("SHOPSEARCH_SETTINGS_PATH") {
        paths.push(PathBuf::from(path));
    }
    paths.push(PathBuf::from("settings.yml"));
    paths.push(PathBuf::from("config/settings.yml"));
    paths.push(PathBuf::from("/etc/shopsearch/settings.yml"));
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("shopsearch/settings.yml"));
    }
    paths
}

/// Load settings from the first settings file found, falling back to
/// defaults, then apply environment overrides
pub fn load() -> Result<Settings> {
    let mut settings = match candidate_paths().iter().find(|p| p.exists()) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    Ok(settings)
}
