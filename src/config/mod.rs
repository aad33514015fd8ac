//! Configuration module for City Letter Finder
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a settings file
pub const SETTINGS_PATH_ENV: &str = "CITYFINDER_SETTINGS_PATH";

/// Candidate settings locations, in lookup order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("city-letter-finder/settings.yml"));
    }
    paths
}

/// Settings together with the file they were read from
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// `None` when no file was found and defaults were used
    pub source: Option<PathBuf>,
}

/// Load settings from an explicit file, the environment, a default path, or defaults
///
/// Environment overrides are applied last. The result is not validated, so
/// callers can layer their own overrides first and then call
/// [`Settings::validate`].
pub fn load(explicit: Option<&Path>) -> Result<LoadedSettings> {
    let source = locate(explicit);
    let mut settings = match source {
        Some(ref path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    settings.merge_env();
    Ok(LoadedSettings { settings, source })
}

fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    default_paths().into_iter().find(|p| p.exists())
}
