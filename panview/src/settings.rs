use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::paginate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "panview.toml";

/// A named configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedConfig {
    pub name: String,
    pub path: PathBuf,
}

/// Tool settings loaded from `panview.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_page_size: usize,
    pub max_page_size: usize,
    #[serde(rename = "config")]
    pub configs: Vec<NamedConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            configs: Vec::new(),
        }
    }
}

impl Settings {
    /// Path of the config registered under `name`.
    pub fn config_path(&self, name: &str) -> Option<&Path> {
        self.configs
            .iter()
            .find(|config| config.name == name)
            .map(|config| config.path.as_path())
    }

    pub fn config_names(&self) -> Vec<&str> {
        self.configs.iter().map(|c| c.name.as_str()).collect()
    }

    /// Requested page size, or the configured default.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_page_size)
    }
}

/// Errors returned when loading settings files.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load settings from a TOML file; relative config paths resolve against its directory.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut settings = parse_settings(&raw, path.display().to_string())?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for config in &mut settings.configs {
        if config.path.is_relative() {
            config.path = base.join(&config.path);
        }
    }
    Ok(settings)
}

/// Load `path` when given, else `panview.toml` if present, else built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => load_settings(path),
        None => {
            let default = Path::new(DEFAULT_SETTINGS_FILE);
            if default.is_file() {
                load_settings(default)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

fn parse_settings(raw: &str, path: String) -> Result<Settings, SettingsError> {
    toml::from_str(raw).map_err(|source| SettingsError::Parse { path, source })
}
