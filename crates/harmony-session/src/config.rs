//! Layered configuration for session construction, using figment.
//!
//! Sources (highest priority wins):
//! 1. Environment variables (`HARMONY_*` prefix)
//! 2. Project-local `.harmony/config.toml`
//! 3. User-global `~/.config/harmony/config.toml`
//! 4. Built-in defaults
//!
//! The search-path list is an explicit configuration value handed to the
//! collector constructor; nothing reads process-global state implicitly.

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HarmonyConfig {
    /// Schema search paths joined with the platform path separator, as in
    /// the `HARMONY_SCHEMA_PATH` environment variable.
    #[serde(default)]
    pub schema_path: Option<String>,
}

impl HarmonyConfig {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain. Public so tests can layer
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".harmony/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("HARMONY_"))
    }

    /// The configured search paths, split on the platform path separator.
    /// Empty when no path is configured.
    #[must_use]
    pub fn schema_paths(&self) -> Vec<PathBuf> {
        self.schema_path
            .as_deref()
            .map(|joined| std::env::split_paths(joined).collect())
            .unwrap_or_default()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("harmony").join("config.toml"))
    }
}
