//! Locate, read and parse the configuration file, then apply environment overrides.

use crate::config::types::Config;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const ENV_ENV: &str = "ENV";
pub const STORAGE_PATH_ENV: &str = "STORAGE_PATH";

/// `CONFIG_PATH` wins over the `--config` flag. Neither set is an error.
pub fn resolve_config_path(flag: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    let from_env = std::env::var(CONFIG_PATH_ENV).ok().filter(|s| !s.trim().is_empty());
    from_env
        .map(PathBuf::from)
        .or(flag)
        .ok_or(ConfigError::MissingPath)
}

impl Config {
    /// Read the file at `path` and apply `ENV` / `STORAGE_PATH` overrides from the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        tracing::debug!(path = %path.display(), env = %config.env, "config loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Replace file values with non-empty values returned by `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(env) = lookup(ENV_ENV) {
            self.env = env;
        }
        if let Some(storage_path) = lookup(STORAGE_PATH_ENV) {
            self.storage_path = storage_path;
        }
    }
}
