//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};

use crate::error::ConfigError;
use crate::schema::Config;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Environment variable that overrides the default endpoint URL.
pub const API_URL_ENV: &str = "GROQ_API_URL";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_str(&content)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Config::default()
        };
        Self::apply_env_fallbacks(&mut config);
        config.store.data_dir = PathBuf::from(Self::expand_path(&config.store.data_dir.to_string_lossy()));
        Ok(config)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Fill the provider key and URL from the environment when the file
    /// leaves them out.
    fn apply_env_fallbacks(config: &mut Config) {
        if config.provider.api_key.as_deref().map_or(true, str::is_empty) {
            config.provider.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        }
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                config.provider.api_url = url;
            }
        }
    }

    /// Expand `${VAR}` references. Every referenced variable must be set.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;
        let mut missing = None;
        let expanded = re.replace_all(content, |cap: &Captures<'_>| {
            std::env::var(&cap[1]).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| cap[1].to_string());
                String::new()
            })
        });
        match missing {
            Some(name) => Err(ConfigError::EnvVarNotSet(name)),
            None => Ok(expanded.into_owned()),
        }
    }

    /// Expand shell-style paths (e.g., `~/.chickenshield`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
