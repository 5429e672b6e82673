//! User configuration.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings shared by the terminal and web front ends.
///
/// Loaded from `<config_dir>/filedeck/config.toml`; every field is
/// optional in the file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct Config {
    /// Directory opened on startup (home directory if unset).
    #[builder(default)]
    pub start_dir: Option<PathBuf>,

    /// Show dot-files in listings.
    #[builder(default = "false")]
    pub show_hidden: bool,

    /// Address the web server binds to.
    #[builder(default = "default_bind()")]
    pub bind: String,

    /// Port the web server listens on.
    #[builder(default = "5000")]
    pub port: u16,

    /// Upper bound on results returned by a single search.
    #[builder(default = "1000")]
    pub max_search_results: usize,

    /// Ask before deleting in the terminal UI.
    #[builder(default = "true")]
    pub confirm_delete: bool,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

impl ConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(0) = self.max_search_results {
            return Err("max_search_results must be at least 1".to_string());
        }
        if let Some(ref bind) = self.bind
            && bind.trim().is_empty()
        {
            return Err("bind address cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_dir: None,
            show_hidden: false,
            bind: default_bind(),
            port: 5000,
            max_search_results: 1000,
            confirm_delete: true,
        }
    }
}

impl Config {
    /// Create a new config builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Location of the config file, if the platform has a config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("filedeck").join("config.toml"))
    }

    /// Load the user's config file, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_search_results == 0 {
            return Err(ConfigError::Invalid {
                message: "max_search_results must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Directory to open on startup: `start_dir`, else home, else `.`.
    pub fn start_directory(&self) -> PathBuf {
        self.start_dir
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// `bind:port` socket address string.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = Config::builder()
            .port(8080u16)
            .show_hidden(true)
            .build()
            .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.show_hidden);
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.max_search_results, 1000);
        assert!(config.confirm_delete);
    }

    #[test]
    fn test_config_builder_rejects_zero_results() {
        let result = Config::builder().max_search_results(0usize).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 9000\nshow_hidden = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.show_hidden);
        assert_eq!(config.listen_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = \"not a number\"").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));

        std::fs::write(&path, "max_search_results = 0").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
