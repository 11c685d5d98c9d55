//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Inkpress has two configuration scopes:
//! - **Global**: user-level settings
//! - **Repo**: repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config file
//! 3. Repo config file
//! 4. Environment (`INKPRESS_API_KEY`) and CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$INKPRESS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/inkpress/config.toml`
//! 3. `~/.inkpress/config.toml` (canonical write location)
//!
//! # Repo Config Location
//!
//! `.inkpress.toml` at the repository root.
//!
//! # Example
//!
//! ```toml
//! api_base = "https://dev.to/api"
//! content_dir = "posts"
//! remote = "origin"
//! stage_all = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default articles API base URL.
pub const DEFAULT_API_BASE: &str = "https://dev.to/api";

/// Default content directory, relative to the repository root.
pub const DEFAULT_CONTENT_DIR: &str = "posts";

/// Default git remote name.
pub const DEFAULT_REMOTE: &str = "origin";

/// Environment variable holding the API key (overrides config files).
pub const API_KEY_ENV: &str = "INKPRESS_API_KEY";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Configuration file schema, shared by both scopes.
///
/// Every field is optional so the repo scope can override only what it
/// needs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// API key for the publishing service.
    pub api_key: Option<String>,

    /// Base URL of the publishing API.
    pub api_base: Option<String>,

    /// Repository-root-relative directory scanned for articles.
    pub content_dir: Option<String>,

    /// Git remote name used for fetch, diff, and push.
    pub remote: Option<String>,

    /// Stage the whole working tree instead of only touched files.
    pub stage_all: Option<bool>,

    /// Default organization id applied when a header omits it.
    pub organization_id: Option<u64>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.content_dir {
            let path = Path::new(dir);
            if path.is_absolute() {
                return Err(ConfigError::InvalidValue(format!(
                    "content_dir must be repository-relative, got '{dir}'"
                )));
            }
            if path.components().any(|c| c.as_os_str() == "..") {
                return Err(ConfigError::InvalidValue(format!(
                    "content_dir must not contain '..', got '{dir}'"
                )));
            }
            if dir.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "content_dir must not be empty".into(),
                ));
            }
        }

        if let Some(base) = &self.api_base {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(ConfigError::InvalidValue(format!(
                    "api_base must be an http(s) URL, got '{base}'"
                )));
            }
        }

        Ok(())
    }
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence automatically: repo config overrides
/// global config, and built-in defaults fill the rest.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global (user-scope) configuration.
    pub global: FileConfig,
    /// Repository configuration, if a repo config file exists.
    pub repo: Option<FileConfig>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// If `repo_root` is provided, also loads `.inkpress.toml` from it.
    /// Missing config files are not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load(repo_root: Option<&Path>) -> Result<Self, ConfigError> {
        let global = match global_config_path() {
            Some(path) if path.is_file() => read_config_file(&path)?,
            _ => FileConfig::default(),
        };

        let repo = match repo_root {
            Some(root) => {
                let path = root.join(".inkpress.toml");
                if path.is_file() {
                    Some(read_config_file(&path)?)
                } else {
                    None
                }
            }
            None => None,
        };

        global.validate()?;
        if let Some(r) = &repo {
            r.validate()?;
        }

        Ok(Self { global, repo })
    }

    /// The API key, with environment taking precedence over config files.
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }
        self.field(|c| c.api_key.clone())
    }

    /// The publishing API base URL.
    pub fn api_base(&self) -> String {
        self.field(|c| c.api_base.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    /// The content directory, repository-root-relative.
    pub fn content_dir(&self) -> String {
        self.field(|c| c.content_dir.clone())
            .unwrap_or_else(|| DEFAULT_CONTENT_DIR.to_string())
    }

    /// The git remote name.
    pub fn remote(&self) -> String {
        self.field(|c| c.remote.clone())
            .unwrap_or_else(|| DEFAULT_REMOTE.to_string())
    }

    /// Whether to stage the whole working tree instead of touched files.
    pub fn stage_all(&self) -> bool {
        self.field(|c| c.stage_all).unwrap_or(false)
    }

    /// Default organization id applied when a header omits one.
    pub fn organization_id(&self) -> Option<u64> {
        self.field(|c| c.organization_id)
    }

    /// Resolve a field with repo-over-global precedence.
    fn field<T>(&self, get: impl Fn(&FileConfig) -> Option<T>) -> Option<T> {
        self.repo.as_ref().and_then(&get).or_else(|| get(&self.global))
    }
}

/// Resolve the global config file path.
fn global_config_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("INKPRESS_CONFIG") {
        if !explicit.trim().is_empty() {
            return Some(PathBuf::from(explicit));
        }
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.trim().is_empty() {
            let path = PathBuf::from(xdg).join("inkpress").join("config.toml");
            if path.is_file() {
                return Some(path);
            }
        }
    }

    dirs::home_dir().map(|home| home.join(".inkpress").join("config.toml"))
}

/// Read and parse a single config file.
fn read_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unconfigured() {
        let config = Config::default();
        assert_eq!(config.api_base(), DEFAULT_API_BASE);
        assert_eq!(config.content_dir(), DEFAULT_CONTENT_DIR);
        assert_eq!(config.remote(), DEFAULT_REMOTE);
        assert!(!config.stage_all());
        assert_eq!(config.organization_id(), None);
    }

    #[test]
    fn repo_overrides_global() {
        let config = Config {
            global: FileConfig {
                content_dir: Some("articles".into()),
                remote: Some("upstream".into()),
                ..Default::default()
            },
            repo: Some(FileConfig {
                content_dir: Some("posts".into()),
                ..Default::default()
            }),
        };
        assert_eq!(config.content_dir(), "posts");
        // Unset repo fields fall back to global.
        assert_eq!(config.remote(), "upstream");
    }

    #[test]
    fn validate_rejects_absolute_content_dir() {
        let config = FileConfig {
            content_dir: Some("/etc/posts".into()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn validate_rejects_parent_traversal() {
        let config = FileConfig {
            content_dir: Some("../outside".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_api_base() {
        let config = FileConfig {
            api_base: Some("ftp://example.com".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_full_config_file() {
        let parsed: FileConfig = toml::from_str(
            r#"
            api_key = "k"
            api_base = "https://dev.to/api"
            content_dir = "posts"
            remote = "origin"
            stage_all = true
            organization_id = 7
            "#,
        )
        .unwrap();
        assert_eq!(parsed.api_key.as_deref(), Some("k"));
        assert_eq!(parsed.stage_all, Some(true));
        assert_eq!(parsed.organization_id, Some(7));
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("unknown_key = 1\n");
        assert!(result.is_err());
    }
}
