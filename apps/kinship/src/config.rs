//! # Configuration
//!
//! Optional TOML configuration for the binary.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [tree]
//! file = "family.json"
//! ```
//!
//! Lookup order: the `--config` path when given (must exist), otherwise
//! `kinship.toml` in the working directory when present, otherwise built-in
//! defaults. Command-line flags override file values.

use kinship_core::KinshipError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "kinship.toml";

/// Upper bound on the config file size.
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KinshipConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tree: TreeConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Tree file settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeConfig {
    /// JSON snapshot to load. The sample family is used when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl KinshipConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, KinshipError> {
        toml::from_str(text).map_err(|e| KinshipError::ConfigError(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, KinshipError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            KinshipError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(KinshipError::ConfigError(format!(
                "Config file size {} bytes exceeds maximum {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            KinshipError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Resolve configuration following the lookup order.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, KinshipError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = KinshipConfig::from_toml("").expect("parse");
        assert_eq!(config, KinshipConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.tree.file.is_none());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = KinshipConfig::from_toml("[server]\nport = 9000\n").expect("parse");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn tree_file_is_read() {
        let config = KinshipConfig::from_toml("[tree]\nfile = \"family.json\"\n").expect("parse");
        assert_eq!(config.tree.file, Some(PathBuf::from("family.json")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = KinshipConfig::from_toml("[server]\nhots = \"0.0.0.0\"\n");
        assert!(matches!(result, Err(KinshipError::ConfigError(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = KinshipConfig::resolve(Some(Path::new("/nonexistent/kinship.toml")));
        assert!(matches!(result, Err(KinshipError::ConfigError(_))));
    }
}
