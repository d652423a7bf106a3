//! Configuration file support for the widget server.
//!
//! Loads an optional `widgets.toml` from the working directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::DEFAULT_NAMESPACE;
use crate::error::ConfigError;

/// File name looked up by [`WidgetsConfig::load`].
pub const CONFIG_FILE: &str = "widgets.toml";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetsConfig {
    /// Address the HTTP server listens on
    pub bind: String,
    /// Host-page global the bundles register into (`window[namespace]`)
    pub registry_namespace: String,
    /// Public base URL embedded in bundles for render requests.
    /// Empty: the bundle uses the origin it was loaded from.
    pub public_url: String,
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5075".to_string(),
            registry_namespace: DEFAULT_NAMESPACE.to_string(),
            public_url: String::new(),
        }
    }
}

impl WidgetsConfig {
    /// Load config from `widgets.toml` in the given directory.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        Self::load_from_path(&root.join(CONFIG_FILE))
    }

    /// Load config from a specific path, falling back to defaults.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Load config from a file the user asked for explicitly.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: PathBuf::from(path),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = WidgetsConfig::default();
        assert_eq!(config.registry_namespace, "SectionWidgets");
        assert_eq!(config.bind, "127.0.0.1:5075");
        assert!(config.public_url.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        assert_eq!(WidgetsConfig::load(temp.path()), WidgetsConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        let temp = TempDir::new().expect("temp dir");
        let mut file = std::fs::File::create(temp.path().join(CONFIG_FILE)).expect("create config");
        writeln!(
            file,
            r#"
registry_namespace = "AcmeWidgets"
public_url = "https://widgets.acme.test"
"#
        )
        .expect("write config");

        let config = WidgetsConfig::load(temp.path());
        assert_eq!(config.registry_namespace, "AcmeWidgets");
        assert_eq!(config.public_url, "https://widgets.acme.test");
        assert_eq!(config.bind, "127.0.0.1:5075");
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "bind = [").expect("write config");

        assert_eq!(WidgetsConfig::load_from_path(&path), WidgetsConfig::default());
        assert!(matches!(
            WidgetsConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let result = WidgetsConfig::from_file(&temp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
