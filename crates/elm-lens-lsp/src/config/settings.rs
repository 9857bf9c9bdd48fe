//! Configuration Settings

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Name of the settings file looked up in the workspace root
pub const SETTINGS_FILE: &str = "elm-lens.toml";

/// Errors raised while loading settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level settings structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Client capabilities assumed when the client does not say otherwise
    pub capabilities: Capabilities,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load settings from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Load `elm-lens.toml` from a workspace root
    pub fn load_from_root(root: &Path) -> Result<Self, ConfigError> {
        Self::load(&root.join(SETTINGS_FILE))
    }
}

/// Optional client features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Capabilities {
    /// Client can run the `elm.expose` / `elm.unexpose` commands
    #[serde(rename = "expose_unexpose")]
    pub expose_unexpose_support: bool,
}

impl Capabilities {
    /// Apply `extendedCapabilities` from the client's initialization options.
    ///
    /// Only keys the client actually sent override the current values.
    pub fn with_initialization_options(self, options: &Value) -> Self {
        let extended = options.get("extendedCapabilities");
        let expose = extended
            .and_then(|caps| caps.get("exposeUnexposeSupport"))
            .and_then(Value::as_bool);
        Self {
            expose_unexpose_support: expose.unwrap_or(self.expose_unexpose_support),
        }
    }
}
