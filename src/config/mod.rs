//! Configuration management for ewtrace
//!
//! Every parameter has a built-in default, so a run without any config file
//! refreshes `./header` using `akamai edgeworkers auth ewcc02.ewcc.in`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Credential tool invoked to mint the trace token
pub const DEFAULT_PROGRAM: &str = "akamai";
/// EdgeWorkers hostname the token is requested for
pub const DEFAULT_HOSTNAME: &str = "ewcc02.ewcc.in";
/// Section of `~/.edgerc` holding the API credentials
pub const DEFAULT_SECTION: &str = "ewcc";
/// Token lifetime requested from the credential tool, in minutes
pub const DEFAULT_EXPIRY: u32 = 60;
/// Header file rewritten in place
pub const DEFAULT_HEADER: &str = "header";
/// Keyword identifying the line to replace
pub const DEFAULT_KEYWORD: &str = "Akamai-EW-Trace";
/// Marker locating the token in the credential tool's output
pub const DEFAULT_MARKER: &str = "EW-Trace";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential tool executable (name on PATH or full path)
    pub program: String,

    /// Hostname passed to `edgeworkers auth`
    pub hostname: String,

    /// `.edgerc` section passed via `--section`
    pub section: String,

    /// Token expiry passed via `--expiry`
    pub expiry: u32,

    /// Header file to rewrite
    pub header: PathBuf,

    /// Keyword of the line to replace
    pub keyword: String,

    /// Trace marker searched for in the tool output
    pub marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            hostname: DEFAULT_HOSTNAME.to_string(),
            section: DEFAULT_SECTION.to_string(),
            expiry: DEFAULT_EXPIRY,
            header: PathBuf::from(DEFAULT_HEADER),
            keyword: DEFAULT_KEYWORD.to_string(),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".ewtrace").join("config.yaml"))
    }

    /// Resolve the config path: explicit override or the default location
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path.
    ///
    /// An explicitly named file must exist. When no path is given, a missing
    /// default file (or home directory) falls back to the built-in defaults.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => match Self::default_path() {
                Ok(default) if default.exists() => Self::load_from(&default),
                _ => {
                    log::debug!("No config file found, using built-in defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        // An empty file deserializes to a unit value rather than a mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        log::debug!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Validate that the settings can drive a refresh
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("program", &self.program),
            ("hostname", &self.hostname),
            ("keyword", &self.keyword),
            ("marker", &self.marker),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")).into());
            }
        }

        if self.expiry == 0 {
            return Err(
                ConfigError::Invalid("expiry must be greater than zero".to_string()).into(),
            );
        }

        Ok(())
    }
}
