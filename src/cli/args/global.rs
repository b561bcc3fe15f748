//! Global CLI options shared across all commands
//!
//! Bundles the global flags into one struct so handlers take a single
//! argument, and layers them over the config file.

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > built-in default. This
/// struct captures the CLI/env layer; [`GlobalOptions::resolve_config`] merges
/// it over the loaded config file.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (pretty, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.ewtrace/config.yaml)
    pub config: Option<String>,

    /// Header file override
    pub header: Option<PathBuf>,

    /// Keyword override
    pub keyword: Option<String>,

    /// Trace marker override
    pub marker: Option<String>,

    /// Credential program override
    pub program: Option<String>,

    /// EdgeWorkers hostname override
    pub hostname: Option<String>,

    /// `.edgerc` section override
    pub section: Option<String>,

    /// Token expiry override
    pub expiry: Option<u32>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            header: cli.header.clone(),
            keyword: cli.keyword.clone(),
            marker: cli.marker.clone(),
            program: cli.program.clone(),
            hostname: cli.hostname.clone(),
            section: cli.section.clone(),
            expiry: cli.expiry,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Apply the flag/env layer on top of `config`
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(header) = &self.header {
            config.header = header.clone();
        }
        if let Some(keyword) = &self.keyword {
            config.keyword = keyword.clone();
        }
        if let Some(marker) = &self.marker {
            config.marker = marker.clone();
        }
        if let Some(program) = &self.program {
            config.program = program.clone();
        }
        if let Some(hostname) = &self.hostname {
            config.hostname = hostname.clone();
        }
        if let Some(section) = &self.section {
            config.section = section.clone();
        }
        if let Some(expiry) = self.expiry {
            config.expiry = expiry;
        }
    }

    /// Load the config file, apply overrides, and validate the result
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load_at(self.config_ref())?;
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }
}
