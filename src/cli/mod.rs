//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod refresh;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};

/// ewtrace - refresh the Akamai-EW-Trace line of a request header file
#[derive(Parser, Debug)]
#[command(name = "ewtrace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "EWTRACE_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "EWTRACE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Header file to rewrite [default: header]
    #[arg(long, global = true, env = "EWTRACE_HEADER", hide_env = true)]
    pub header: Option<PathBuf>,

    /// Keyword of the line to replace [default: Akamai-EW-Trace]
    #[arg(long, global = true, env = "EWTRACE_KEYWORD", hide_env = true)]
    pub keyword: Option<String>,

    /// Marker locating the token in the credential output [default: EW-Trace]
    #[arg(long, global = true, env = "EWTRACE_MARKER", hide_env = true)]
    pub marker: Option<String>,

    /// Credential tool to run [default: akamai]
    #[arg(long, global = true, env = "EWTRACE_PROGRAM", hide_env = true)]
    pub program: Option<String>,

    /// EdgeWorkers hostname to request the token for [default: ewcc02.ewcc.in]
    #[arg(long, global = true, env = "EWTRACE_HOSTNAME", hide_env = true)]
    pub hostname: Option<String>,

    /// Section of ~/.edgerc holding the API credentials [default: ewcc]
    #[arg(long, global = true, env = "EWTRACE_SECTION", hide_env = true)]
    pub section: Option<String>,

    /// Token expiry in minutes [default: 60]
    #[arg(long, global = true, env = "EWTRACE_EXPIRY", hide_env = true)]
    pub expiry: Option<u32>,

    /// Enable debug logging
    #[arg(long, global = true, env = "EWTRACE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a fresh trace token and write it into the header file
    Refresh,

    /// Show resolved settings and the current header line
    Status,

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   ewtrace completion bash > /etc/bash_completion.d/ewtrace
  zsh:    ewtrace completion zsh > \"${fpath[1]}/_ewtrace\"
  fish:   ewtrace completion fish > ~/.config/fish/completions/ewtrace.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
