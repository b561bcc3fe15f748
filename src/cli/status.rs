//! Status command implementation

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::header;
use crate::output::{self, Formattable, json};

/// Snapshot of the resolved settings and the header file
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// Config file in effect, if one was found
    pub config_file: Option<PathBuf>,
    pub settings: Config,
    pub header_exists: bool,
    /// Current keyword line of the header file
    pub current_line: Option<String>,
}

impl StatusReport {
    pub fn collect(opts: &GlobalOptions) -> Result<Self> {
        let settings = opts.resolve_config()?;
        let config_file = Config::resolve_path(opts.config_ref())
            .ok()
            .filter(|p| p.exists());

        let header_exists = settings.header.is_file();
        let current_line = if header_exists {
            header::find(&settings.header, &settings.keyword)?
        } else {
            None
        };

        Ok(Self {
            config_file,
            settings,
            header_exists,
            current_line,
        })
    }
}

impl Formattable for StatusReport {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(json::format_json(self)?),
            OutputFormat::Pretty => Ok(self.pretty()),
        }
    }
}

impl StatusReport {
    fn pretty(&self) -> String {
        let s = &self.settings;
        let mut lines = vec![format!("{}\n", "ewtrace Status".bold())];

        match &self.config_file {
            Some(path) => lines.push(format!("Config file: {}", path.display().to_string().cyan())),
            None => lines.push(format!("Config file: {}", "(built-in defaults)".dimmed())),
        }

        lines.push(format!(
            "Credential command: {} edgeworkers auth {} --section {} --expiry {}",
            s.program, s.hostname, s.section, s.expiry
        ));
        lines.push(format!("Trace marker: {}", s.marker));
        lines.push(String::new());

        let header = s.header.display().to_string();
        if !self.header_exists {
            lines.push(format!("{} Header file not found: {}", "✗".red(), header));
        } else {
            lines.push(format!("{} Header file: {}", "✓".green(), header.cyan()));
            match &self.current_line {
                Some(line) => lines.push(format!("{} Current line: {}", "✓".green(), line)),
                None => {
                    lines.push(format!("{} No line contains '{}'", "⚠".yellow(), s.keyword));
                    lines.push("  → refresh will leave the file unchanged".to_string());
                }
            }
        }

        lines.join("\n")
    }
}

/// Run the status command
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let report = StatusReport::collect(opts)?;
    output::print(&report, opts.format)
}
