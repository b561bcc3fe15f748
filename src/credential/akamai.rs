//! `akamai edgeworkers auth` credential source

use std::process::Command;

use super::CredentialSource;
use crate::config::Config;
use crate::error::Result;

/// Mints trace tokens through the Akamai CLI's EdgeWorkers package.
#[derive(Debug, Clone)]
pub struct AkamaiCli {
    program: String,
    hostname: String,
    section: String,
    expiry: u32,
}

impl AkamaiCli {
    pub fn new(
        program: impl Into<String>,
        hostname: impl Into<String>,
        section: impl Into<String>,
        expiry: u32,
    ) -> Self {
        Self {
            program: program.into(),
            hostname: hostname.into(),
            section: section.into(),
            expiry,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.program.clone(),
            config.hostname.clone(),
            config.section.clone(),
            config.expiry,
        )
    }

    /// Arguments passed after the program name
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "edgeworkers".to_string(),
            "auth".to_string(),
            self.hostname.clone(),
        ];
        if !self.section.is_empty() {
            args.push("--section".to_string());
            args.push(self.section.clone());
        }
        args.push("--expiry".to_string());
        args.push(self.expiry.to_string());
        args
    }
}

impl CredentialSource for AkamaiCli {
    fn fetch(&self) -> Result<String> {
        let args = self.args();
        log::debug!("Running {} {}", self.program, args.join(" "));

        let output = match Command::new(&self.program).args(&args).output() {
            Ok(output) => output,
            Err(e) => {
                log::warn!("Failed to run {}: {}", self.program, e);
                return Ok(String::new());
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            log::debug!("{} stderr: {}", self.program, stderr.trim());
        }
        if !output.status.success() {
            log::warn!("{} exited with {}", self.program, output.status);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
