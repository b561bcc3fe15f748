//! Token refresh: fetch a trace token and write it into the header file

use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;
use crate::credential::{CredentialSource, extract_token};
use crate::error::Result;
use crate::header::{self, RewriteOutcome};

/// Result of a completed refresh
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub keyword: String,
    pub token: String,
    pub header: PathBuf,
    pub lines: usize,
    pub replaced: usize,
}

/// Format the header directive for a token
pub fn format_pair(keyword: &str, token: &str) -> String {
    format!("{keyword}:{token}")
}

/// Run the credential source and extract the token from its output.
///
/// The token is not validated and may be empty.
pub fn fetch_token(config: &Config, source: &dyn CredentialSource) -> Result<String> {
    let output = source.fetch()?;
    let token = extract_token(&output, &config.marker);
    if token.is_empty() {
        log::warn!(
            "No token found after '{}' in credential output; writing an empty value",
            config.marker
        );
    }
    Ok(token)
}

/// Write `token` into the configured header file
pub fn apply(config: &Config, token: &str) -> Result<RefreshOutcome> {
    let RewriteOutcome { lines, replaced } = header::rewrite(&config.header, &config.keyword, token)?;
    if replaced == 0 {
        log::warn!(
            "No line containing '{}' in {}; file left unchanged",
            config.keyword,
            config.header.display()
        );
    }

    Ok(RefreshOutcome {
        keyword: config.keyword.clone(),
        token: token.to_string(),
        header: config.header.clone(),
        lines,
        replaced,
    })
}

/// Fetch a fresh token and write it into the header file.
///
/// `report` receives the `keyword:token` pair after the fetch and before the
/// header is touched, so it still runs when the header file is missing.
pub fn refresh(
    config: &Config,
    source: &dyn CredentialSource,
    report: impl FnOnce(&str),
) -> Result<RefreshOutcome> {
    let token = fetch_token(config, source)?;
    report(&format_pair(&config.keyword, &token));
    apply(config, &token)
}
