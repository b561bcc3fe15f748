//! Credential sources for the EdgeWorkers trace token

use crate::error::Result;

pub mod akamai;

pub use akamai::AkamaiCli;

/// A source of raw credential tool output.
///
/// Implementations return the text the token is parsed from; they never fail
/// just because the tool produced nothing useful.
pub trait CredentialSource {
    /// Run the tool and return its standard output
    fn fetch(&self) -> Result<String>;
}

/// Extract the token from credential tool output.
///
/// Takes the first line containing `marker`, keeps the text after the marker,
/// and returns whatever follows the first `:` with surrounding whitespace
/// trimmed. Output without the marker, or without a `:` after it, yields an
/// empty token.
pub fn extract_token(output: &str, marker: &str) -> String {
    if marker.is_empty() {
        return String::new();
    }

    output
        .lines()
        .find_map(|line| line.find(marker).map(|idx| &line[idx + marker.len()..]))
        .and_then(|rest| rest.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Credential source returning fixed output
#[cfg(test)]
pub struct StaticSource(pub String);

#[cfg(test)]
impl CredentialSource for StaticSource {
    fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTH_OUTPUT: &str = "\
Creating auth token ...

-----------------------------
Add the following request header to your requests to get additional trace information.
Akamai-EW-Trace: st=1700000000~exp=1700003600~acl=/*~hmac=abc123

";

    #[test]
    fn test_extract_from_cli_output() {
        let token = extract_token(AUTH_OUTPUT, "EW-Trace");
        assert_eq!(token, "st=1700000000~exp=1700003600~acl=/*~hmac=abc123");
    }

    #[test]
    fn test_extract_without_marker_is_empty() {
        assert_eq!(extract_token("ERROR: section not found", "EW-Trace"), "");
        assert_eq!(extract_token("", "EW-Trace"), "");
    }

    #[test]
    fn test_extract_without_delimiter_is_empty() {
        assert_eq!(extract_token("Akamai-EW-Trace token-without-colon", "EW-Trace"), "");
    }

    #[test]
    fn test_extract_uses_first_matching_line() {
        let output = "EW-Trace: first\nEW-Trace: second\n";
        assert_eq!(extract_token(output, "EW-Trace"), "first");
    }

    #[test]
    fn test_extract_ignores_colons_before_marker() {
        let output = "header: Akamai-EW-Trace: value\n";
        assert_eq!(extract_token(output, "EW-Trace"), "value");
    }

    #[test]
    fn test_extract_handles_crlf() {
        assert_eq!(extract_token("Akamai-EW-Trace: tok\r\n", "EW-Trace"), "tok");
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource("Akamai-EW-Trace: abc".to_string());
        let output = source.fetch().unwrap();
        assert_eq!(extract_token(&output, "EW-Trace"), "abc");
    }
}
