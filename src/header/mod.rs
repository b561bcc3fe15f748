//! In-place rewriting of the header file
//!
//! The file is treated as raw bytes so unmodified lines round-trip exactly,
//! whatever their encoding or line terminator.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{HeaderError, Result};

/// Summary of one header rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewriteOutcome {
    /// Lines in the file (unchanged by the rewrite)
    pub lines: usize,
    /// Lines that contained the keyword and were replaced
    pub replaced: usize,
}

/// Replace every line containing `keyword` with `keyword:token`.
///
/// The file must already exist; it is opened read-write without creation, so
/// a missing file fails before anything is written. The replacement keeps the
/// original line's terminator, and all other lines are written back verbatim.
/// With no matching line the file content is unchanged.
pub fn rewrite(path: &Path, keyword: &str, token: &str) -> Result<RewriteOutcome> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| HeaderError::io(path, e))?;

    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .map_err(|e| HeaderError::io(path, e))?;

    let pair = format!("{keyword}:{token}");
    let mut output = Vec::with_capacity(contents.len() + pair.len());
    let mut outcome = RewriteOutcome {
        lines: 0,
        replaced: 0,
    };

    for line in contents.split_inclusive(|b| *b == b'\n') {
        outcome.lines += 1;
        if contains(line, keyword.as_bytes()) {
            outcome.replaced += 1;
            output.extend_from_slice(pair.as_bytes());
            output.extend_from_slice(terminator(line));
        } else {
            output.extend_from_slice(line);
        }
    }

    let write_back = |file: &mut File| -> std::io::Result<()> {
        file.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        file.write_all(&output)?;
        file.flush()
    };
    write_back(&mut file).map_err(|e| HeaderError::io(path, e))?;

    log::debug!(
        "Rewrote {} ({} lines, {} replaced)",
        path.display(),
        outcome.lines,
        outcome.replaced
    );

    Ok(outcome)
}

/// Return the first line containing `keyword`, without its terminator.
pub fn find(path: &Path, keyword: &str) -> Result<Option<String>> {
    let contents = std::fs::read(path).map_err(|e| HeaderError::io(path, e))?;

    Ok(contents
        .split_inclusive(|b| *b == b'\n')
        .find(|line| contains(line, keyword.as_bytes()))
        .map(|line| {
            let body = &line[..line.len() - terminator(line).len()];
            String::from_utf8_lossy(body).into_owned()
        }))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

fn terminator(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r\n") {
        &line[line.len() - 2..]
    } else if line.ends_with(b"\n") {
        &line[line.len() - 1..]
    } else {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::tempdir;

    const KEYWORD: &str = "Akamai-EW-Trace";

    fn write_header(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join("header");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_replaces_only_matching_line() {
        let temp = tempdir().unwrap();
        let path = write_header(
            temp.path(),
            "Pragma: akamai-x-ew-debug\nAkamai-EW-Trace:old\nHost: www.example.com\n",
        );

        let outcome = rewrite(&path, KEYWORD, "T").unwrap();

        assert_eq!(outcome, RewriteOutcome { lines: 3, replaced: 1 });
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Pragma: akamai-x-ew-debug\nAkamai-EW-Trace:T\nHost: www.example.com\n"
        );
    }

    #[test]
    fn test_no_match_is_byte_identical() {
        let temp = tempdir().unwrap();
        let original = "Pragma: akamai-x-ew-debug\r\nHost: www.example.com";
        let path = write_header(temp.path(), original);

        let outcome = rewrite(&path, KEYWORD, "T").unwrap();

        assert_eq!(outcome.replaced, 0);
        assert_eq!(fs::read(&path).unwrap(), original.as_bytes());
    }

    #[test]
    fn test_last_line_stays_unterminated() {
        let temp = tempdir().unwrap();
        let path = write_header(temp.path(), "Host: a\nAkamai-EW-Trace: old");

        rewrite(&path, KEYWORD, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Host: a\nAkamai-EW-Trace:new");
    }

    #[test]
    fn test_crlf_terminator_is_kept() {
        let temp = tempdir().unwrap();
        let path = write_header(temp.path(), "Akamai-EW-Trace: old\r\nHost: a\r\n");

        rewrite(&path, KEYWORD, "new").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Akamai-EW-Trace:new\r\nHost: a\r\n"
        );
    }

    #[test]
    fn test_empty_token_is_written() {
        let temp = tempdir().unwrap();
        let path = write_header(temp.path(), "Akamai-EW-Trace: old\n");

        rewrite(&path, KEYWORD, "").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Akamai-EW-Trace:\n");
    }

    #[test]
    fn test_every_matching_line_is_replaced() {
        let temp = tempdir().unwrap();
        let path = write_header(temp.path(), "Akamai-EW-Trace: a\nX-Akamai-EW-Trace-Copy: b\n");

        let outcome = rewrite(&path, KEYWORD, "t").unwrap();

        assert_eq!(outcome.replaced, 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Akamai-EW-Trace:t\nAkamai-EW-Trace:t\n"
        );
    }

    #[test]
    fn test_second_run_replaces_first_token() {
        let temp = tempdir().unwrap();
        let path = write_header(temp.path(), "Host: a\nAkamai-EW-Trace: old\nAccept: */*\n");

        rewrite(&path, KEYWORD, "first-token-that-is-longer").unwrap();
        rewrite(&path, KEYWORD, "second").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Host: a\nAkamai-EW-Trace:second\nAccept: */*\n"
        );
    }

    #[test]
    fn test_non_utf8_lines_are_preserved() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("header");
        let original: &[u8] = b"X-Raw: \xff\xfe\nAkamai-EW-Trace: old\n";
        fs::write(&path, original).unwrap();

        rewrite(&path, KEYWORD, "t").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"X-Raw: \xff\xfe\nAkamai-EW-Trace:t\n");
    }

    #[test]
    fn test_missing_file_is_not_created() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("header");

        let err = rewrite(&path, KEYWORD, "t").unwrap_err();

        assert!(matches!(err, Error::Header(HeaderError::NotFound(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_file_stays_empty() {
        let temp = tempdir().unwrap();
        let path = write_header(temp.path(), "");

        let outcome = rewrite(&path, KEYWORD, "t").unwrap();

        assert_eq!(outcome, RewriteOutcome { lines: 0, replaced: 0 });
        assert_eq!(fs::read(&path).unwrap(), b"");
    }

    #[test]
    fn test_find_returns_keyword_line() {
        let temp = tempdir().unwrap();
        let path = write_header(temp.path(), "Host: a\nAkamai-EW-Trace:abc\r\n");

        assert_eq!(
            find(&path, KEYWORD).unwrap().as_deref(),
            Some("Akamai-EW-Trace:abc")
        );
        assert_eq!(find(&path, "X-Missing").unwrap(), None);
    }
}
