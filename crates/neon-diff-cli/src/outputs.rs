//! Workflow output publication.
//!
//! Mirrors the GitHub Actions output contract: when `GITHUB_OUTPUT` names a
//! file, outputs are appended to it in the heredoc format; otherwise they
//! are printed to stdout as `key=value` lines.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Publishes one output value under `key`.
pub fn publish(key: &str, value: &str) -> anyhow::Result<()> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => append_output(Path::new(&path), key, value),
        None => {
            println!("{key}={value}");
            Ok(())
        }
    }
}

fn append_output(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let delimiter = heredoc_delimiter(value);
    writeln!(file, "{key}<<{delimiter}")?;
    writeln!(file, "{value}")?;
    writeln!(file, "{delimiter}")?;
    Ok(())
}

/// Picks a heredoc delimiter that does not collide with any value line.
fn heredoc_delimiter(value: &str) -> String {
    let mut delimiter = String::from("EOF");
    while value.lines().any(|line| line == delimiter) {
        delimiter.push('_');
    }
    delimiter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_avoids_value_lines() {
        assert_eq!(heredoc_delimiter("plain diff text"), "EOF");
        assert_eq!(heredoc_delimiter("a\nEOF\nb"), "EOF_");
        assert_eq!(heredoc_delimiter("EOF\nEOF_"), "EOF__");
    }

    #[test]
    fn outputs_append_in_heredoc_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs");

        append_output(&path, "comment_url", "https://example.test/1").unwrap();
        append_output(&path, "schemadiff", "line one\nline two").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "comment_url<<EOF\nhttps://example.test/1\nEOF\n\
             schemadiff<<EOF\nline one\nline two\nEOF\n"
        );
    }
}
