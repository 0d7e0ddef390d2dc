//! Context types for rule execution.

use crate::types::{Diagnostic, Severity};
use std::path::Path;

/// Context provided to per-file rules.
///
/// Holds one immutable snapshot of a file: the whole text, the same text
/// split into lines (terminators kept), and the strict flag. Every rule of a
/// run sees the same context.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// File contents split into lines, original terminators included.
    pub lines: Vec<&'a str>,
    /// Whether strict mode (INFO-level and stricter checks) is enabled.
    pub strict: bool,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, strict: bool) -> Self {
        Self {
            path,
            content,
            lines: content.split_inclusive('\n').collect(),
            strict,
        }
    }

    /// Returns the number of lines in the file.
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// Returns the 1-indexed line containing the byte `offset`.
    ///
    /// Counts the newlines preceding `offset` in the full content.
    #[must_use]
    pub fn line_at(&self, offset: usize) -> usize {
        let end = offset.min(self.content.len());
        self.content.as_bytes()[..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }

    /// Returns the trimmed text of `line` (1-indexed), or an empty string if
    /// the line does not exist.
    #[must_use]
    pub fn snippet(&self, line: usize) -> &'a str {
        line.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map_or("", |l| l.trim())
    }

    /// Creates a diagnostic at `line` with the snippet filled in from the
    /// file.
    #[must_use]
    pub fn diagnostic(
        &self,
        rule_id: &str,
        rule: &str,
        severity: Severity,
        line: usize,
        message: impl Into<String>,
    ) -> Diagnostic {
        Diagnostic::new(rule_id, rule, severity, line, message).with_snippet(self.snippet(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(content: &str) -> FileContext<'_> {
        FileContext::new(Path::new("TEST.b"), content, false)
    }

    #[test]
    fn test_lines_keep_terminators() {
        let c = ctx("SUBROUTINE X\r\nEND\n");
        assert_eq!(c.lines, vec!["SUBROUTINE X\r\n", "END\n"]);
        assert_eq!(c.total_lines(), 2);
    }

    #[test]
    fn test_last_line_without_newline() {
        let c = ctx("A\nB");
        assert_eq!(c.total_lines(), 2);
        assert_eq!(ctx("").total_lines(), 0);
    }

    #[test]
    fn test_line_at_counts_newlines() {
        let c = ctx("line1\nline2\nline3");
        assert_eq!(c.line_at(0), 1);
        assert_eq!(c.line_at(5), 1);
        assert_eq!(c.line_at(6), 2);
        assert_eq!(c.line_at(14), 3);
    }

    #[test]
    fn test_snippet_trims_and_handles_missing_lines() {
        let c = ctx("  X = 1  \n");
        assert_eq!(c.snippet(1), "X = 1");
        assert_eq!(c.snippet(0), "");
        assert_eq!(c.snippet(2), "");
    }

    #[test]
    fn test_diagnostic_fills_snippet() {
        let c = ctx("SUBROUTINE X\n    Y = Z<15>\nEND\n");
        let d = c.diagnostic("A001", "hardcoded-position", Severity::Error, 2, "msg");
        assert_eq!(d.code_snippet, "Y = Z<15>");
        assert_eq!(d.line_number, 2);
    }
}
