//! Rule requiring an error check after service calls.
//!
//! # Rationale
//!
//! T24 APIs report failures through `ERR` variables or `ETEXT`. A call whose
//! result is never inspected silently swallows the failure.
//!
//! # Detected Patterns
//!
//! `CALL NAME(...)`, `F.NAME(...)` and `ST.NAME(...)` at the start of a line
//! with no error signal (`ERR`, `ETEXT`, `IF x THEN`, `getEtext`, `.error`,
//! `.returnCode`) in the rest of the call line and the following lines.
//!
//! This is a proximity heuristic, not control-flow analysis. Strict only.
//!
//! # Configuration
//!
//! - `lookahead_lines`: lines inspected after the call, counting the rest of
//!   the call line (default 5)

use infobasic_lint_core::{Diagnostic, FileContext, Rule, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// Rule code for error-handling.
pub const CODE: &str = "E001";

/// Rule name for error-handling.
pub const NAME: &str = "error-handling";

/// Default lookahead window.
pub const DEFAULT_LOOKAHEAD: usize = 5;

static CALL_SITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[^\S\n]*(?:CALL\s+([A-Za-z][A-Za-z0-9._]*)|((?:F|ST)\.[A-Za-z0-9._]+))\s*\(",
    )
    .expect("valid regex")
});

static ERROR_SIGNAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bERR\b|\bETEXT\b|IF\s+\w+\s+THEN|getEtext|\.error|\.returnCode")
        .expect("valid regex")
});

/// Requires error checks shortly after service calls.
#[derive(Debug, Clone)]
pub struct ErrorHandling {
    /// Number of lines inspected after each call.
    pub lookahead_lines: usize,
}

impl Default for ErrorHandling {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorHandling {
    /// Creates a new rule with the default lookahead.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lookahead_lines: DEFAULT_LOOKAHEAD,
        }
    }

    /// Sets the lookahead window. Zero is treated as one line.
    #[must_use]
    pub fn lookahead_lines(mut self, lines: usize) -> Self {
        self.lookahead_lines = lines.max(1);
        self
    }

    /// Searches the first `lookahead_lines` lines after the call as one
    /// block of text, so a signal may span several lines.
    fn has_error_check(&self, after_call: &str) -> bool {
        let window = after_call
            .match_indices('\n')
            .nth(self.lookahead_lines.saturating_sub(1))
            .map_or(after_call, |(end, _)| &after_call[..end]);
        ERROR_SIGNAL.is_match(window)
    }
}

impl Rule for ErrorHandling {
    fn name(&self) -> &'static str {
        NAME
    }

    fn codes(&self) -> &'static [&'static str] {
        &[CODE]
    }

    fn description(&self) -> &'static str {
        "Service calls should be followed by an ERR/ETEXT check"
    }

    fn strict_only(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
        if !ctx.strict {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();

        for caps in CALL_SITE.captures_iter(ctx.content) {
            let (Some(call), Some(symbol)) = (caps.get(0), caps.get(1).or_else(|| caps.get(2)))
            else {
                continue;
            };

            if self.has_error_check(&ctx.content[call.end()..]) {
                continue;
            }

            let line = ctx.line_at(call.start());
            diagnostics.push(
                ctx.diagnostic(
                    CODE,
                    NAME,
                    Severity::Warning,
                    line,
                    format!(
                        "Service call to '{}' should check for errors afterwards",
                        symbol.as_str()
                    ),
                )
                .with_suggestion(
                    "Add: IF ERR THEN ... or IF ETEXT THEN ... or check error variable",
                ),
            );
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn check_with(rule: &ErrorHandling, code: &str, strict: bool) -> Vec<Diagnostic> {
        let ctx = FileContext::new(Path::new("TEST.b"), code, strict);
        rule.check(&ctx)
    }

    fn check_code(code: &str) -> Vec<Diagnostic> {
        check_with(&ErrorHandling::new(), code, true)
    }

    #[test]
    fn test_silent_outside_strict_mode() {
        let code = "SUBROUTINE X\n    CALL OPF(FN.CUST, F.CUST)\nEND\n";
        assert!(check_with(&ErrorHandling::new(), code, false).is_empty());
    }

    #[test]
    fn test_unchecked_call() {
        let code = "SUBROUTINE X\n    CALL OPF(FN.CUST, F.CUST)\n    Y = 1\nEND\n";
        let diagnostics = check_code(code);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, CODE);
        assert_eq!(diagnostics[0].line_number, 2);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.contains("'OPF'"));
    }

    #[test]
    fn test_err_argument_on_call_line_counts() {
        let code = "SUBROUTINE X\nCALL F.READ(FN.CUST, ID, R.CUST, F.CUST, ERR)\nEND\n";
        assert!(check_code(code).is_empty());
    }

    #[test]
    fn test_check_within_window() {
        let code = r"SUBROUTINE X
    F.WRITE(FN.CUST, ID, R.CUST)
    Y = 1
    Z = 2
    IF ETEXT THEN RETURN
END
";
        assert!(check_code(code).is_empty());
    }

    #[test]
    fn test_check_outside_window() {
        let code = r"SUBROUTINE X
    ST.CompanyCreation.LoadCompany(ID)
    A = 1
    B = 2
    C = 3
    D = 4
    IF ETEXT THEN RETURN
END
";
        let diagnostics = check_code(code);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0]
            .message
            .contains("'ST.CompanyCreation.LoadCompany'"));

        let wide = ErrorHandling::new().lookahead_lines(6);
        assert!(check_with(&wide, code, true).is_empty());
    }

    #[test]
    fn test_other_error_signals() {
        for signal in [
            "IF RET THEN GOSUB FAIL",
            "MSG = EB.ErrorProcessing.getEtext()",
            "IF resp.error NE '' THEN RETURN",
            "RC = resp.returnCode",
        ] {
            let code = format!("SUBROUTINE X\nCALL SVC(A)\n{signal}\nEND\n");
            assert!(check_code(&code).is_empty(), "signal not recognised: {signal}");
        }
    }

    #[test]
    fn test_condition_split_across_lines() {
        let code = "SUBROUTINE X\nCALL SVC(A)\nIF FAILED\nTHEN RETURN\nEND\n";
        assert!(check_code(code).is_empty());

        let narrow = ErrorHandling::new().lookahead_lines(2);
        assert_eq!(check_with(&narrow, code, true).len(), 1);
    }

    #[test]
    fn test_call_must_start_line() {
        let code = "SUBROUTINE X\nIF A THEN CALL SVC(A)\nEND\n";
        assert!(check_code(code).is_empty());
    }
}
