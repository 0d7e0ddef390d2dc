//! Comment-based allowance directives.
//!
//! InfoBasic comment lines (`*`, `!` or `REM`) can suppress diagnostics on
//! the same line or the line below:
//! ```text
//! * infobasic-lint: allow(A001, unreleased-lock) reason="legacy layout"
//! ```

use crate::types::{Diagnostic, Severity};
use std::collections::HashSet;

/// Directive marker inside a comment.
const MARKER: &str = "infobasic-lint:";

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Diagnostic is not allowed.
    Denied,
    /// Diagnostic is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Rule ids or rule names that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

impl AllowDirective {
    fn covers(&self, diagnostic: &Diagnostic) -> bool {
        self.rules.contains("all")
            || self.rules.contains(&diagnostic.rule_id)
            || self.rules.contains(&diagnostic.rule)
    }
}

/// Checks the diagnostic's line and the line above for an allow directive.
///
/// `lines` are the file's lines; `diagnostic.line_number` is 1-indexed.
#[must_use]
pub fn check_allow<S: AsRef<str>>(lines: &[S], diagnostic: &Diagnostic) -> AllowCheck {
    let line = diagnostic.line_number;
    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1].as_ref()) {
            if directive.covers(diagnostic) {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Applies allow directives to a file's diagnostics.
///
/// Allowed diagnostics are dropped. An allowed error without a reason is
/// replaced by a warning asking for one.
#[must_use]
pub fn apply_allowances<S: AsRef<str>>(
    lines: &[S],
    diagnostics: Vec<Diagnostic>,
) -> Vec<Diagnostic> {
    diagnostics
        .into_iter()
        .filter_map(|d| match check_allow(lines, &d) {
            AllowCheck::Denied => Some(d),
            AllowCheck::Allowed { reason: Some(_) } => None,
            AllowCheck::Allowed { reason: None } if d.severity == Severity::Error => {
                let message = format!(
                    "Allow directive for '{}' is missing required reason",
                    d.rule_id
                );
                Some(
                    Diagnostic {
                        severity: Severity::Warning,
                        message,
                        suggestion: None,
                        ..d
                    }
                    .with_suggestion(
                        "Add reason=\"...\" to explain why this exception is necessary",
                    ),
                )
            }
            AllowCheck::Allowed { reason: None } => None,
        })
        .collect()
}

/// Strips an InfoBasic comment leader, returning the comment body.
fn comment_body(line: &str) -> Option<&str> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('*').or_else(|| line.strip_prefix('!')) {
        return Some(rest.trim());
    }
    let upper = line.get(..4)?;
    if upper.eq_ignore_ascii_case("REM ") {
        return Some(line[4..].trim());
    }
    None
}

/// Parses an allowance directive from a comment line.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let directive = comment_body(line)?.strip_prefix(MARKER)?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest.strip_prefix("reason=").and_then(|reason_part| {
        let quoted = reason_part.trim().strip_prefix('"')?;
        let end = quoted.find('"')?;
        Some(quoted[..end].to_string())
    });

    Some(AllowDirective { rules, reason })
}
