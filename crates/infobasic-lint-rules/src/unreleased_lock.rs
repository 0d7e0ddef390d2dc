//! Rule detecting record locks that are never released.
//!
//! # Rationale
//!
//! `F.READU` takes a record lock that is held until the record is written
//! back or explicitly released. A forgotten lock blocks other sessions.
//!
//! # Detected Patterns
//!
//! `F.READU(TARGET, ...)` with no later `F.WRITE(TARGET, ...)` or
//! `F.RELEASE(TARGET, ...)` anywhere after the read in the same file.

use infobasic_lint_core::{Diagnostic, FileContext, Rule, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// Rule code for unreleased-lock.
pub const CODE: &str = "A003";

/// Rule name for unreleased-lock.
pub const NAME: &str = "unreleased-lock";

static READU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"F\.READU\s*\(\s*([^,)\n]+),").expect("valid regex"));

/// Flags `F.READU` locks with no matching write or release.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreleasedLock;

impl UnreleasedLock {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn release_pattern(target: &str) -> Option<Regex> {
    let pattern = format!(
        r"F\.(?:WRITE|RELEASE)\s*\(\s*{}\s*[,)]",
        regex::escape(target)
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::debug!(target, error = %e, "Cannot build release pattern");
            None
        }
    }
}

impl Rule for UnreleasedLock {
    fn name(&self) -> &'static str {
        NAME
    }

    fn codes(&self) -> &'static [&'static str] {
        &[CODE]
    }

    fn description(&self) -> &'static str {
        "F.READU locks must be released by F.WRITE or F.RELEASE"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for caps in READU.captures_iter(ctx.content) {
            let (Some(call), Some(target)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let target = target.as_str().trim();
            if target.is_empty() {
                continue;
            }
            let Some(release) = release_pattern(target) else {
                continue;
            };
            if release.is_match(&ctx.content[call.end()..]) {
                continue;
            }

            diagnostics.push(
                ctx.diagnostic(
                    CODE,
                    NAME,
                    Severity::Warning,
                    ctx.line_at(call.start()),
                    format!("F.READU lock on '{target}' may not be released"),
                )
                .with_suggestion(format!(
                    "Ensure F.WRITE({target}, ...) or F.RELEASE({target}, id) is called before returning"
                )),
            );
        }

        diagnostics
    }
}
