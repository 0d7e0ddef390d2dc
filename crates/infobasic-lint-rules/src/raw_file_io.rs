//! Rule forbidding raw jBC file I/O.
//!
//! # Detected Patterns
//!
//! - `OPEN 'F.NAME' ...`
//! - `READ REC FROM F.NAME ...`
//! - `WRITE REC TO F.NAME ...`
//!
//! T24 code should go through framework services instead. Every offending
//! statement is reported.

use infobasic_lint_core::{Diagnostic, FileContext, Rule, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// Rule code for raw-file-io.
pub const CODE: &str = "A004";

/// Rule name for raw-file-io.
pub const NAME: &str = "raw-file-io";

static RAW_IO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"OPEN\s+['"]F\.|READ\s+[\w.]+\s+FROM\s+F\.|WRITE\s+[\w.]+\s+TO\s+F\."#)
        .expect("valid regex")
});

/// Flags jBC `OPEN` / `READ ... FROM` / `WRITE ... TO` on `F.` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFileIo;

impl RawFileIo {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for RawFileIo {
    fn name(&self) -> &'static str {
        NAME
    }

    fn codes(&self) -> &'static [&'static str] {
        &[CODE]
    }

    fn description(&self) -> &'static str {
        "Use T24 framework APIs instead of raw jBC file I/O"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
        RAW_IO
            .find_iter(ctx.content)
            .map(|found| {
                ctx.diagnostic(
                    CODE,
                    NAME,
                    Severity::Error,
                    ctx.line_at(found.start()),
                    "Using raw jBC file I/O instead of T24 framework APIs",
                )
                .with_suggestion("Use framework services (EB.API, DAS layer) instead")
            })
            .collect()
    }
}
