//! Rule checking the overall shape of an InfoBasic source file.
//!
//! # Rationale
//!
//! Every source must declare exactly one callable (`SUBROUTINE` or
//! `FUNCTION`) and close with a bare `END`. Subroutines are expected to be
//! split into labelled sections reached through `GOSUB`.
//!
//! # Detected Patterns
//!
//! - `S001`: no `SUBROUTINE` / `FUNCTION` declaration (error, line 1)
//! - `S002`: a `SUBROUTINE` with neither `GOSUB` nor label lines (info, strict only)
//! - `S003`: no line consisting of `END` (error, last line)

use crate::declarations::{declaration_line, DeclarationKind};
use infobasic_lint_core::{Diagnostic, FileContext, Rule, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// Rule name for structure.
pub const NAME: &str = "structure";

/// Missing declaration.
pub const CODE_MISSING_DECLARATION: &str = "S001";

/// Subroutine without sections.
pub const CODE_NO_SECTIONS: &str = "S002";

/// Missing `END`.
pub const CODE_MISSING_END: &str = "S003";

static GOSUB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*GOSUB\s+").expect("valid regex"));

static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[A-Z][A-Z0-9._]*:\s*$").expect("valid regex"));

static END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*END\s*$").expect("valid regex"));

/// Checks declaration, section organisation and the closing `END`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Structure;

impl Structure {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Structure {
    fn name(&self) -> &'static str {
        NAME
    }

    fn codes(&self) -> &'static [&'static str] {
        &[CODE_MISSING_DECLARATION, CODE_NO_SECTIONS, CODE_MISSING_END]
    }

    fn description(&self) -> &'static str {
        "Requires a SUBROUTINE/FUNCTION declaration, GOSUB sections and a closing END"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
        let subroutine = declaration_line(ctx, DeclarationKind::Subroutine);
        let function = declaration_line(ctx, DeclarationKind::Function);

        if subroutine.is_none() && function.is_none() {
            return vec![ctx.diagnostic(
                CODE_MISSING_DECLARATION,
                NAME,
                Severity::Error,
                1,
                "File must define either SUBROUTINE or FUNCTION",
            )];
        }

        let mut diagnostics = Vec::new();

        if let Some(line) = subroutine {
            let organised = GOSUB.is_match(ctx.content) || LABEL.is_match(ctx.content);
            if ctx.strict && !organised {
                diagnostics.push(
                    ctx.diagnostic(
                        CODE_NO_SECTIONS,
                        NAME,
                        Severity::Info,
                        line,
                        "SUBROUTINE should use GOSUB sections for code organization",
                    )
                    .with_suggestion(
                        "Consider organizing code with labeled sections and GOSUB calls",
                    ),
                );
            }
        }

        if !END.is_match(ctx.content) {
            let last = ctx.total_lines().max(1);
            diagnostics.push(ctx.diagnostic(
                CODE_MISSING_END,
                NAME,
                Severity::Error,
                last,
                "Code must end with END statement",
            ));
        }

        diagnostics
    }
}
