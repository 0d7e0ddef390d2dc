//! Rule checking `$INSERT` and `$USING` directives.
//!
//! # Detected Patterns
//!
//! - `I001`: a `FUNCTION` without any `$USING` import (warning, strict only)
//! - `I002`: no `$INSERT` field-definition include at all (info, strict only)
//! - `I003`: a `$USING` module that is not UPPERCASE with dots (warning)

use crate::declarations::{declaration_line, DeclarationKind};
use infobasic_lint_core::{Diagnostic, FileContext, Rule, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// Rule name for includes.
pub const NAME: &str = "includes";

/// Function without `$USING`.
pub const CODE_FUNCTION_WITHOUT_USING: &str = "I001";

/// No `$INSERT` directive.
pub const CODE_MISSING_INSERT: &str = "I002";

/// Malformed `$USING` module name.
pub const CODE_USING_FORMAT: &str = "I003";

static INSERT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\$INSERT\s+").expect("valid regex"));

static USING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[^\S\n]*(\$USING)[^\S\n]+([^\s,;]+)").expect("valid regex")
});

static MODULE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9.]*$").expect("valid regex"));

/// Checks include and import directives.
#[derive(Debug, Clone, Copy, Default)]
pub struct Includes;

impl Includes {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Includes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn codes(&self) -> &'static [&'static str] {
        &[
            CODE_FUNCTION_WITHOUT_USING,
            CODE_MISSING_INSERT,
            CODE_USING_FORMAT,
        ]
    }

    fn description(&self) -> &'static str {
        "Checks $INSERT field definitions and $USING module imports"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let usings: Vec<_> = USING.captures_iter(ctx.content).collect();

        if ctx.strict {
            if let Some(line) = declaration_line(ctx, DeclarationKind::Function) {
                if usings.is_empty() {
                    diagnostics.push(
                        ctx.diagnostic(
                            CODE_FUNCTION_WITHOUT_USING,
                            NAME,
                            Severity::Warning,
                            line,
                            format!(
                                "{} should include $USING directives for framework imports",
                                DeclarationKind::Function.keyword()
                            ),
                        )
                        .with_suggestion("Add: $USING EB.API or project-specific service modules"),
                    );
                }
            }

            if !INSERT.is_match(ctx.content) {
                diagnostics.push(
                    ctx.diagnostic(
                        CODE_MISSING_INSERT,
                        NAME,
                        Severity::Info,
                        1,
                        "Consider adding $INSERT directives for field definitions and common variables",
                    )
                    .with_suggestion(
                        "Add: $INSERT I_F.* (field equates) and $INSERT I_EQUATE (constants)",
                    ),
                );
            }
        }

        for caps in &usings {
            let (Some(directive), Some(module)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            if MODULE_NAME.is_match(module.as_str()) {
                continue;
            }

            diagnostics.push(ctx.diagnostic(
                CODE_USING_FORMAT,
                NAME,
                Severity::Warning,
                ctx.line_at(directive.start()),
                format!(
                    "$USING module '{}' should be UPPERCASE with dots (universal pattern)",
                    module.as_str()
                ),
            ));
        }

        diagnostics
    }
}
