//! Shared detection of SUBROUTINE / FUNCTION declarations.

use infobasic_lint_core::FileContext;
use regex::Regex;
use std::sync::LazyLock;

static SUBROUTINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^\S\n]*(SUBROUTINE)\s+").expect("valid regex"));

static FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^\S\n]*(FUNCTION)\s+").expect("valid regex"));

/// Kind of top-level callable a file declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeclarationKind {
    Subroutine,
    Function,
}

impl DeclarationKind {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Subroutine => &SUBROUTINE,
            Self::Function => &FUNCTION,
        }
    }

    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::Subroutine => "SUBROUTINE",
            Self::Function => "FUNCTION",
        }
    }
}

/// Returns the line of the first declaration of `kind`, if any.
///
/// Declarations must start a line (after indentation) and are
/// case-sensitive.
pub(crate) fn declaration_line(ctx: &FileContext, kind: DeclarationKind) -> Option<usize> {
    kind.pattern()
        .captures(ctx.content)
        .and_then(|caps| caps.get(1))
        .map(|keyword| ctx.line_at(keyword.start()))
}
