//! Rule checking universal variable naming conventions.
//!
//! # Detected Patterns
//!
//! Assignment targets (`NAME = ...`) starting with an uppercase letter that
//! are neither prefixed by a universal prefix (`FN.`, `R.`, `ERR.`, `MY.`,
//! framework namespaces), fully uppercase, nor camelCase.
//!
//! Advisory only: diagnostics are INFO and emitted in strict mode.
//!
//! # Configuration
//!
//! - `prefixes`: additional accepted prefixes (e.g. `["CU.", "LOC."]`)

use infobasic_lint_core::{Diagnostic, FileContext, Rule, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// Rule code for naming.
pub const CODE: &str = "N002";

/// Rule name for naming.
pub const NAME: &str = "naming";

/// Keywords and system variables that may appear as assignment targets.
const EXCLUDED: &[&str] = &["COMI", "ETEXT", "RETURN", "IF", "THEN", "ELSE", "END"];

/// File equates, record reads, error flags, DAS variables and framework
/// namespaces.
const UNIVERSAL_PREFIXES: &[&str] = &[
    "FN.", "R.", "ERR.", "MY.", "EB", "TP", "AA", "AC", "ST", "LD", "FX",
];

static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][A-Za-z0-9_.]+)\s*=").expect("valid regex"));

/// Flags assignment targets outside the universal naming patterns.
#[derive(Debug, Clone, Default)]
pub struct Naming {
    /// Extra prefixes accepted on top of the universal ones.
    pub extra_prefixes: Vec<String>,
}

impl Naming {
    /// Creates a new rule with the universal prefixes only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts additional prefixes.
    #[must_use]
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_prefixes
            .extend(prefixes.into_iter().map(Into::into));
        self
    }

    fn follows_convention(&self, name: &str) -> bool {
        UNIVERSAL_PREFIXES.iter().any(|p| name.starts_with(p))
            || self.extra_prefixes.iter().any(|p| name.starts_with(p.as_str()))
            || is_uppercase(name)
            || is_camel_case(name)
    }
}

fn is_uppercase(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

fn is_camel_case(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_lowercase)
}

impl Rule for Naming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn codes(&self) -> &'static [&'static str] {
        &[CODE]
    }

    fn description(&self) -> &'static str {
        "Variables should use FN.*, R.*, ERR.*, MY.*, UPPERCASE or camelCase names"
    }

    fn strict_only(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
        if !ctx.strict {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();

        for (index, line) in ctx.lines.iter().enumerate() {
            for caps in ASSIGNMENT.captures_iter(line) {
                let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                    continue;
                };
                if EXCLUDED.contains(&name) || self.follows_convention(name) {
                    continue;
                }

                diagnostics.push(ctx.diagnostic(
                    CODE,
                    NAME,
                    Severity::Info,
                    index + 1,
                    format!(
                        "Variable '{name}' should follow universal naming: FN.*, R.*, ERR.*, MY.*, UPPERCASE, or camelCase"
                    ),
                ));
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn check_code(code: &str, strict: bool) -> Vec<Diagnostic> {
        let ctx = FileContext::new(Path::new("TEST.b"), code, strict);
        Naming::new().check(&ctx)
    }

    #[test]
    fn test_silent_outside_strict_mode() {
        assert!(check_code("CustName = 1\n", false).is_empty());
    }

    #[test]
    fn test_flags_mixed_case_name() {
        let diagnostics = check_code("SUBROUTINE X\n    CustName = 'A'\nEND\n", true);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, CODE);
        assert_eq!(diagnostics[0].line_number, 2);
        assert_eq!(diagnostics[0].severity, Severity::Info);
        assert!(diagnostics[0].message.contains("'CustName'"));
        assert_eq!(diagnostics[0].code_snippet, "CustName = 'A'");
    }

    #[test]
    fn test_accepts_universal_patterns() {
        let code = r"FN.CUSTOMER = 'F.CUSTOMER'
R.Customer = ''
ERR.Msg = ''
MY.Total = 0
EB.Value = 1
TOTAL.AMOUNT = 0
Y.COUNT = 1
";
        assert!(check_code(code, true).is_empty());
    }

    #[test]
    fn test_skips_excluded_names() {
        assert!(check_code("COMI = 'X'\nETEXT = ''\n", true).is_empty());
    }

    #[test]
    fn test_comparison_operators_are_not_assignments() {
        assert!(check_code("IF Total >= 5 THEN X = 1\n", true).is_empty());
    }

    #[test]
    fn test_multiple_targets_on_one_line() {
        let diagnostics = check_code("Amount = 1 ; Balance = 2\n", true);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.line_number == 1));
    }

    #[test]
    fn test_extra_prefixes() {
        let ctx = FileContext::new(Path::new("TEST.b"), "CU.Name = 1\n", true);
        assert_eq!(Naming::new().check(&ctx).len(), 1);
        assert!(Naming::new().with_prefixes(["CU."]).check(&ctx).is_empty());
    }

    #[test]
    fn test_case_predicates() {
        assert!(is_uppercase("ACCT.NO_2"));
        assert!(!is_uppercase("AcctNo"));
        assert!(is_camel_case("acctNo"));
        assert!(!is_camel_case("AcctNo"));
    }
}
