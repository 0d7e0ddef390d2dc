//! Rule trait for defining lint checks.

use crate::context::FileContext;
use crate::types::Diagnostic;

/// A per-file lint check over raw InfoBasic text.
///
/// Rules are stateless across invocations: `check` is a pure function of the
/// context, so the analyzer can run rules in any order and files on any
/// thread. A rule that finds nothing returns an empty vector; rules never
/// fail.
///
/// # Example
///
/// ```ignore
/// use infobasic_lint_core::{Diagnostic, FileContext, Rule, Severity};
///
/// pub struct NoStop;
///
/// impl Rule for NoStop {
///     fn name(&self) -> &'static str { "no-stop" }
///     fn codes(&self) -> &'static [&'static str] { &["X001"] }
///
///     fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
///         ctx.lines
///             .iter()
///             .enumerate()
///             .filter(|(_, l)| l.trim() == "STOP")
///             .map(|(i, _)| ctx.diagnostic("X001", self.name(), Severity::Warning, i + 1, "STOP found"))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "unreleased-lock").
    fn name(&self) -> &'static str;

    /// Returns the rule ids this rule can emit (e.g., `["S001", "S002"]`).
    fn codes(&self) -> &'static [&'static str];

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Whether every diagnostic of this rule requires strict mode.
    fn strict_only(&self) -> bool {
        false
    }

    /// Checks a single file and returns any diagnostics found.
    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn codes(&self) -> &'static [&'static str] {
            &["T001"]
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
            vec![ctx.diagnostic("T001", self.name(), Severity::Info, 1, "Test diagnostic")]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.codes(), &["T001"]);
        assert!(!rule.strict_only());

        let ctx = FileContext::new(Path::new("T.b"), "SUBROUTINE T\n", false);
        let diagnostics = rule.check(&ctx);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code_snippet, "SUBROUTINE T");
    }
}
