//! Rule forbidding hard-coded dynamic array field positions.
//!
//! # Rationale
//!
//! `R.CUST<15>` silently breaks when the record layout changes. Field
//! equates from `$INSERT I_F.*` keep positions in one place.
//!
//! # Detected Patterns
//!
//! `NAME<N>` where `N` is an integer literal above the threshold. Small
//! positions are tolerated.
//!
//! # Configuration
//!
//! - `max_index`: highest tolerated literal position (default 10)

use infobasic_lint_core::{Diagnostic, FileContext, Rule, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// Rule code for hardcoded-position.
pub const CODE: &str = "A001";

/// Rule name for hardcoded-position.
pub const NAME: &str = "hardcoded-position";

/// Default highest tolerated position.
pub const DEFAULT_MAX_INDEX: u64 = 10;

static FIELD_ACCESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*<\s*(\d+)\s*>").expect("valid regex"));

/// Flags literal field positions above a threshold.
#[derive(Debug, Clone)]
pub struct HardcodedPosition {
    /// Positions up to this value are allowed.
    pub max_index: u64,
}

impl Default for HardcodedPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl HardcodedPosition {
    /// Creates a new rule with the default threshold.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_index: DEFAULT_MAX_INDEX,
        }
    }

    /// Sets the highest tolerated position.
    #[must_use]
    pub fn max_index(mut self, max_index: u64) -> Self {
        self.max_index = max_index;
        self
    }
}

impl Rule for HardcodedPosition {
    fn name(&self) -> &'static str {
        NAME
    }

    fn codes(&self) -> &'static [&'static str] {
        &[CODE]
    }

    fn description(&self) -> &'static str {
        "Use field equates instead of hard-coded field positions"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
        FIELD_ACCESS
            .captures_iter(ctx.content)
            .filter_map(|caps| {
                let (Some(var), Some(digits)) = (caps.get(1), caps.get(2)) else {
                    return None;
                };
                if !exceeds(digits.as_str(), self.max_index) {
                    return None;
                }

                let pos = digits.as_str();
                Some(
                    ctx.diagnostic(
                        CODE,
                        NAME,
                        Severity::Error,
                        ctx.line_at(var.start()),
                        format!(
                            "Hard-coded field position {pos} in '{}<{pos}>'",
                            var.as_str()
                        ),
                    )
                    .with_suggestion("Use field equates instead of position numbers"),
                )
            })
            .collect()
    }
}

/// Returns true if the decimal literal `digits` is greater than `max`.
///
/// Literals of any length are accepted; a value that does not fit in `u64`
/// is always greater.
fn exceeds(digits: &str, max: u64) -> bool {
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return false;
    }
    significant.parse::<u64>().map_or(true, |value| value > max)
}
