//! Rule reporting deeply nested code.
//!
//! # Rationale
//!
//! Deep nesting hides the main path of a routine. Early `RETURN`s and
//! `GOSUB` sections keep it flat.
//!
//! # Detected Patterns
//!
//! The maximum bracket depth over the whole file, counting `(` and `{` as
//! openers. Reported once, at line 1, when it exceeds the limit.
//!
//! # Configuration
//!
//! - `max_depth`: deepest tolerated nesting (default 3)
//! - `paren_mode`: `"balanced"` (default) closes on `)` and `}`; `"legacy"`
//!   closes on `}` only, which makes every `(` count permanently

use infobasic_lint_core::{Diagnostic, FileContext, Rule, Severity};

/// Rule code for nesting-depth.
pub const CODE: &str = "A006";

/// Rule name for nesting-depth.
pub const NAME: &str = "nesting-depth";

/// Default deepest tolerated nesting.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// How closing brackets lower the running depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParenMode {
    /// `)` and `}` both close.
    #[default]
    Balanced,
    /// Only `}` closes; `)` is ignored.
    Legacy,
}

impl ParenMode {
    /// Parses a configuration value (`"balanced"` or `"legacy"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "balanced" => Some(Self::Balanced),
            "legacy" => Some(Self::Legacy),
            _ => None,
        }
    }

    fn closes(self, c: char) -> bool {
        match self {
            Self::Balanced => c == '}' || c == ')',
            Self::Legacy => c == '}',
        }
    }
}

/// Returns the maximum bracket depth reached in `content`.
///
/// The running depth never drops below zero.
#[must_use]
pub fn max_nesting(content: &str, mode: ParenMode) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;

    for c in content.chars() {
        if c == '{' || c == '(' {
            depth += 1;
            max = max.max(depth);
        } else if mode.closes(c) {
            depth = depth.saturating_sub(1);
        }
    }

    max
}

/// Reports files whose bracket nesting exceeds a limit.
#[derive(Debug, Clone)]
pub struct NestingDepth {
    /// Deepest tolerated nesting.
    pub max_depth: usize,
    /// Closing-bracket handling.
    pub paren_mode: ParenMode,
}

impl Default for NestingDepth {
    fn default() -> Self {
        Self::new()
    }
}

impl NestingDepth {
    /// Creates a new rule with default limit and balanced counting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            paren_mode: ParenMode::default(),
        }
    }

    /// Sets the deepest tolerated nesting.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the closing-bracket handling.
    #[must_use]
    pub fn paren_mode(mut self, mode: ParenMode) -> Self {
        self.paren_mode = mode;
        self
    }
}

impl Rule for NestingDepth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn codes(&self) -> &'static [&'static str] {
        &[CODE]
    }

    fn description(&self) -> &'static str {
        "Keeps bracket nesting shallow"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
        let depth = max_nesting(ctx.content, self.paren_mode);
        if depth <= self.max_depth {
            return Vec::new();
        }

        vec![ctx
            .diagnostic(
                CODE,
                NAME,
                Severity::Info,
                1,
                format!(
                    "Code has nesting depth of {depth} (should be max {})",
                    self.max_depth
                ),
            )
            .with_suggestion("Consider using early returns to reduce nesting")]
    }
}
