//! # infobasic-lint-core
//!
//! Core framework for linting T24 InfoBasic sources with lexical rules.
//!
//! This crate provides the foundational types for the checker:
//!
//! - [`Rule`] trait for per-file checks over raw text
//! - [`FileContext`] holding one file's immutable snapshot
//! - [`Diagnostic`] and [`Severity`] for findings
//! - [`Analyzer`] for file discovery and running rules
//!
//! ## Example
//!
//! ```ignore
//! use infobasic_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./BP")
//!     .rule(MyRule::new())
//!     .strict(true)
//!     .build()?;
//!
//! let result = analyzer.analyze();
//! std::process::exit(i32::from(result.has_errors()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

/// Utility modules for the analyzer and rule implementations.
pub mod utils;

pub use analyzer::{read_source, Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use rule::{Rule, RuleBox};
pub use types::{
    count_by_severity, sort_for_display, Diagnostic, FailureKind, FileFailure, FileReport,
    LintDiagnostic, LintResult, Severity,
};
pub use utils::allowance::AllowCheck;
