//! # infobasic-lint-rules
//!
//! Built-in lint rules for InfoBasic (T24 / Transact) `.b` sources.
//!
//! Every rule is a lexical heuristic over the raw file text. None of them
//! parse the language.
//!
//! ## Available Rules
//!
//! | Code | Name | Severity | Strict only | Description |
//! |------|------|----------|-------------|-------------|
//! | S001 | `structure` | ERROR | | Missing `SUBROUTINE` / `FUNCTION` declaration |
//! | S002 | `structure` | INFO | yes | `SUBROUTINE` without `GOSUB` sections |
//! | S003 | `structure` | ERROR | | Missing closing `END` |
//! | N002 | `naming` | INFO | yes | Variable outside universal naming patterns |
//! | I001 | `includes` | WARNING | yes | `FUNCTION` without `$USING` |
//! | I002 | `includes` | INFO | yes | No `$INSERT` directive |
//! | I003 | `includes` | WARNING | | Malformed `$USING` module name |
//! | E001 | `error-handling` | WARNING | yes | Service call without error check |
//! | A001 | `hardcoded-position` | ERROR | | Literal field position above 10 |
//! | A003 | `unreleased-lock` | WARNING | | `F.READU` without write or release |
//! | A004 | `raw-file-io` | ERROR | | Raw jBC `OPEN` / `READ` / `WRITE` |
//! | A006 | `nesting-depth` | INFO | | Nesting deeper than 3 |
//!
//! ## Usage
//!
//! ```ignore
//! use infobasic_lint_core::Analyzer;
//! use infobasic_lint_rules::{RawFileIo, Structure};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./BP")
//!     .rule(Structure::new())
//!     .rule(RawFileIo::new())
//!     .build()?;
//! let result = analyzer.analyze();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod declarations;
pub mod error_handling;
pub mod hardcoded_position;
pub mod includes;
pub mod naming;
pub mod nesting_depth;
mod presets;
pub mod raw_file_io;
pub mod structure;
pub mod unreleased_lock;

pub use error_handling::ErrorHandling;
pub use hardcoded_position::HardcodedPosition;
pub use includes::Includes;
pub use naming::Naming;
pub use nesting_depth::{max_nesting, NestingDepth, ParenMode};
pub use presets::{
    all_rules, minimal_rules, recommended_rules, rule_by_name, rules_from_config, Preset,
};
pub use raw_file_io::RawFileIo;
pub use structure::Structure;
pub use unreleased_lock::UnreleasedLock;

/// Re-export core types for convenience.
pub use infobasic_lint_core::{Diagnostic, Rule, Severity};
