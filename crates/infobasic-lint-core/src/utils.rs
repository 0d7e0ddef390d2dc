//! Utility functions for the analyzer and rule implementations.

pub mod allowance;
pub mod paths;

#[doc(inline)]
pub use allowance::{apply_allowances, check_allow, AllowCheck};
#[doc(inline)]
pub use paths::{has_source_extension, is_excluded};
