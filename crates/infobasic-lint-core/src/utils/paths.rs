//! Path utilities for source discovery.

use std::path::Path;

/// Checks if `path` has one of `extensions` (without the dot), ignoring case.
#[must_use]
pub fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
}

/// Checks if a path matches any exclude pattern.
///
/// Patterns are globs; a pattern like `**/backup/**` also excludes any path
/// containing `/backup/`.
#[must_use]
pub fn is_excluded(path: &Path, patterns: &[glob::Pattern]) -> bool {
    let path_str = path.to_string_lossy();

    patterns.iter().any(|pattern| {
        if pattern.matches(&path_str) {
            return true;
        }
        let normalized = pattern.as_str().replace("**", "");
        !normalized.is_empty() && normalized != "/" && path_str.contains(&normalized)
    })
}
