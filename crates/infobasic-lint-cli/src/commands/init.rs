//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_FILE: &str = "infobasic-lint.toml";

const DEFAULT_CONFIG: &str = r#"# infobasic-lint configuration

# "recommended" (default), "strict" or "minimal"
preset = "recommended"

# Enable INFO-level and stricter checks (same as --strict)
strict = false

[analyzer]
# Glob patterns to exclude from directory scans
exclude = [
    "**/backup/**",
    "**/generated/**",
]

# Source file extensions, matched case-insensitively
extensions = ["b"]

# Maximum number of files checked in parallel (default: all cores)
# parallelism = 4

# Rule configurations
# Entries are keyed by rule name or rule code. Each can be disabled and
# have its severity overridden ("error", "warning", "info").

[rules.hardcoded-position]
# Highest literal field position tolerated in R.REC<N>
max_index = 10

[rules.error-handling]
# Lines searched for an ERR/ETEXT check after a service call
lookahead_lines = 5

[rules.nesting-depth]
max_depth = 3
# "balanced" closes on ')' and '}'; "legacy" closes on '}' only
paren_mode = "balanced"

# [rules.naming]
# prefixes = ["CU.", "LOC."]

# [rules.A003]
# severity = "error"

# [rules.includes]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: infobasic-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
