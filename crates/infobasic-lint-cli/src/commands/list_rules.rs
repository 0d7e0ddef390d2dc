//! List rules command implementation.

use infobasic_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<16} {:<20} {:<7} Description", "Codes", "Name", "Strict");
    println!("{}", "-".repeat(90));

    for rule in all_rules() {
        println!(
            "{:<16} {:<20} {:<7} {}",
            rule.codes().join(","),
            rule.name(),
            if rule.strict_only() { "yes" } else { "" },
            rule.description()
        );
    }

    println!("\nS002, I001 and I002 also need strict mode; the other codes of their rules do not.");

    println!("\nPresets:");
    println!("  recommended  - All rules, strict checks only with --strict (default)");
    println!("  strict       - All rules with strict mode always on");
    println!("  minimal      - structure, hardcoded-position, raw-file-io");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  infobasic-lint check --rules structure,raw-file-io");
    println!("  infobasic-lint check --rules S001,A001,A004");
}
