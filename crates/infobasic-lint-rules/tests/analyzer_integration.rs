//! Integration test: built-in rules end-to-end via Analyzer.
//!
//! Uses fixture sources under `tests/fixtures/bp/` plus temporary
//! directories for the cases that need a specific file layout.

use infobasic_lint_core::{Analyzer, Config, Diagnostic, FailureKind, LintResult, Severity};
use infobasic_lint_rules::{all_rules, rules_from_config};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bp")
}

fn analyze(root: &Path, strict: bool) -> LintResult {
    analyze_with(root, strict, Config::default())
}

fn analyze_with(root: &Path, strict: bool, config: Config) -> LintResult {
    let mut builder = Analyzer::builder().root(root).strict(strict);
    for rule in rules_from_config(&config) {
        builder = builder.rule_box(rule);
    }
    builder
        .config(config)
        .build()
        .expect("analyzer should build")
        .analyze()
}

fn check(content: &str, strict: bool) -> Vec<Diagnostic> {
    let mut builder = Analyzer::builder().strict(strict);
    for rule in all_rules() {
        builder = builder.rule_box(rule);
    }
    let analyzer = builder.build().expect("analyzer should build");
    analyzer
        .check_source(Path::new("TEST.b"), content)
        .sorted()
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.rule_id.as_str()).collect()
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("fixture write");
    path
}

// ── Fixtures ──

#[test]
fn clean_source_has_no_issues_even_in_strict_mode() {
    let result = analyze(&fixture_root().join("ACCT.UPDATE.b"), true);
    assert_eq!(result.files_checked, 1);
    assert!(
        result.diagnostics().next().is_none(),
        "unexpected diagnostics: {:#?}",
        result.diagnostics().collect::<Vec<_>>()
    );
    assert!(!result.has_errors());
}

#[test]
fn legacy_source_reports_anti_patterns() {
    let result = analyze(&fixture_root().join("legacy/LEGACY.READ.b"), false);
    let report = &result.files[0];
    let diagnostics = report.sorted();

    let found: Vec<(&str, usize)> = diagnostics
        .iter()
        .map(|d| (d.rule_id.as_str(), d.line_number))
        .collect();
    assert_eq!(
        found,
        vec![("A004", 6), ("A004", 7), ("A001", 8), ("A003", 9)]
    );
    assert_eq!(report.count_by_severity(), (3, 1, 0));
    assert!(result.has_errors());
}

#[test]
fn directory_scan_is_recursive_sorted_and_filtered() {
    let root = fixture_root();
    let result = analyze(&root, false);

    let names: Vec<String> = result
        .files
        .iter()
        .map(|f| {
            f.path
                .strip_prefix(&root)
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(
        names,
        vec!["ACCT.UPDATE.b", "legacy/LEGACY.READ.b", "legacy/NO.DECL.b"]
    );
    assert_eq!(result.files_with_issues().len(), 2);
    assert!(result.has_errors());

    let no_decl = result
        .report_for(&root.join("legacy/NO.DECL.b"))
        .expect("report for NO.DECL.b");
    assert_eq!(codes(&no_decl.diagnostics), vec!["S001"]);
}

#[test]
fn excluded_directory_is_skipped() {
    let config = Config::parse("[analyzer]\nexclude = [\"**/legacy/**\"]\n").expect("valid config");
    let result = analyze_with(&fixture_root(), false, config);
    assert_eq!(result.files_checked, 1);
    assert!(!result.has_errors());
}

// ── Behavioral properties ──

#[test]
fn missing_declaration_reports_only_s001() {
    let diagnostics = check("X = 1\nY = 2\nEND\n", false);
    assert_eq!(codes(&diagnostics), vec!["S001"]);
    assert_eq!(diagnostics[0].line_number, 1);
}

#[test]
fn missing_end_is_reported_at_last_line() {
    let content = "SUBROUTINE X\nGOSUB MAIN\nMAIN:\n    Y = 1\n    RETURN\n";
    let diagnostics = check(content, false);
    assert_eq!(codes(&diagnostics), vec!["S003"]);
    assert_eq!(diagnostics[0].line_number, 5);
}

#[test]
fn validation_is_idempotent() {
    let content = fs::read_to_string(fixture_root().join("legacy/LEGACY.READ.b"))
        .expect("fixture should exist");
    assert_eq!(check(&content, true), check(&content, true));
    assert_eq!(check(&content, false), check(&content, false));
}

#[test]
fn strict_mode_only_adds_diagnostics() {
    let sources = [
        "X = 1\n",
        "SUBROUTINE FLAT\nCustName = 1\nCALL SVC(A)\nRETURN\n",
        "FUNCTION CALC(A)\n$USING eb.api\nY = R<12>\nRETURN A\nEND\n",
    ];
    for source in sources {
        let relaxed = check(source, false);
        let strict = check(source, true);
        for d in &relaxed {
            assert!(strict.contains(d), "strict mode dropped {d}");
        }
        assert!(strict.len() >= relaxed.len());
    }

    let strict = check(sources[1], true);
    for code in ["S002", "N002", "E001", "I002"] {
        assert!(codes(&strict).contains(&code), "missing {code}");
    }
}

#[test]
fn field_position_threshold() {
    let high = check("SUBROUTINE X\nY = BALANCE<15>\nEND\n", false);
    assert_eq!(codes(&high), vec!["A001"]);
    assert_eq!(high[0].severity, Severity::Error);

    let low = check("SUBROUTINE X\nY = BALANCE<3>\nEND\n", false);
    assert!(low.is_empty());

    let huge = check("SUBROUTINE X\nY = BALANCE<99999999999999999999999>\nEND\n", false);
    assert_eq!(codes(&huge), vec!["A001"]);

    let split = check("SUBROUTINE X\nY = BALANCE<\n15>\nEND\n", false);
    assert_eq!(codes(&split), vec!["A001"]);
    assert_eq!(split[0].line_number, 2);
}

#[test]
fn error_check_may_span_lines() {
    let content = "SUBROUTINE X\nCALL SVC(A)\nIF FAILED\nTHEN RETURN\nEND\n";
    assert!(!codes(&check(content, true)).contains(&"E001"));
}

#[test]
fn record_lock_release() {
    let locked = "SUBROUTINE X\nF.READU(ACCT.FILE, ID, R, F, E, '')\nEND\n";
    let diagnostics = check(locked, false);
    assert_eq!(codes(&diagnostics), vec!["A003"]);
    assert_eq!(diagnostics[0].severity, Severity::Warning);

    let released =
        "SUBROUTINE X\nF.READU(ACCT.FILE, ID, R, F, E, '')\nF.RELEASE(ACCT.FILE, ID)\nEND\n";
    assert!(check(released, false).is_empty());
}

#[test]
fn raw_file_io_presence_and_removal() {
    let raw = "SUBROUTINE X\nWRITE R.LOG TO F.LOG, ID\nEND\n";
    let diagnostics = check(raw, false);
    assert_eq!(codes(&diagnostics), vec!["A004"]);
    assert_eq!(diagnostics[0].line_number, 2);

    let framework = "SUBROUTINE X\nF.WRITE(FN.LOG, ID, R.LOG)\nEND\n";
    assert!(check(framework, false).is_empty());
}

#[test]
fn run_fails_iff_some_file_has_errors() {
    let temp = TempDir::new().expect("temp dir");
    // Warnings and infos only.
    write(
        temp.path(),
        "A.b",
        "SUBROUTINE A\nF.READU(A.FILE, ID, R, F, E, '')\nEND\n",
    );
    write(temp.path(), "B.b", "SUBROUTINE B\nY = F(G(H(I(1))))\nEND\n");

    let result = analyze(temp.path(), true);
    assert_eq!(result.files_checked, 2);
    assert!(result.has_violations_at(Severity::Warning));
    assert!(!result.has_errors());

    write(temp.path(), "C.b", "SUBROUTINE C\nY = R<11>\nEND\n");
    let result = analyze(temp.path(), true);
    assert!(result.has_errors());
    assert_eq!(result.files_with_issues().len(), 3);
}

#[test]
fn invalid_inputs_count_as_errors() {
    let temp = TempDir::new().expect("temp dir");
    let missing = analyze(&temp.path().join("NOPE.b"), false);
    assert_eq!(missing.failures[0].kind, FailureKind::NotFound);
    assert!(missing.has_errors());

    let other = write(temp.path(), "notes.txt", "SUBROUTINE X\nEND\n");
    let wrong = analyze(&other, false);
    assert_eq!(wrong.failures[0].kind, FailureKind::NotSourceFile);
    assert!(wrong.has_errors());

    let empty = analyze(temp.path(), false);
    assert_eq!(empty.files_checked, 0);
    assert!(!empty.has_errors());
}

// ── Configuration ──

#[test]
fn config_disables_and_overrides() {
    let temp = TempDir::new().expect("temp dir");
    write(
        temp.path(),
        "X.b",
        "SUBROUTINE X\nOPEN 'F.CUSTOMER' TO F.CUST ELSE RETURN\nY = R<12>\nEND\n",
    );

    let config = Config::parse(
        r#"
[rules.raw-file-io]
enabled = false

[rules.A001]
severity = "warning"
"#,
    )
    .expect("valid config");
    let result = analyze_with(temp.path(), false, config);
    let diagnostics: Vec<&Diagnostic> = result.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule_id, "A001");
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(!result.has_errors());
}

#[test]
fn legacy_paren_mode_from_config() {
    let temp = TempDir::new().expect("temp dir");
    write(
        temp.path(),
        "X.b",
        "SUBROUTINE X\nCALL A(1)\nCALL B(2)\nCALL C(3)\nCALL D(4)\nEND\n",
    );

    assert!(analyze(temp.path(), false).diagnostics().next().is_none());

    let config =
        Config::parse("[rules.nesting-depth]\nparen_mode = \"legacy\"\n").expect("valid config");
    let result = analyze_with(temp.path(), false, config);
    let diagnostics: Vec<&Diagnostic> = result.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule_id, "A006");
    assert_eq!(diagnostics[0].line_number, 1);
}

#[test]
fn allow_directive_suppresses_diagnostic() {
    let content = r#"SUBROUTINE X
* infobasic-lint: allow(A001) reason="fixed record layout"
Y = R.REC<15>
END
"#;
    assert!(check(content, false).is_empty());

    let no_reason = "SUBROUTINE X\n* infobasic-lint: allow(A001)\nY = R.REC<15>\nEND\n";
    let diagnostics = check(no_reason, false);
    assert_eq!(codes(&diagnostics), vec!["A001"]);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
}
