//! Check command implementation.

use anyhow::{Context, Result};
use infobasic_lint_core::{Analyzer, Config, RuleBox};
use infobasic_lint_rules::{rule_by_name, rules_from_config, Preset};
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments of the check command.
#[derive(Debug)]
pub struct CheckOptions {
    /// File or directory to check.
    pub path: PathBuf,
    /// Strict mode requested on the command line.
    pub strict: bool,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run instead of the preset.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Where the configuration comes from.
    pub source: ConfigSource,
}

/// Runs the check command.
pub fn run(options: &CheckOptions) -> Result<()> {
    let config = load_config(&options.source)?;

    let strict = options.strict || config.strict || preset_enables_strict(&config);

    let rules_to_add = match &options.rules {
        Some(filter) => filter_rules(filter, &config),
        None => rules_from_config(&config),
    };

    // Build analyzer
    let mut builder = Analyzer::builder()
        .root(&options.path)
        .strict(strict)
        .excludes(options.exclude.iter().cloned());

    for rule in rules_to_add {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Checking {} with {} rules (strict: {})",
        options.path.display(),
        analyzer.rule_count(),
        analyzer.is_strict()
    );

    let result = analyzer.analyze();

    super::output::print(&result, options.format)?;

    // Exit with error code if there are errors
    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

fn preset_enables_strict(config: &Config) -> bool {
    config
        .preset
        .as_deref()
        .and_then(Preset::from_name)
        .is_some_and(Preset::enables_strict)
}

fn filter_rules(filter: &str, config: &Config) -> Vec<RuleBox> {
    let mut rules: Vec<RuleBox> = Vec::new();

    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match rule_by_name(name, config) {
            Some(rule) if rules.iter().any(|r| r.name() == rule.name()) => {}
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }

    rules
}
