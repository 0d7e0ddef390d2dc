//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::types::{Diagnostic, FailureKind, FileFailure, FileReport, LintResult};
use crate::utils::{apply_allowances, has_source_extension, is_excluded};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Errors that can occur while building or running the analyzer.
///
/// Problems with individual files are not errors: they are reported as
/// [`FileFailure`]s in the [`LintResult`].
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    strict: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file or directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Enables or disables strict mode, overriding the configuration.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob or the
    /// configured worker pool cannot be created.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let strict = self.strict.unwrap_or(config.strict);

        let excludes = self
            .exclude_patterns
            .iter()
            .chain(config.analyzer.exclude.iter())
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let pool = config
            .analyzer
            .parallelism
            .map(|n| rayon::ThreadPoolBuilder::new().num_threads(n).build())
            .transpose()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            excludes,
            config,
            strict,
            pool,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    excludes: Vec<glob::Pattern>,
    config: Config,
    strict: bool,
    pool: Option<rayon::ThreadPool>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the path being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether strict mode is enabled.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Analyzes the root and returns the results.
    ///
    /// A missing root or a non-InfoBasic single file is recorded as a
    /// failure in the result. Unreadable files are recorded the same way and
    /// do not stop their siblings from being checked.
    #[must_use]
    pub fn analyze(&self) -> LintResult {
        info!("Starting analysis at {}", self.root.display());

        let mut result = LintResult::new();
        let files = match self.discover_files() {
            Ok(files) => files,
            Err(failure) => {
                warn!("{failure}");
                result.failures.push(failure);
                return result;
            }
        };

        if files.is_empty() {
            warn!("No InfoBasic files found in {}", self.root.display());
            return result;
        }

        info!("Found {} files to analyze", files.len());

        let outcomes = self.run(|| {
            files
                .par_iter()
                .map(|path| self.analyze_file(path))
                .collect::<Vec<_>>()
        });

        for outcome in outcomes {
            match outcome {
                Ok(report) => {
                    result.files.push(report);
                    result.files_checked += 1;
                }
                Err(failure) => {
                    warn!("Failed to read {}", failure);
                    result.failures.push(failure);
                }
            }
        }

        let (errors, warnings, infos) = result.count_by_severity();
        info!(
            "Analysis complete: {} error(s), {} warning(s), {} info(s) in {} files",
            errors, warnings, infos, result.files_checked
        );

        result
    }

    /// Validates one file's content and returns its report.
    ///
    /// This is the per-file rule engine: re-entrant and free of cross-file
    /// state.
    #[must_use]
    pub fn check_source(&self, path: &Path, content: &str) -> FileReport {
        let ctx = FileContext::new(path, content, self.strict);
        let mut diagnostics = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            if rule.strict_only() && !self.strict {
                continue;
            }

            diagnostics.extend(self.apply_overrides(rule.check(&ctx)));
        }

        FileReport::new(path, apply_allowances(&ctx.lines, diagnostics))
    }

    /// Reads and validates a single file.
    fn analyze_file(&self, path: &Path) -> Result<FileReport, FileFailure> {
        debug!("Analyzing: {}", path.display());

        let content = read_source(path).map_err(|e| {
            FileFailure::new(path, FailureKind::Unreadable, format!("Cannot read file: {e}"))
        })?;

        Ok(self.check_source(path, &content))
    }

    /// Drops disabled rule ids and applies severity overrides.
    fn apply_overrides(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .filter(|d| self.config.is_code_enabled(&d.rule_id))
            .map(|mut d| {
                if let Some(severity) = self.config.rule_severity(&d.rule_id, &d.rule) {
                    d.severity = severity;
                }
                d
            })
            .collect()
    }

    /// Resolves the root into the sorted list of files to check.
    fn discover_files(&self) -> Result<Vec<PathBuf>, FileFailure> {
        let extensions = &self.config.analyzer.extensions;

        if !self.root.exists() {
            return Err(FileFailure::new(
                &self.root,
                FailureKind::NotFound,
                "Path not found",
            ));
        }

        if self.root.is_file() {
            if has_source_extension(&self.root, extensions) {
                return Ok(vec![self.root.clone()]);
            }
            return Err(FileFailure::new(
                &self.root,
                FailureKind::NotSourceFile,
                "Not an InfoBasic file",
            ));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| {
                entry.file_type().is_file() || (entry.path_is_symlink() && !entry.path().is_dir())
            })
            .map(walkdir::DirEntry::into_path)
            .filter(|path| has_source_extension(path, extensions))
            .filter(|path| {
                let excluded = is_excluded(path, &self.excludes);
                if excluded {
                    debug!("Excluding: {}", path.display());
                }
                !excluded
            })
            .collect();

        files.sort();
        Ok(files)
    }

    fn run<T: Send>(&self, op: impl FnOnce() -> T + Send) -> T {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

/// Reads a whole source file, decoding invalid UTF-8 lossily.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_source(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
