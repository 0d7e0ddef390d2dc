//! Rule presets for common configurations.

use crate::{
    error_handling, hardcoded_position, includes, naming, nesting_depth, raw_file_io, structure,
    unreleased_lock, ErrorHandling, HardcodedPosition, Includes, Naming, NestingDepth, ParenMode,
    RawFileIo, Structure, UnreleasedLock,
};
use infobasic_lint_core::{Config, RuleBox, RuleConfig};

/// Preset configurations for infobasic-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every rule, strict checks only when requested.
    Recommended,
    /// Every rule with strict mode forced on.
    Strict,
    /// Only the rules that can report errors, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Parses a preset name as written in the config file.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended | Self::Strict => all_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Returns true if this preset turns strict mode on.
    #[must_use]
    pub fn enables_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Returns the recommended set of rules.
///
/// Same as [`all_rules`]; strict-only checks stay silent until strict mode
/// is enabled.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the minimal set of rules.
///
/// Includes:
/// - `structure` (S001, S002, S003)
/// - `hardcoded-position` (A001)
/// - `raw-file-io` (A004)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(Structure::new()),
        Box::new(HardcodedPosition::new()),
        Box::new(RawFileIo::new()),
    ]
}

/// Returns all available rules with default options, in reporting order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    rules_from_config(&Config::default())
}

/// Returns the rules selected by the config preset, with rule options applied.
///
/// An unknown preset name falls back to the recommended set.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    let preset = config.preset.as_deref().map_or(Preset::Recommended, |name| {
        Preset::from_name(name).unwrap_or_else(|| {
            tracing::warn!(preset = name, "Unknown preset, using recommended");
            Preset::Recommended
        })
    });

    let names: &[&str] = match preset {
        Preset::Recommended | Preset::Strict => &[
            structure::NAME,
            naming::NAME,
            includes::NAME,
            error_handling::NAME,
            hardcoded_position::NAME,
            unreleased_lock::NAME,
            raw_file_io::NAME,
            nesting_depth::NAME,
        ],
        Preset::Minimal => &[structure::NAME, hardcoded_position::NAME, raw_file_io::NAME],
    };

    names
        .iter()
        .filter_map(|name| configured_rule(name, config))
        .collect()
}

/// Builds a single rule by name or by one of its codes.
///
/// Rule options are taken from `config`. Returns `None` for an unknown name.
#[must_use]
pub fn rule_by_name(name_or_code: &str, config: &Config) -> Option<RuleBox> {
    let key = name_or_code.trim();
    let name = match key.to_ascii_uppercase().as_str() {
        "S001" | "S002" | "S003" => structure::NAME,
        naming::CODE => naming::NAME,
        "I001" | "I002" | "I003" => includes::NAME,
        error_handling::CODE => error_handling::NAME,
        hardcoded_position::CODE => hardcoded_position::NAME,
        unreleased_lock::CODE => unreleased_lock::NAME,
        raw_file_io::CODE => raw_file_io::NAME,
        nesting_depth::CODE => nesting_depth::NAME,
        _ => key,
    };
    configured_rule(&name.to_ascii_lowercase(), config)
}

fn options<'a>(config: &'a Config, name: &str, code: &str) -> Option<&'a RuleConfig> {
    config.rule(name).or_else(|| config.rule(code))
}

fn non_negative(value: i64, default: usize) -> usize {
    usize::try_from(value).unwrap_or(default)
}

fn configured_rule(name: &str, config: &Config) -> Option<RuleBox> {
    let rule: RuleBox = match name {
        structure::NAME => Box::new(Structure::new()),
        naming::NAME => {
            let prefixes = options(config, naming::NAME, naming::CODE)
                .map(|c| c.get_str_array("prefixes"))
                .unwrap_or_default();
            Box::new(Naming::new().with_prefixes(prefixes))
        }
        includes::NAME => Box::new(Includes::new()),
        error_handling::NAME => {
            let mut rule = ErrorHandling::new();
            if let Some(c) = options(config, error_handling::NAME, error_handling::CODE) {
                let default = i64::try_from(error_handling::DEFAULT_LOOKAHEAD).unwrap_or(5);
                rule = rule.lookahead_lines(non_negative(
                    c.get_int("lookahead_lines", default),
                    error_handling::DEFAULT_LOOKAHEAD,
                ));
            }
            Box::new(rule)
        }
        hardcoded_position::NAME => {
            let mut rule = HardcodedPosition::new();
            if let Some(c) = options(config, hardcoded_position::NAME, hardcoded_position::CODE) {
                let default = i64::try_from(hardcoded_position::DEFAULT_MAX_INDEX).unwrap_or(10);
                let value = c.get_int("max_index", default);
                rule = rule.max_index(
                    u64::try_from(value).unwrap_or(hardcoded_position::DEFAULT_MAX_INDEX),
                );
            }
            Box::new(rule)
        }
        unreleased_lock::NAME => Box::new(UnreleasedLock::new()),
        raw_file_io::NAME => Box::new(RawFileIo::new()),
        nesting_depth::NAME => {
            let mut rule = NestingDepth::new();
            if let Some(c) = options(config, nesting_depth::NAME, nesting_depth::CODE) {
                let default = i64::try_from(nesting_depth::DEFAULT_MAX_DEPTH).unwrap_or(3);
                rule = rule.max_depth(non_negative(
                    c.get_int("max_depth", default),
                    nesting_depth::DEFAULT_MAX_DEPTH,
                ));
                let mode = c.get_str("paren_mode", "balanced");
                match ParenMode::from_name(mode) {
                    Some(mode) => rule = rule.paren_mode(mode),
                    None => tracing::warn!(paren_mode = mode, "Unknown paren_mode, using balanced"),
                }
            }
            Box::new(rule)
        }
        _ => return None,
    };
    Some(rule)
}
