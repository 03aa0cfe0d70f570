//! Configuration schema for tenet.toml.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use tenet_core::Severity;

/// Root configuration for tenet.
///
/// Every section and field has a default, so an empty (or absent)
/// tenet.toml is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TenetConfig {
    pub discovery: DiscoveryConfig,
    pub lint: LintConfig,
    pub duplicates: DuplicatesConfig,
    pub bundle: BundleConfig,
    pub logging: LoggingConfig,
}

/// Where and how standards documents are discovered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Root directories to scan, in precedence order. Later roots
    /// shadow earlier ones when document names collide.
    pub roots: Vec<PathBuf>,
    /// File name patterns that count as standards documents.
    pub patterns: Vec<String>,
    /// Directory names skipped during the walk.
    pub ignore: Vec<String>,
    /// Maximum directory depth below each root. 0 means unlimited.
    pub max_depth: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from(".")],
            patterns: vec![
                "AGENTS.md".to_string(),
                "CLAUDE.md".to_string(),
                "CONVENTIONS.md".to_string(),
                "STANDARDS.md".to_string(),
                "*.agents.md".to_string(),
            ],
            ignore: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
                "vendor".to_string(),
                ".tenet".to_string(),
            ],
            max_depth: 8,
        }
    }
}

/// Knobs consumed by the lint rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LintConfig {
    /// Deepest heading level allowed (1-6).
    pub max_heading_depth: u8,
    /// Maximum line length. 0 disables the check.
    pub max_line_length: usize,
    /// Whether every document must open with a level-1 title.
    pub require_title: bool,
    /// Canonical bullet marker for checklist items.
    pub checklist_marker: char,
    /// Per-rule severity overrides, keyed by rule name.
    pub severity: HashMap<String, String>,
    /// Rule names that should not run at all.
    pub disabled: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            max_heading_depth: 4,
            max_line_length: 0,
            require_title: true,
            checklist_marker: '-',
            severity: HashMap::new(),
            disabled: Vec::new(),
        }
    }
}

/// Thresholds for the duplicate scanner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DuplicatesConfig {
    /// Jaccard similarity at or above which two documents are
    /// reported as near-duplicates. Range 0.0-1.0.
    pub similarity: f64,
    /// Words per shingle when fingerprinting document bodies.
    pub shingle_size: usize,
    /// Documents shorter than this many lines are exempt from
    /// near-duplicate comparison (exact matches still count).
    pub min_lines: usize,
}

impl Default for DuplicatesConfig {
    fn default() -> Self {
        Self {
            similarity: 0.85,
            shingle_size: 5,
            min_lines: 8,
        }
    }
}

/// Output shape for `tenet bundle`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BundleConfig {
    /// "markdown" or "tagged".
    pub format: String,
    /// Emit a table of contents before the first document.
    pub include_toc: bool,
    /// Text placed between documents in markdown format.
    pub separator: String,
    /// Explicit document order by name. Unlisted documents follow
    /// alphabetically.
    pub order: Vec<String>,
    /// Soft token budget for the composed bundle. 0 means unlimited.
    pub max_tokens: usize,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            format: "markdown".to_string(),
            include_toc: false,
            separator: "\n\n---\n\n".to_string(),
            order: Vec::new(),
            max_tokens: 0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    pub level: String,
    /// Log format: pretty, json.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// A non-fatal problem found while validating a configuration.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: Severity,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity.icon(), self.field, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n   ↳ {hint}")?;
        }
        Ok(())
    }
}

impl TenetConfig {
    /// Validate the configuration.
    ///
    /// Returns warnings for suspicious-but-usable values, or an error
    /// string for values the tool cannot run with. Unknown rule names
    /// in `lint.severity` and `lint.disabled` are checked by the lint
    /// engine, which owns the rule set.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        if !(0.0..=1.0).contains(&self.duplicates.similarity) {
            return Err(format!(
                "duplicates.similarity must be between 0.0 and 1.0, got {}",
                self.duplicates.similarity
            ));
        }
        if self.duplicates.shingle_size == 0 {
            return Err("duplicates.shingle_size must be at least 1".to_string());
        }
        if self.lint.max_heading_depth == 0 || self.lint.max_heading_depth > 6 {
            return Err(format!(
                "lint.max_heading_depth must be between 1 and 6, got {}",
                self.lint.max_heading_depth
            ));
        }
        if !matches!(self.bundle.format.as_str(), "markdown" | "tagged") {
            return Err(format!(
                "bundle.format must be \"markdown\" or \"tagged\", got \"{}\"",
                self.bundle.format
            ));
        }

        if self.discovery.roots.is_empty() {
            warnings.push(ConfigWarning {
                field: "discovery.roots".to_string(),
                message: "no roots configured, discovery will find nothing".to_string(),
                severity: Severity::Warning,
                hint: Some("add at least one directory, e.g. roots = [\".\"]".to_string()),
            });
        }
        if self.discovery.patterns.is_empty() {
            warnings.push(ConfigWarning {
                field: "discovery.patterns".to_string(),
                message: "no file patterns configured, discovery will find nothing".to_string(),
                severity: Severity::Warning,
                hint: Some("add at least one pattern, e.g. patterns = [\"AGENTS.md\"]".to_string()),
            });
        }
        if !matches!(self.lint.checklist_marker, '-' | '*' | '+') {
            warnings.push(ConfigWarning {
                field: "lint.checklist_marker".to_string(),
                message: format!(
                    "'{}' is not a markdown list marker, checklist-format will flag every item",
                    self.lint.checklist_marker
                ),
                severity: Severity::Warning,
                hint: Some("use '-', '*' or '+'".to_string()),
            });
        }
        for (rule, value) in &self.lint.severity {
            if Severity::parse(value).is_none() {
                warnings.push(ConfigWarning {
                    field: format!("lint.severity.{rule}"),
                    message: format!("unknown severity \"{value}\", override ignored"),
                    severity: Severity::Warning,
                    hint: Some("use \"info\", \"warning\" or \"error\"".to_string()),
                });
            }
        }
        if self.duplicates.similarity < 0.5 {
            warnings.push(ConfigWarning {
                field: "duplicates.similarity".to_string(),
                message: format!(
                    "threshold {} is very low and will pair unrelated documents",
                    self.duplicates.similarity
                ),
                severity: Severity::Info,
                hint: Some("values between 0.8 and 0.95 work well".to_string()),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".to_string(),
                message: format!("unknown log level \"{}\", using \"info\"", self.logging.level),
                severity: Severity::Warning,
                hint: Some(format!("valid levels: {}", valid_levels.join(", "))),
            });
        }
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".to_string(),
                message: format!(
                    "unknown log format \"{}\", using \"pretty\"",
                    self.logging.format
                ),
                severity: Severity::Warning,
                hint: Some(format!("valid formats: {}", valid_formats.join(", "))),
            });
        }

        Ok(warnings)
    }

    /// Effective log level, falling back to "info" for unknown values.
    pub fn log_level(&self) -> &str {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if valid.contains(&self.logging.level.as_str()) {
            &self.logging.level
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TenetConfig::default();
        let warnings = config.validate().unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: TenetConfig = toml::from_str("").unwrap();
        assert_eq!(config, TenetConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: TenetConfig = toml::from_str(
            r#"
            [duplicates]
            similarity = 0.9

            [lint]
            max_line_length = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.duplicates.similarity, 0.9);
        assert_eq!(config.duplicates.shingle_size, 5);
        assert_eq!(config.lint.max_line_length, 100);
        assert!(config.lint.require_title);
        assert_eq!(config.bundle.format, "markdown");
    }

    #[test]
    fn out_of_range_similarity_is_an_error() {
        let mut config = TenetConfig::default();
        config.duplicates.similarity = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_heading_depth_is_an_error() {
        let mut config = TenetConfig::default();
        config.lint.max_heading_depth = 7;
        assert!(config.validate().is_err());
        config.lint.max_heading_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_bundle_format_is_an_error() {
        let mut config = TenetConfig::default();
        config.bundle.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn odd_checklist_marker_warns() {
        let mut config = TenetConfig::default();
        config.lint.checklist_marker = '>';
        let warnings = config.validate().unwrap();
        assert!(warnings.iter().any(|w| w.field == "lint.checklist_marker"));
    }

    #[test]
    fn unknown_severity_override_warns() {
        let mut config = TenetConfig::default();
        config
            .lint
            .severity
            .insert("line-length".to_string(), "fatal".to_string());
        let warnings = config.validate().unwrap();
        assert!(warnings.iter().any(|w| w.field == "lint.severity.line-length"));
    }

    #[test]
    fn unknown_log_level_warns_and_falls_back() {
        let mut config = TenetConfig::default();
        config.logging.level = "loud".to_string();
        let warnings = config.validate().unwrap();
        assert!(warnings.iter().any(|w| w.field == "logging.level"));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut config = TenetConfig::default();
        config.lint.max_line_length = 120;
        config.bundle.include_toc = true;
        let text = toml::to_string_pretty(&config).unwrap();
        let back: TenetConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
