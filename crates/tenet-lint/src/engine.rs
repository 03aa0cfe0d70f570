use tenet_config::LintConfig;
use tenet_core::{Diagnostic, Severity};
use tenet_document::Document;
use tracing::{debug, warn};

use crate::report::LintReport;
use crate::rule::Rule;
use crate::rules;

/// Runs the configured rule set over documents.
pub struct LintEngine {
    rules: Vec<Box<dyn Rule>>,
    config: LintConfig,
}

impl LintEngine {
    /// Build an engine from the `[lint]` configuration: installs every
    /// built-in rule except those in `lint.disabled`.
    ///
    /// Unknown rule names in `disabled` or `severity` are logged and
    /// ignored rather than failing the run.
    pub fn new(config: LintConfig) -> Self {
        let mut rules = rules::all();

        for name in &config.disabled {
            if !rules.iter().any(|r| r.name() == name) {
                warn!(rule = %name, "unknown rule in lint.disabled, ignoring");
            }
        }
        for name in config.severity.keys() {
            if !rules.iter().any(|r| r.name() == name) {
                warn!(rule = %name, "unknown rule in lint.severity, ignoring");
            }
        }

        rules.retain(|r| !config.disabled.iter().any(|d| d == r.name()));
        debug!(rules = rules.len(), "lint engine ready");
        Self { rules, config }
    }

    /// The installed (enabled) rules.
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Check one document, applying severity overrides.
    pub fn check_document(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            let mut found = rule.check(doc, &self.config);
            if let Some(value) = self.config.severity.get(rule.name()) {
                if let Some(severity) = Severity::parse(value) {
                    for diagnostic in &mut found {
                        diagnostic.severity = severity;
                    }
                }
            }
            diagnostics.extend(found);
        }
        diagnostics
    }

    /// Check a batch of documents and collect a report.
    pub fn check_all<'a>(&self, docs: impl IntoIterator<Item = &'a Document>) -> LintReport {
        let mut diagnostics = Vec::new();
        let mut files_checked = 0;
        for doc in docs {
            files_checked += 1;
            let found = self.check_document(doc);
            debug!(
                path = %doc.path.display(),
                findings = found.len(),
                "checked document"
            );
            diagnostics.extend(found);
        }
        LintReport::new(files_checked, diagnostics)
    }
}
