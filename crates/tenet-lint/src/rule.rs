use tenet_config::LintConfig;
use tenet_core::{Diagnostic, Severity};
use tenet_document::Document;

/// A single lint check over one document.
///
/// Rules are stateless: everything they need comes from the parsed
/// [`Document`] and the `[lint]` section of the configuration. A rule
/// reports at its default severity; the engine applies any per-rule
/// override from `lint.severity` afterwards.
pub trait Rule: Send + Sync {
    /// Stable rule name, as used in `lint.disabled` and `lint.severity`.
    fn name(&self) -> &'static str;

    /// One-line description shown by `tenet rules`.
    fn description(&self) -> &'static str;

    /// Severity the rule reports at unless overridden.
    fn default_severity(&self) -> Severity;

    /// Run the rule over a document.
    fn check(&self, doc: &Document, config: &LintConfig) -> Vec<Diagnostic>;

    /// Shorthand for building a diagnostic carrying this rule's name
    /// and default severity.
    fn diagnostic(&self, doc: &Document, message: impl Into<String>) -> Diagnostic
    where
        Self: Sized,
    {
        Diagnostic::new(self.name(), self.default_severity(), doc.path.clone(), message)
    }
}
