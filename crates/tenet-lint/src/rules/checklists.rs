//! Checklist formatting: one canonical marker, lowercase `x`, exactly
//! one space after the checkbox, no empty items.

use tenet_config::LintConfig;
use tenet_core::{Diagnostic, Severity};
use tenet_document::Document;

use crate::rule::Rule;

pub struct ChecklistFormat;

impl Rule for ChecklistFormat {
    fn name(&self) -> &'static str {
        "checklist-format"
    }

    fn description(&self) -> &'static str {
        "checklist items use the canonical `- [ ]` form"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, doc: &Document, config: &LintConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for item in &doc.checklist {
            if item.marker != config.checklist_marker {
                diagnostics.push(
                    self.diagnostic(
                        doc,
                        format!(
                            "checklist item uses '{}' but the configured marker is '{}'",
                            item.marker, config.checklist_marker
                        ),
                    )
                    .with_line(item.line),
                );
            }
            if item.check == 'X' {
                diagnostics.push(
                    self.diagnostic(doc, "checked items use a lowercase 'x'")
                        .with_line(item.line),
                );
            }
            if item.text.trim().is_empty() {
                diagnostics.push(
                    self.diagnostic(doc, "empty checklist item")
                        .with_line(item.line)
                        .with_hint("describe the step or delete the item"),
                );
                // Spacing complaints are noise on an item with no text.
                continue;
            }
            if item.gap == 0 {
                diagnostics.push(
                    self.diagnostic(doc, "missing space between checkbox and text")
                        .with_line(item.line),
                );
            } else if item.gap > 1 {
                diagnostics.push(
                    self.diagnostic(doc, "extra whitespace between checkbox and text")
                        .with_line(item.line),
                );
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tenet_document::parse;

    fn doc(content: &str) -> Document {
        parse(content, Path::new("AGENTS.md"))
    }

    #[test]
    fn canonical_items_are_clean() {
        let d = doc("# T\n\n- [ ] write tests\n- [x] run linters\n");
        assert!(ChecklistFormat.check(&d, &LintConfig::default()).is_empty());
    }

    #[test]
    fn wrong_marker_is_flagged() {
        let d = doc("# T\n\n* [ ] write tests\n");
        let diags = ChecklistFormat.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("'*'"));
    }

    #[test]
    fn marker_follows_configuration() {
        let d = doc("# T\n\n* [ ] write tests\n");
        let mut cfg = LintConfig::default();
        cfg.checklist_marker = '*';
        assert!(ChecklistFormat.check(&d, &cfg).is_empty());
    }

    #[test]
    fn uppercase_check_is_flagged() {
        let d = doc("# T\n\n- [X] done\n");
        let diags = ChecklistFormat.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("lowercase"));
    }

    #[test]
    fn spacing_problems_are_flagged() {
        let d = doc("# T\n\n- [ ]no gap\n- [ ]  wide gap\n");
        let diags = ChecklistFormat.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 2);
        assert!(diags[0].message.contains("missing space"));
        assert!(diags[1].message.contains("extra whitespace"));
    }

    #[test]
    fn empty_item_skips_spacing_noise() {
        let d = doc("# T\n\n- [ ]\n");
        let diags = ChecklistFormat.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("empty checklist item"));
    }
}
