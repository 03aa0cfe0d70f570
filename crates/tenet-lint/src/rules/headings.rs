//! Rules about heading structure: a single title, bounded depth, no
//! skipped levels, no duplicate anchors.

use std::collections::HashMap;
use tenet_config::LintConfig;
use tenet_core::{Diagnostic, Severity};
use tenet_document::{Document, slugify};

use crate::rule::Rule;

/// Every document opens with exactly one level-1 heading.
pub struct SingleTitle;

impl Rule for SingleTitle {
    fn name(&self) -> &'static str {
        "single-title"
    }

    fn description(&self) -> &'static str {
        "documents have exactly one level-1 title heading"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, doc: &Document, config: &LintConfig) -> Vec<Diagnostic> {
        if doc.is_empty() {
            return Vec::new();
        }
        let titles: Vec<_> = doc.headings.iter().filter(|h| h.level == 1).collect();
        let mut diagnostics = Vec::new();

        if titles.is_empty() {
            if config.require_title {
                diagnostics.push(
                    self.diagnostic(doc, "document has no level-1 title")
                        .with_hint("open the document with a single `# Title` heading"),
                );
            }
            return diagnostics;
        }

        let first = titles[0].line;
        for extra in &titles[1..] {
            diagnostics.push(
                self.diagnostic(
                    doc,
                    format!(
                        "multiple level-1 headings (title is \"{}\" at line {first})",
                        titles[0].text
                    ),
                )
                .with_line(extra.line)
                .with_hint("demote this heading to `##` or split the document"),
            );
        }
        diagnostics
    }
}

/// Headings never go deeper than the configured maximum level.
pub struct HeadingDepth;

impl Rule for HeadingDepth {
    fn name(&self) -> &'static str {
        "heading-depth"
    }

    fn description(&self) -> &'static str {
        "headings stay within the configured maximum depth"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, doc: &Document, config: &LintConfig) -> Vec<Diagnostic> {
        doc.headings
            .iter()
            .filter(|h| h.level > config.max_heading_depth)
            .map(|h| {
                self.diagnostic(
                    doc,
                    format!(
                        "heading level {} exceeds the maximum depth of {}",
                        h.level, config.max_heading_depth
                    ),
                )
                .with_line(h.line)
                .with_hint("flatten the section or raise lint.max_heading_depth")
            })
            .collect()
    }
}

/// Heading levels increase one step at a time (## may follow #, but
/// ### may not).
pub struct HeadingSkip;

impl Rule for HeadingSkip {
    fn name(&self) -> &'static str {
        "heading-skip"
    }

    fn description(&self) -> &'static str {
        "heading levels increase without skipping"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, doc: &Document, _config: &LintConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut previous: Option<u8> = None;
        for heading in &doc.headings {
            if let Some(prev) = previous {
                if heading.level > prev + 1 {
                    diagnostics.push(
                        self.diagnostic(
                            doc,
                            format!("heading level jumps from {prev} to {}", heading.level),
                        )
                        .with_line(heading.line)
                        .with_hint(format!("use level {} here or add an intermediate heading", prev + 1)),
                    );
                }
            }
            previous = Some(heading.level);
        }
        diagnostics
    }
}

/// No two headings render to the same anchor. Duplicate anchors make
/// `#fragment` links ambiguous.
pub struct DuplicateHeading;

impl Rule for DuplicateHeading {
    fn name(&self) -> &'static str {
        "duplicate-heading"
    }

    fn description(&self) -> &'static str {
        "heading texts are unique within a document"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, doc: &Document, _config: &LintConfig) -> Vec<Diagnostic> {
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        let mut diagnostics = Vec::new();
        for heading in &doc.headings {
            let anchor = slugify(&heading.text);
            match first_seen.get(&anchor) {
                Some(&line) => {
                    diagnostics.push(
                        self.diagnostic(
                            doc,
                            format!(
                                "duplicate heading \"{}\" (first used at line {line})",
                                heading.text
                            ),
                        )
                        .with_line(heading.line)
                        .with_hint("rename one of the headings so anchors stay unique"),
                    );
                }
                None => {
                    first_seen.insert(anchor, heading.line);
                }
            }
        }
        diagnostics
    }
}
