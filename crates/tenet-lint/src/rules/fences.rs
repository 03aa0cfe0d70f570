//! Code fence checks: every fence is closed, and fences carry a
//! language tag.

use tenet_config::LintConfig;
use tenet_core::{Diagnostic, Severity};
use tenet_document::Document;

use crate::rule::Rule;

pub struct FenceClosed;

impl Rule for FenceClosed {
    fn name(&self) -> &'static str {
        "fence-closed"
    }

    fn description(&self) -> &'static str {
        "every code fence has a closing fence"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, doc: &Document, _config: &LintConfig) -> Vec<Diagnostic> {
        doc.code_blocks
            .iter()
            .filter(|block| block.end_line.is_none())
            .map(|block| {
                self.diagnostic(
                    doc,
                    format!("code fence opened at line {} is never closed", block.start_line),
                )
                .with_line(block.start_line)
                .with_hint("everything after an open fence renders as code")
            })
            .collect()
    }
}

pub struct FenceLanguage;

impl Rule for FenceLanguage {
    fn name(&self) -> &'static str {
        "fence-language"
    }

    fn description(&self) -> &'static str {
        "code fences declare a language tag"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, doc: &Document, _config: &LintConfig) -> Vec<Diagnostic> {
        doc.code_blocks
            .iter()
            .filter(|block| block.language.is_none())
            .map(|block| {
                self.diagnostic(doc, "code fence has no language tag")
                    .with_line(block.start_line)
                    .with_hint("tag the fence for syntax highlighting, e.g. ```bash")
            })
            .collect()
    }
}
