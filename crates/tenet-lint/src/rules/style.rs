//! Whole-line style checks: line length and trailing whitespace.
//! Both skip fenced code, where formatting belongs to the snippet.

use tenet_config::LintConfig;
use tenet_core::{Diagnostic, Severity};
use tenet_document::Document;

use crate::rule::Rule;

/// True when the 1-based line sits inside a fenced code block,
/// fence delimiters included.
fn in_fence(doc: &Document, line: usize) -> bool {
    doc.code_blocks.iter().any(|block| {
        let end = block.end_line.unwrap_or(doc.line_count);
        line >= block.start_line && line <= end
    })
}

pub struct LineLength;

impl Rule for LineLength {
    fn name(&self) -> &'static str {
        "line-length"
    }

    fn description(&self) -> &'static str {
        "prose lines stay within the configured length"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, doc: &Document, config: &LintConfig) -> Vec<Diagnostic> {
        let max = config.max_line_length;
        if max == 0 {
            return Vec::new();
        }
        let mut diagnostics = Vec::new();
        for (idx, line) in doc.raw.lines().enumerate() {
            let number = idx + 1;
            if in_fence(doc, number) {
                continue;
            }
            let length = line.chars().count();
            if length <= max {
                continue;
            }
            // A line with no break opportunity past the limit (a bare
            // URL, a long table cell) cannot be wrapped.
            let beyond: String = line.chars().skip(max).collect();
            if !beyond.contains(' ') {
                continue;
            }
            diagnostics.push(
                self.diagnostic(doc, format!("line is {length} characters (limit {max})"))
                    .with_line(number),
            );
        }
        diagnostics
    }
}

pub struct TrailingSpace;

impl Rule for TrailingSpace {
    fn name(&self) -> &'static str {
        "trailing-space"
    }

    fn description(&self) -> &'static str {
        "lines do not end in stray whitespace"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, doc: &Document, _config: &LintConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (idx, line) in doc.raw.lines().enumerate() {
            let number = idx + 1;
            if in_fence(doc, number) {
                continue;
            }
            let trailing = &line[line.trim_end().len()..];
            if trailing.is_empty() {
                continue;
            }
            if trailing.contains('\t') {
                diagnostics.push(
                    self.diagnostic(doc, "line ends with a tab character")
                        .with_line(number),
                );
            } else if trailing.len() == 1 {
                // Two or more spaces are a markdown hard line break;
                // a single one is just stray whitespace.
                diagnostics.push(
                    self.diagnostic(doc, "trailing whitespace").with_line(number),
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
    fn line_length_off_by_default() {
        let long = format!("# T\n\n{}\n", "word ".repeat(60));
        let d = doc(&long);
        assert!(LineLength.check(&d, &LintConfig::default()).is_empty());
    }

    #[test]
    fn long_prose_line_is_flagged() {
        let long = format!("# T\n\n{}\n", "word ".repeat(30).trim_end());
        let d = doc(&long);
        let mut cfg = LintConfig::default();
        cfg.max_line_length = 80;
        let diags = LineLength.check(&d, &cfg);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, Some(3));
    }

    #[test]
    fn unbreakable_overflow_is_exempt() {
        let url = format!("# T\n\nsee https://example.com/{}\n", "a".repeat(100));
        let d = doc(&url);
        let mut cfg = LintConfig::default();
        cfg.max_line_length = 80;
        assert!(LineLength.check(&d, &cfg).is_empty());
    }

    #[test]
    fn fenced_code_is_exempt_from_length() {
        let content = format!("# T\n\n```text\n{}\n```\n", "x ".repeat(100).trim_end());
        let d = doc(&content);
        let mut cfg = LintConfig::default();
        cfg.max_line_length = 80;
        assert!(LineLength.check(&d, &cfg).is_empty());
    }

    #[test]
    fn single_trailing_space_is_flagged() {
        let d = doc("# T\n\nSome text \nMore text\n");
        let diags = TrailingSpace.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, Some(3));
    }

    #[test]
    fn hard_break_is_not_flagged() {
        let d = doc("# T\n\nLine one  \nLine two\n");
        assert!(TrailingSpace.check(&d, &LintConfig::default()).is_empty());
    }

    #[test]
    fn trailing_tab_is_flagged() {
        let d = doc("# T\n\nSome text\t\n");
        let diags = TrailingSpace.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("tab"));
    }

    #[test]
    fn code_fences_keep_their_whitespace() {
        let d = doc("# T\n\n```text\ncode \n```\n");
        assert!(TrailingSpace.check(&d, &LintConfig::default()).is_empty());
    }
}
