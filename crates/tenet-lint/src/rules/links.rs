//! Link integrity: relative targets must exist on disk, fragment-only
//! links must point at a real section anchor.

use tenet_config::LintConfig;
use tenet_core::{Diagnostic, Severity};
use tenet_document::Document;
use url::Url;

use crate::rule::Rule;

pub struct RelativeLinks;

impl Rule for RelativeLinks {
    fn name(&self) -> &'static str {
        "relative-links"
    }

    fn description(&self) -> &'static str {
        "relative link targets exist and section anchors resolve"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, doc: &Document, _config: &LintConfig) -> Vec<Diagnostic> {
        let anchors = doc.anchors();
        let mut diagnostics = Vec::new();

        for link in &doc.links {
            let (path_part, fragment) = match link.target.split_once('#') {
                Some((p, f)) => (p, Some(f)),
                None => (link.target.as_str(), None),
            };

            if path_part.is_empty() {
                let Some(fragment) = fragment else { continue };
                if !anchors.iter().any(|a| a == fragment) {
                    diagnostics.push(
                        self.diagnostic(
                            doc,
                            format!("link points to a missing section anchor \"#{fragment}\""),
                        )
                        .with_line(link.line)
                        .with_hint("anchors are lowercase heading slugs, e.g. #error-handling"),
                    );
                }
                continue;
            }

            // Absolute URLs (http, https, mailto, ...) are out of scope.
            if Url::parse(&link.target).is_ok() {
                continue;
            }

            // Root-relative targets need a repository root to resolve,
            // which a single document does not carry.
            if path_part.starts_with('/') {
                continue;
            }

            let base = doc.path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let resolved = base.join(path_part);
            if !resolved.exists() {
                diagnostics.push(
                    self.diagnostic(doc, format!("relative link target not found: {path_part}"))
                        .with_line(link.line)
                        .with_hint("link targets resolve relative to the document's directory"),
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

    #[test]
    fn absolute_urls_are_ignored() {
        let d = parse(
            "# T\n\nSee [docs](https://example.com/docs) and [mail](mailto:team@example.com).\n",
            Path::new("AGENTS.md"),
        );
        assert!(RelativeLinks.check(&d, &LintConfig::default()).is_empty());
    }

    #[test]
    fn missing_relative_target_is_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let doc_path = dir.path().join("AGENTS.md");
        std::fs::write(&doc_path, "# T\n\nSee [guide](docs/guide.md).\n").unwrap();
        let d = tenet_document::Document::from_file(&doc_path).unwrap();
        let diags = RelativeLinks.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("docs/guide.md"));
        assert_eq!(diags[0].line, Some(3));
    }

    #[test]
    fn existing_relative_target_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/guide.md"), "# Guide\n").unwrap();
        let doc_path = dir.path().join("AGENTS.md");
        std::fs::write(&doc_path, "# T\n\nSee [guide](docs/guide.md).\n").unwrap();
        let d = tenet_document::Document::from_file(&doc_path).unwrap();
        assert!(RelativeLinks.check(&d, &LintConfig::default()).is_empty());
    }

    #[test]
    fn fragment_resolving_to_heading_is_clean() {
        let d = parse(
            "# T\n\n## Error Handling\n\nSee [above](#error-handling).\n",
            Path::new("AGENTS.md"),
        );
        assert!(RelativeLinks.check(&d, &LintConfig::default()).is_empty());
    }

    #[test]
    fn missing_fragment_is_flagged() {
        let d = parse(
            "# T\n\nSee [nowhere](#no-such-section).\n",
            Path::new("AGENTS.md"),
        );
        let diags = RelativeLinks.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("#no-such-section"));
    }

    #[test]
    fn fragment_on_relative_target_checks_only_the_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("other.md"), "# Other\n").unwrap();
        let doc_path = dir.path().join("AGENTS.md");
        std::fs::write(&doc_path, "# T\n\nSee [other](other.md#anything).\n").unwrap();
        let d = tenet_document::Document::from_file(&doc_path).unwrap();
        assert!(RelativeLinks.check(&d, &LintConfig::default()).is_empty());
    }
}
