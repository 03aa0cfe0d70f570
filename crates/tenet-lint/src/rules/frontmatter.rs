//! Frontmatter hygiene. Frontmatter itself is optional, but when a
//! document carries one it must identify itself properly.

use tenet_config::LintConfig;
use tenet_core::{Diagnostic, Severity};
use tenet_document::Document;

use crate::rule::Rule;

const VALID_SCOPES: [&str; 3] = ["repo", "user", "org"];

pub struct FrontmatterFields;

impl FrontmatterFields {
    fn is_kebab_case(name: &str) -> bool {
        !name.is_empty()
            && !name.starts_with('-')
            && !name.ends_with('-')
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl Rule for FrontmatterFields {
    fn name(&self) -> &'static str {
        "frontmatter-fields"
    }

    fn description(&self) -> &'static str {
        "frontmatter blocks carry a name and well-formed metadata"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, doc: &Document, _config: &LintConfig) -> Vec<Diagnostic> {
        let Some(fm) = &doc.frontmatter else {
            return Vec::new();
        };
        let mut diagnostics = Vec::new();

        match fm.name.as_deref() {
            None | Some("") => {
                diagnostics.push(
                    self.diagnostic(doc, "frontmatter is missing \"name\"")
                        .with_line(1)
                        .with_hint("the name identifies this document in catalogs and bundles"),
                );
            }
            Some(name) if !Self::is_kebab_case(name) => {
                diagnostics.push(
                    self.diagnostic(
                        doc,
                        format!("name \"{name}\" should be kebab-case"),
                    )
                    .with_line(1)
                    .with_hint("lowercase words joined by '-', e.g. error-handling"),
                );
            }
            Some(_) => {}
        }

        if fm.description.as_deref().unwrap_or("").is_empty() {
            diagnostics.push(
                self.diagnostic(doc, "frontmatter is missing \"description\"")
                    .with_line(1),
            );
        }

        if let Some(scope) = fm.scope.as_deref() {
            if !VALID_SCOPES.contains(&scope) {
                diagnostics.push(
                    self.diagnostic(
                        doc,
                        format!(
                            "unknown scope \"{scope}\" (expected {})",
                            VALID_SCOPES.join(", ")
                        ),
                    )
                    .with_line(1),
                );
            }
        }

        if let Some(version) = fm.version.as_deref() {
            if semver::Version::parse(version).is_err() {
                diagnostics.push(
                    self.diagnostic(
                        doc,
                        format!("version \"{version}\" is not a valid semantic version"),
                    )
                    .with_line(1)
                    .with_hint("use MAJOR.MINOR.PATCH, e.g. 1.0.0"),
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
    fn document_without_frontmatter_is_clean() {
        let d = doc("# T\n\nBody.\n");
        assert!(FrontmatterFields.check(&d, &LintConfig::default()).is_empty());
    }

    #[test]
    fn complete_frontmatter_is_clean() {
        let d = doc(
            "---\nname: rust-style\ndescription: Rust conventions\nscope: repo\nversion: 1.2.0\n---\n\n# T\n",
        );
        assert!(FrontmatterFields.check(&d, &LintConfig::default()).is_empty());
    }

    #[test]
    fn missing_name_and_description_are_flagged() {
        let d = doc("---\ntags: [style]\n---\n\n# T\n");
        let diags = FrontmatterFields.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 2);
        assert!(diags[0].message.contains("name"));
        assert!(diags[1].message.contains("description"));
    }

    #[test]
    fn non_kebab_name_is_flagged() {
        let d = doc("---\nname: Rust Style\ndescription: x\n---\n\n# T\n");
        let diags = FrontmatterFields.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("kebab-case"));
    }

    #[test]
    fn unknown_scope_is_flagged() {
        let d = doc("---\nname: x\ndescription: y\nscope: global\n---\n\n# T\n");
        let diags = FrontmatterFields.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("global"));
    }

    #[test]
    fn bad_version_is_flagged() {
        let d = doc("---\nname: x\ndescription: y\nversion: 1.0\n---\n\n# T\n");
        let diags = FrontmatterFields.check(&d, &LintConfig::default());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("semantic version"));
    }
}
