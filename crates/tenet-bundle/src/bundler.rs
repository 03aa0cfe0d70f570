use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};

use tenet_catalog::{Catalog, fingerprint};
use tenet_config::BundleConfig;
use tenet_core::{Result, TenetError};
use tenet_document::Document;

/// Rough token estimate: four characters per token.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// One document's contribution to a bundle.
#[derive(Debug, Clone, Serialize)]
pub struct BundledDoc {
    pub name: String,
    pub path: PathBuf,
    pub tokens: usize,
}

/// A composed bundle plus its accounting.
#[derive(Debug, Clone, Serialize)]
pub struct Bundle {
    pub content: String,
    pub documents: Vec<BundledDoc>,
    /// Names dropped because their content duplicated an earlier
    /// document (full-catalog bundles only).
    pub skipped_duplicates: Vec<String>,
    pub estimated_tokens: usize,
    pub over_budget: bool,
}

impl Bundle {
    pub fn summary(&self) -> String {
        format!(
            "{} documents, ~{} tokens",
            self.documents.len(),
            self.estimated_tokens
        )
    }
}

/// Composes catalog documents into a single artifact.
pub struct Bundler {
    config: BundleConfig,
}

impl Bundler {
    pub fn new(config: BundleConfig) -> Self {
        Self { config }
    }

    /// Compose a bundle from the catalog.
    ///
    /// An empty `selection` takes every document, ordered by
    /// `bundle.order` then alphabetically, with exact duplicates
    /// collapsed to their first occurrence. A non-empty selection is
    /// taken verbatim, in the order given; unknown names are an error.
    pub fn compose(&self, catalog: &Catalog, selection: &[String]) -> Result<Bundle> {
        let (picks, skipped_duplicates) = if selection.is_empty() {
            self.full_catalog(catalog)
        } else {
            let mut picks = Vec::new();
            for name in selection {
                match catalog.get(name) {
                    Some(doc) => picks.push((name.clone(), doc)),
                    None => return Err(TenetError::DocumentNotFound(name.clone())),
                }
            }
            (picks, Vec::new())
        };

        if picks.is_empty() {
            return Err(TenetError::Bundle("no documents to bundle".to_string()));
        }

        let content = match self.config.format.as_str() {
            "tagged" => self.render_tagged(&picks),
            _ => self.render_markdown(&picks),
        };

        let documents = picks
            .iter()
            .map(|(name, doc)| BundledDoc {
                name: name.clone(),
                path: doc.path.clone(),
                tokens: estimate_tokens(doc.body()),
            })
            .collect();
        let estimated_tokens = estimate_tokens(&content);
        let over_budget = self.config.max_tokens > 0 && estimated_tokens > self.config.max_tokens;
        if over_budget {
            warn!(
                estimated_tokens,
                budget = self.config.max_tokens,
                "bundle exceeds the configured token budget"
            );
        }

        Ok(Bundle {
            content,
            documents,
            skipped_duplicates,
            estimated_tokens,
            over_budget,
        })
    }

    /// Every document: `bundle.order` names first, the rest
    /// alphabetically, exact duplicates collapsed.
    fn full_catalog<'a>(&self, catalog: &'a Catalog) -> (Vec<(String, &'a Document)>, Vec<String>) {
        let mut names: Vec<String> = Vec::new();
        for name in &self.config.order {
            if catalog.get(name).is_some() {
                names.push(name.clone());
            } else {
                warn!(document = %name, "bundle.order names an unknown document, skipping");
            }
        }
        for (name, _) in catalog.list() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }

        let mut seen = HashSet::new();
        let mut picks = Vec::new();
        let mut skipped = Vec::new();
        for name in names {
            let Some(doc) = catalog.get(&name) else { continue };
            if seen.insert(fingerprint(doc)) {
                picks.push((name, doc));
            } else {
                debug!(document = %name, "exact duplicate collapsed out of bundle");
                skipped.push(name);
            }
        }
        (picks, skipped)
    }

    fn render_markdown(&self, picks: &[(String, &Document)]) -> String {
        let mut out = String::new();
        if self.config.include_toc {
            out.push_str("## Contents\n\n");
            for (name, doc) in picks {
                let description = doc
                    .frontmatter
                    .as_ref()
                    .and_then(|fm| fm.description.as_deref());
                match description {
                    Some(d) => out.push_str(&format!("- {name}: {d}\n")),
                    None => out.push_str(&format!("- {name}\n")),
                }
            }
            out.push_str(&self.config.separator);
        }
        for (idx, (name, doc)) in picks.iter().enumerate() {
            if idx > 0 {
                out.push_str(&self.config.separator);
            }
            out.push_str(&format!("<!-- tenet: {name} ({}) -->\n\n", doc.path.display()));
            out.push_str(doc.body().trim_matches('\n'));
        }
        out.push('\n');
        out
    }

    /// System-prompt shape. The tags delimit documents, so the
    /// separator and TOC settings do not apply here.
    fn render_tagged(&self, picks: &[(String, &Document)]) -> String {
        let mut block = String::from("<standards>\n");
        for (name, doc) in picks {
            block.push_str(&format!(
                "<standard name=\"{name}\" path=\"{}\">\n",
                doc.path.display()
            ));
            block.push_str(doc.body().trim_matches('\n'));
            block.push_str("\n</standard>\n");
        }
        block.push_str("</standards>\n");
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tenet_document::parse;

    fn catalog_with(docs: &[(&str, &str, &str)]) -> Catalog {
        let mut catalog = Catalog::new_empty();
        for (name, path, content) in docs {
            catalog.register(*name, parse(content, Path::new(path)));
        }
        catalog
    }

    #[test]
    fn full_bundle_is_alphabetical() {
        let catalog = catalog_with(&[
            ("zeta", "z/AGENTS.md", "# Zeta\n\nLast rules.\n"),
            ("alpha", "a/AGENTS.md", "# Alpha\n\nFirst rules.\n"),
        ]);
        let bundle = Bundler::new(BundleConfig::default())
            .compose(&catalog, &[])
            .unwrap();
        let alpha = bundle.content.find("# Alpha").unwrap();
        let zeta = bundle.content.find("# Zeta").unwrap();
        assert!(alpha < zeta);
        assert_eq!(bundle.documents.len(), 2);
    }

    #[test]
    fn configured_order_comes_first() {
        let catalog = catalog_with(&[
            ("alpha", "a/AGENTS.md", "# Alpha\n"),
            ("omega", "o/AGENTS.md", "# Omega\n"),
        ]);
        let mut config = BundleConfig::default();
        config.order = vec!["omega".to_string()];
        let bundle = Bundler::new(config).compose(&catalog, &[]).unwrap();
        assert!(bundle.content.find("# Omega").unwrap() < bundle.content.find("# Alpha").unwrap());
    }

    #[test]
    fn explicit_selection_keeps_given_order() {
        let catalog = catalog_with(&[
            ("alpha", "a/AGENTS.md", "# Alpha\n"),
            ("omega", "o/AGENTS.md", "# Omega\n"),
        ]);
        let bundle = Bundler::new(BundleConfig::default())
            .compose(&catalog, &["omega".to_string(), "alpha".to_string()])
            .unwrap();
        assert!(bundle.content.find("# Omega").unwrap() < bundle.content.find("# Alpha").unwrap());
    }

    #[test]
    fn unknown_selection_is_an_error() {
        let catalog = catalog_with(&[("alpha", "a/AGENTS.md", "# Alpha\n")]);
        let err = Bundler::new(BundleConfig::default())
            .compose(&catalog, &["missing".to_string()])
            .unwrap_err();
        assert!(matches!(err, TenetError::DocumentNotFound(_)));
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let catalog = Catalog::new_empty();
        let err = Bundler::new(BundleConfig::default())
            .compose(&catalog, &[])
            .unwrap_err();
        assert!(matches!(err, TenetError::Bundle(_)));
    }

    #[test]
    fn source_comments_name_each_document() {
        let catalog = catalog_with(&[("alpha", "a/AGENTS.md", "# Alpha\n")]);
        let bundle = Bundler::new(BundleConfig::default())
            .compose(&catalog, &[])
            .unwrap();
        assert!(bundle.content.contains("<!-- tenet: alpha (a/AGENTS.md) -->"));
    }

    #[test]
    fn exact_duplicates_collapse_in_full_bundles() {
        let catalog = catalog_with(&[
            ("copy-a", "a/AGENTS.md", "# Same\n\nShared body.\n"),
            ("copy-b", "b/AGENTS.md", "# Same\n\nShared body.\n"),
        ]);
        let bundle = Bundler::new(BundleConfig::default())
            .compose(&catalog, &[])
            .unwrap();
        assert_eq!(bundle.documents.len(), 1);
        assert_eq!(bundle.skipped_duplicates, vec!["copy-b".to_string()]);
    }

    #[test]
    fn explicit_selection_keeps_duplicates() {
        let catalog = catalog_with(&[
            ("copy-a", "a/AGENTS.md", "# Same\n"),
            ("copy-b", "b/AGENTS.md", "# Same\n"),
        ]);
        let bundle = Bundler::new(BundleConfig::default())
            .compose(&catalog, &["copy-a".to_string(), "copy-b".to_string()])
            .unwrap();
        assert_eq!(bundle.documents.len(), 2);
    }

    #[test]
    fn toc_lists_names_and_descriptions() {
        let catalog = catalog_with(&[(
            "rust-style",
            "AGENTS.md",
            "---\nname: rust-style\ndescription: Rust conventions\n---\n\n# Rust Style\n",
        )]);
        let mut config = BundleConfig::default();
        config.include_toc = true;
        let bundle = Bundler::new(config).compose(&catalog, &[]).unwrap();
        assert!(bundle.content.starts_with("## Contents\n\n- rust-style: Rust conventions\n"));
    }

    #[test]
    fn tagged_format_wraps_documents() {
        let catalog = catalog_with(&[("alpha", "a/AGENTS.md", "# Alpha\n\nRules.\n")]);
        let mut config = BundleConfig::default();
        config.format = "tagged".to_string();
        let bundle = Bundler::new(config).compose(&catalog, &[]).unwrap();
        assert!(bundle.content.starts_with("<standards>\n"));
        assert!(bundle.content.ends_with("</standards>\n"));
        assert!(bundle
            .content
            .contains("<standard name=\"alpha\" path=\"a/AGENTS.md\">\n# Alpha\n\nRules.\n</standard>"));
    }

    #[test]
    fn frontmatter_stays_out_of_bundles() {
        let catalog = catalog_with(&[(
            "rust-style",
            "AGENTS.md",
            "---\nname: rust-style\ndescription: x\n---\n\n# Rust Style\n\nBody.\n",
        )]);
        let bundle = Bundler::new(BundleConfig::default())
            .compose(&catalog, &[])
            .unwrap();
        assert!(!bundle.content.contains("name: rust-style"));
        assert!(bundle.content.contains("# Rust Style"));
    }

    #[test]
    fn token_budget_flags_but_does_not_truncate() {
        let body = format!("# Big\n\n{}\n", "word ".repeat(400));
        let catalog = catalog_with(&[("big", "AGENTS.md", &body)]);
        let mut config = BundleConfig::default();
        config.max_tokens = 100;
        let bundle = Bundler::new(config).compose(&catalog, &[]).unwrap();
        assert!(bundle.over_budget);
        assert!(bundle.content.contains("word word"));
        assert!(bundle.estimated_tokens > 100);
    }

    #[test]
    fn token_estimate_is_chars_over_four() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
    }
}
