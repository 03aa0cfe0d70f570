use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use tenet_config::DiscoveryConfig;
use tenet_document::Document;

const MATCH_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A document that lost a name collision during discovery.
#[derive(Debug, Clone)]
pub struct ShadowedDoc {
    pub name: String,
    pub path: PathBuf,
    pub shadowed_by: PathBuf,
}

/// The document catalog — discovers and indexes standards documents.
///
/// Roots are scanned in precedence order (first = highest priority).
/// When two documents resolve to the same name, the one from the
/// earlier root (or the lexicographically earlier path within a root)
/// wins and the loser is recorded as shadowed.
pub struct Catalog {
    documents: HashMap<String, Document>,
    shadowed: Vec<ShadowedDoc>,
    config: DiscoveryConfig,
}

impl Catalog {
    /// Create a catalog that will scan per the given discovery config.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            documents: HashMap::new(),
            shadowed: Vec::new(),
            config,
        }
    }

    /// Create an empty catalog (for tests).
    pub fn new_empty() -> Self {
        Self::new(DiscoveryConfig {
            roots: Vec::new(),
            ..DiscoveryConfig::default()
        })
    }

    /// Walk every root and load all matching documents.
    /// Returns the names loaded, in discovery order.
    pub fn discover(&mut self) -> tenet_core::Result<Vec<String>> {
        let patterns: Vec<glob::Pattern> = self
            .config
            .patterns
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!(pattern = %p, error = %e, "invalid discovery pattern, skipping");
                    None
                }
            })
            .collect();

        let mut loaded = Vec::new();
        for root in self.config.roots.clone() {
            if !root.exists() {
                debug!(?root, "discovery root does not exist, skipping");
                continue;
            }
            self.walk(&root, &root, 0, &patterns, &mut loaded)?;
        }

        info!(
            documents = self.documents.len(),
            shadowed = self.shadowed.len(),
            "catalog ready"
        );
        Ok(loaded)
    }

    fn walk(
        &mut self,
        root: &Path,
        dir: &Path,
        depth: usize,
        patterns: &[glob::Pattern],
        loaded: &mut Vec<String>,
    ) -> tenet_core::Result<()> {
        if self.config.max_depth != 0 && depth > self.config.max_depth {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| {
            tenet_core::TenetError::Catalog(format!("failed to read {}: {}", dir.display(), e))
        })?;
        // read_dir order is platform-defined; sort so shadowing within
        // a root is deterministic.
        let mut entries: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        entries.sort();

        for path in entries {
            if path.is_dir() {
                let dir_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                if self.config.ignore.iter().any(|ignored| ignored == dir_name) {
                    debug!(?path, "ignored directory");
                    continue;
                }
                self.walk(root, &path, depth + 1, patterns, loaded)?;
                continue;
            }

            let file_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if !patterns
                .iter()
                .any(|p| p.matches_with(file_name, MATCH_OPTIONS))
            {
                continue;
            }

            match Document::from_file(&path) {
                Ok(doc) => {
                    let name = Self::document_key(root, &doc);
                    match self.documents.get(&name) {
                        None => {
                            info!(document = %name, path = ?path, "loaded document");
                            loaded.push(name.clone());
                            self.documents.insert(name, doc);
                        }
                        Some(winner) => {
                            debug!(
                                document = %name,
                                path = ?path,
                                "name already taken by a higher-priority document"
                            );
                            self.shadowed.push(ShadowedDoc {
                                name,
                                path: doc.path.clone(),
                                shadowed_by: winner.path.clone(),
                            });
                        }
                    }
                }
                Err(e) => {
                    warn!(path = ?path, error = %e, "failed to load document");
                }
            }
        }
        Ok(())
    }

    /// The catalog name for a document: the frontmatter name when one
    /// is declared, otherwise the path relative to its discovery root.
    fn document_key(root: &Path, doc: &Document) -> String {
        if let Some(name) = doc
            .frontmatter
            .as_ref()
            .and_then(|fm| fm.name.as_deref())
            .filter(|n| !n.is_empty())
        {
            return name.to_string();
        }
        doc.path
            .strip_prefix(root)
            .unwrap_or(&doc.path)
            .display()
            .to_string()
    }

    /// Insert a document directly, bypassing discovery.
    pub fn register(&mut self, name: impl Into<String>, doc: Document) {
        self.documents.insert(name.into(), doc);
    }

    /// Get a document by name.
    pub fn get(&self, name: &str) -> Option<&Document> {
        self.documents.get(name)
    }

    /// All documents, sorted by name.
    pub fn list(&self) -> Vec<(&str, &Document)> {
        let mut docs: Vec<_> = self
            .documents
            .iter()
            .map(|(name, doc)| (name.as_str(), doc))
            .collect();
        docs.sort_by_key(|(name, _)| *name);
        docs
    }

    /// Consume the catalog, yielding its documents sorted by path.
    pub fn into_documents(self) -> Vec<Document> {
        let mut docs: Vec<Document> = self.documents.into_values().collect();
        docs.sort_by(|a, b| a.path.cmp(&b.path));
        docs
    }

    /// Documents that lost a name collision.
    pub fn shadowed(&self) -> &[ShadowedDoc] {
        &self.shadowed
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tenet_document::parse;

    fn discovery(roots: Vec<PathBuf>) -> DiscoveryConfig {
        DiscoveryConfig {
            roots,
            ..DiscoveryConfig::default()
        }
    }

    #[test]
    fn register_and_list() {
        let mut catalog = Catalog::new_empty();
        catalog.register("b-doc", parse("# B\n", Path::new("b/AGENTS.md")));
        catalog.register("a-doc", parse("# A\n", Path::new("a/AGENTS.md")));

        let names: Vec<_> = catalog.list().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["a-doc", "b-doc"]);
        assert!(catalog.get("a-doc").is_some());
        assert!(catalog.get("missing").is_none());
        assert_eq!(catalog.count(), 2);
    }

    #[test]
    fn discover_matches_patterns_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("AGENTS.md"), "# Root\n").unwrap();
        std::fs::create_dir_all(dir.path().join("backend/api")).unwrap();
        std::fs::write(dir.path().join("backend/api/AGENTS.md"), "# Api\n").unwrap();
        std::fs::write(dir.path().join("backend/notes.md"), "# Not matched\n").unwrap();

        let mut catalog = Catalog::new(discovery(vec![dir.path().to_path_buf()]));
        let loaded = catalog.discover().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(catalog.get("AGENTS.md").is_some());
        assert!(catalog.get("backend/api/AGENTS.md").is_some());
    }

    #[test]
    fn frontmatter_name_wins_over_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("AGENTS.md"),
            "---\nname: rust-style\ndescription: x\n---\n\n# Rust Style\n",
        )
        .unwrap();

        let mut catalog = Catalog::new(discovery(vec![dir.path().to_path_buf()]));
        catalog.discover().unwrap();
        assert!(catalog.get("rust-style").is_some());
        assert!(catalog.get("AGENTS.md").is_none());
    }

    #[test]
    fn ignored_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        std::fs::write(dir.path().join("node_modules/pkg/AGENTS.md"), "# Vendored\n").unwrap();
        std::fs::write(dir.path().join("AGENTS.md"), "# Ours\n").unwrap();

        let mut catalog = Catalog::new(discovery(vec![dir.path().to_path_buf()]));
        catalog.discover().unwrap();
        assert_eq!(catalog.count(), 1);
    }

    #[test]
    fn earlier_root_shadows_later() {
        let high = tempfile::tempdir().unwrap();
        let low = tempfile::tempdir().unwrap();
        std::fs::write(
            high.path().join("AGENTS.md"),
            "---\nname: shared\ndescription: high\n---\n\n# High\n",
        )
        .unwrap();
        std::fs::write(
            low.path().join("AGENTS.md"),
            "---\nname: shared\ndescription: low\n---\n\n# Low\n",
        )
        .unwrap();

        let mut catalog = Catalog::new(discovery(vec![
            high.path().to_path_buf(),
            low.path().to_path_buf(),
        ]));
        catalog.discover().unwrap();

        assert_eq!(catalog.count(), 1);
        let doc = catalog.get("shared").unwrap();
        assert_eq!(
            doc.frontmatter.as_ref().unwrap().description.as_deref(),
            Some("high")
        );
        assert_eq!(catalog.shadowed().len(), 1);
        assert_eq!(catalog.shadowed()[0].name, "shared");
    }

    #[test]
    fn max_depth_bounds_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
        std::fs::write(dir.path().join("a/b/c/AGENTS.md"), "# Deep\n").unwrap();

        let mut config = discovery(vec![dir.path().to_path_buf()]);
        config.max_depth = 2;
        let mut catalog = Catalog::new(config);
        catalog.discover().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn nonexistent_root_is_fine() {
        let mut catalog = Catalog::new(discovery(vec![PathBuf::from(
            "/nonexistent/path/to/standards",
        )]));
        let loaded = catalog.discover().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn patterns_match_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("agents.md"), "# Lowercase\n").unwrap();

        let mut catalog = Catalog::new(discovery(vec![dir.path().to_path_buf()]));
        catalog.discover().unwrap();
        assert_eq!(catalog.count(), 1);
    }
}
