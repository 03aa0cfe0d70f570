use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rough classification of a standards document, derived from its file name.
///
/// The kind only affects reporting (grouping, icons) — every kind goes
/// through the same parser and rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    /// AGENTS.md / CLAUDE.md — instructions addressed to AI coding assistants.
    Agents,
    /// README.md and friends.
    Readme,
    /// CONVENTIONS.md, STANDARDS.md, *.agents.md — named standards documents.
    Standards,
    /// Anything else that matched a discovery pattern.
    Other,
}

impl DocKind {
    /// Classify from a file name (not a full path).
    pub fn from_file_name(name: &str) -> Self {
        let upper = name.to_uppercase();
        if upper == "AGENTS.MD" || upper == "CLAUDE.MD" {
            DocKind::Agents
        } else if upper.starts_with("README") {
            DocKind::Readme
        } else if upper == "CONVENTIONS.MD"
            || upper == "STANDARDS.MD"
            || upper.ends_with(".AGENTS.MD")
        {
            DocKind::Standards
        } else {
            DocKind::Other
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(Self::from_file_name)
            .unwrap_or(DocKind::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocKind::Agents => "agents",
            DocKind::Readme => "readme",
            DocKind::Standards => "standards",
            DocKind::Other => "other",
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn classify_common_names() {
        assert_eq!(DocKind::from_file_name("AGENTS.md"), DocKind::Agents);
        assert_eq!(DocKind::from_file_name("CLAUDE.md"), DocKind::Agents);
        assert_eq!(DocKind::from_file_name("README.md"), DocKind::Readme);
        assert_eq!(DocKind::from_file_name("readme.md"), DocKind::Readme);
        assert_eq!(DocKind::from_file_name("CONVENTIONS.md"), DocKind::Standards);
        assert_eq!(DocKind::from_file_name("rust.agents.md"), DocKind::Standards);
        assert_eq!(DocKind::from_file_name("NOTES.md"), DocKind::Other);
    }

    #[test]
    fn classify_from_path() {
        assert_eq!(
            DocKind::from_path(&PathBuf::from("a/b/AGENTS.md")),
            DocKind::Agents
        );
        assert_eq!(DocKind::from_path(&PathBuf::from("a/b/")), DocKind::Other);
    }
}
