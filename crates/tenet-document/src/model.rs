use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tenet_core::DocKind;

use crate::frontmatter::Frontmatter;

/// An ATX (`## Title`) or setext (underlined) heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    /// 1 (H1) through 6 (H6).
    pub level: u8,
    pub text: String,
    /// 1-based line of the heading text.
    pub line: usize,
}

impl Heading {
    /// GitHub-style anchor for the heading text.
    pub fn anchor(&self) -> String {
        slugify(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Unchecked,
    Checked,
}

/// A `- [ ]` / `- [x]` checklist item.
///
/// The raw formatting details (bullet marker, check character, gap width)
/// are kept so the checklist-format rule can judge them without re-reading
/// the source line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    pub state: CheckState,
    /// Bullet marker as written: '-', '*', or '+'.
    pub marker: char,
    /// Character between the brackets as written: ' ', 'x', or 'X'.
    pub check: char,
    /// Spaces between `]` and the item text.
    pub gap: usize,
    /// 1-based line number.
    pub line: usize,
    /// Text of the nearest preceding heading, or empty at top of file.
    pub section: String,
}

impl ChecklistItem {
    pub fn is_checked(&self) -> bool {
        self.state == CheckState::Checked
    }
}

/// A fenced code block. `end_line` is `None` when the fence never closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    /// 1-based line of the opening fence.
    pub start_line: usize,
    /// 1-based line of the closing fence, when present.
    pub end_line: Option<usize>,
}

/// An inline link `[text](target)`, an image, or a reference definition
/// `[label]: target`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub target: String,
    pub line: usize,
}

/// A parsed standards document.
///
/// `raw` holds the full original file content; everything else is derived
/// structure. Line numbers are absolute file lines (frontmatter included),
/// so diagnostics point at the real location in an editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: DocKind,
    #[serde(default)]
    pub frontmatter: Option<Frontmatter>,
    /// Text of the first H1, when one exists.
    #[serde(default)]
    pub title: Option<String>,
    pub headings: Vec<Heading>,
    pub checklist: Vec<ChecklistItem>,
    pub code_blocks: Vec<CodeBlock>,
    pub links: Vec<Link>,
    pub line_count: usize,
    /// Full original content.
    #[serde(skip)]
    pub raw: String,
}

impl Document {
    /// Read and parse a document from disk.
    pub fn from_file(path: &Path) -> tenet_core::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            tenet_core::TenetError::Document(format!("failed to read {}: {}", path.display(), e))
        })?;
        Ok(crate::parser::parse(&content, path))
    }

    /// Name to show for this document: frontmatter `name` when present,
    /// otherwise the file name.
    pub fn display_name(&self) -> &str {
        self.frontmatter
            .as_ref()
            .and_then(|fm| fm.name.as_deref())
            .unwrap_or(&self.file_name)
    }

    /// The raw source line at 1-based `line`, when in range.
    pub fn line(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.raw.lines().nth(line - 1)
    }

    /// `(checked, total)` across all checklist items.
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|c| c.is_checked()).count();
        (done, self.checklist.len())
    }

    /// Anchors for every heading, for fragment-link validation.
    pub fn anchors(&self) -> Vec<String> {
        self.headings.iter().map(|h| h.anchor()).collect()
    }

    /// Body content with the frontmatter block stripped.
    pub fn body(&self) -> &str {
        let skip = self
            .frontmatter
            .as_ref()
            .map(|fm| fm.span_lines)
            .unwrap_or(0);
        if skip == 0 {
            return &self.raw;
        }
        // Find the byte offset after `skip` lines.
        let mut offset = 0;
        let mut seen = 0;
        for (i, b) in self.raw.bytes().enumerate() {
            if b == b'\n' {
                seen += 1;
                if seen == skip {
                    offset = i + 1;
                    break;
                }
            }
        }
        if offset == 0 && seen < skip {
            // Frontmatter covered the whole file.
            return "";
        }
        &self.raw[offset..]
    }

    /// True when the document has no content at all.
    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// GitHub-style slug for heading anchors: lowercase, alphanumerics kept,
/// spaces become hyphens, everything else dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else if ch == ' ' || ch == '-' || ch == '_' {
            slug.push(if ch == ' ' { '-' } else { ch });
        }
        // All other punctuation is dropped.
    }
    slug
}
