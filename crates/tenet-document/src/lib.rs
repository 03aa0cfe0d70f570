//! # tenet-document
//!
//! Document model and markdown structure parser for standards documents
//! (AGENTS.md, CONVENTIONS.md, and friends).
//!
//! The parser is line-oriented and deliberately shallow: it extracts the
//! structure the lint rules and the bundler care about — headings, checklist
//! items, code fences, links, optional frontmatter — and leaves the prose
//! alone. It never fails on arbitrary UTF-8 input; a file with no
//! recognizable structure is simply a document with empty structure.
//!
//! ## Frontmatter
//!
//! Documents MAY start with a SKILL.md-style YAML frontmatter block:
//!
//! ```markdown
//! ---
//! name: rust-conventions
//! description: Rust-specific engineering standards
//! scope: repo
//! tags: [rust, style]
//! ---
//!
//! # Rust Conventions
//! ...
//! ```
//!
//! Unlike SKILL.md, frontmatter is optional — most AGENTS.md files in the
//! wild have none. Strictness about its fields lives in the lint layer.

pub mod frontmatter;
pub mod model;
pub mod parser;

pub use frontmatter::Frontmatter;
pub use model::{
    CheckState, ChecklistItem, CodeBlock, Document, Heading, Link, slugify,
};
pub use parser::parse;
