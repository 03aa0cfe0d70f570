//! # tenet-lint
//!
//! Structural lint rules for standards documents and the engine that
//! runs them.
//!
//! Each rule implements the [`Rule`] trait and reports [`Diagnostic`]s
//! against a parsed document. The [`LintEngine`] assembles the rule
//! set from configuration (dropping `lint.disabled` rules, applying
//! `lint.severity` overrides) and produces a sorted [`LintReport`]:
//!
//! ```text
//! ❌ docs/AGENTS.md:14 [fence-closed] code fence opened at line 14 is never closed
//! ⚠️ docs/AGENTS.md:3 [heading-skip] heading level jumps from 1 to 3
//! 💡 AGENTS.md:21 [fence-language] code fence has no language tag
//! ```

mod engine;
mod report;
mod rule;
pub mod rules;

pub use engine::LintEngine;
pub use report::LintReport;
pub use rule::Rule;

// Re-exported so callers matching on findings need only this crate.
pub use tenet_core::{Diagnostic, Severity};
