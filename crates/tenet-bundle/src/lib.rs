//! # tenet-bundle
//!
//! Composes the catalog (or a selection from it) into one artifact a
//! coding assistant can swallow whole. Two output shapes:
//!
//! * `markdown` — documents joined by a separator, each introduced by
//!   an HTML comment naming its source.
//! * `tagged` — an XML-ish block for system prompts:
//!
//! ```text
//! <standards>
//! <standard name="rust-style" path="docs/AGENTS.md">
//! ...
//! </standard>
//! </standards>
//! ```
//!
//! Token counts are estimated at four characters per token, which is
//! close enough to plan prompt budgets with.

mod bundler;

pub use bundler::{Bundle, BundledDoc, Bundler, estimate_tokens};
