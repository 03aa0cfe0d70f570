//! # tenet-cli
//!
//! Command-line interface for the tenet standards toolchain.
//!
//! ## Commands
//!
//! - `tenet check` — Lint discovered standards documents
//! - `tenet list` — List the document catalog, shadowing included
//! - `tenet show` — Inspect one document's structure
//! - `tenet dupes` — Find exact and near-duplicate documents
//! - `tenet bundle` — Compose documents into a single artifact
//! - `tenet rules` — List the lint rules
//! - `tenet init` / `tenet new` — Scaffold a config / a starter document
//! - `tenet watch` — Re-check whenever documents change

pub mod commands;

pub use commands::Cli;
