//! # tenet-core
//!
//! Core types, diagnostics, and error types for the tenet toolchain.
//! This crate defines the shared vocabulary used by every other crate in the workspace.

pub mod diagnostic;
pub mod error;
pub mod types;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{Result, TenetError};
pub use types::DocKind;
