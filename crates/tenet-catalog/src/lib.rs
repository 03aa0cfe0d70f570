//! # tenet-catalog
//!
//! Discovery and indexing of standards documents.
//!
//! The [`Catalog`] walks the configured roots, loads every file whose
//! name matches a discovery pattern, and resolves name collisions by
//! precedence: earlier roots shadow later ones, the way a project
//! document overrides a user-level one. The [`DuplicateScanner`]
//! compares catalog contents for exact and near duplicates.

mod catalog;
mod duplicates;

pub use catalog::{Catalog, ShadowedDoc};
pub use duplicates::{DuplicateReport, DuplicateScanner, ExactGroup, NearPair, fingerprint};
