//! # tenet-config
//!
//! Configuration system for tenet: the `tenet.toml` schema with
//! defaults and validation, plus a loader that resolves the config
//! path, applies environment overrides, and supports hot-reload.

mod loader;
mod schema;

pub use loader::ConfigLoader;
pub use schema::{
    BundleConfig, ConfigWarning, DiscoveryConfig, DuplicatesConfig, LintConfig, LoggingConfig,
    TenetConfig,
};
