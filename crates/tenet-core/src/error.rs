use thiserror::Error;

/// Unified error type for the entire tenet toolchain.
#[derive(Error, Debug)]
pub enum TenetError {
    // ── Document errors ────────────────────────────────────────
    #[error("document error: {0}")]
    Document(String),

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    // ── Lint errors ────────────────────────────────────────────
    #[error("unknown rule: {0}")]
    RuleNotFound(String),

    #[error("rule failed: {rule}: {reason}")]
    Rule { rule: String, reason: String },

    // ── Catalog errors ─────────────────────────────────────────
    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    // ── Bundle errors ──────────────────────────────────────────
    #[error("bundle error: {0}")]
    Bundle(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TenetError>;
