use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How serious a finding is. Ordered so that `Error` compares greatest,
/// which lets reports pick the worst finding with `max()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Icon used in terminal output.
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Error => "❌",
            Severity::Warning => "⚠️ ",
            Severity::Info => "💡",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Parse a severity name as written in `tenet.toml` overrides.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "error" => Some(Severity::Error),
            "warning" | "warn" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single lint finding against one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the rule that produced this finding (e.g. "heading-skip").
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    /// Document the finding is about.
    pub path: PathBuf,
    /// 1-based line number, when the finding points at a specific line.
    #[serde(default)]
    pub line: Option<usize>,
    /// Suggested fix or context, shown indented under the message.
    #[serde(default)]
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(
        rule: impl Into<String>,
        severity: Severity,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            severity,
            message: message.into(),
            path: path.into(),
            line: None,
            hint: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Location string: `path:line` or just `path`.
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.path.display(), line),
            None => self.path.display().to_string(),
        }
    }

    /// Shorten the path to be relative to `base` when possible, for display.
    pub fn relative_to(&self, base: &Path) -> PathBuf {
        self.path
            .strip_prefix(base)
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|_| self.path.clone())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.severity.icon(),
            self.location(),
            self.rule,
            self.message
        )?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}
