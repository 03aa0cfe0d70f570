use serde::Serialize;
use tenet_core::{Diagnostic, Severity};

/// The outcome of linting a batch of documents.
///
/// Diagnostics are sorted by path, then line, then severity (most
/// severe first), so output is stable across runs.
#[derive(Debug, Clone, Serialize)]
pub struct LintReport {
    pub files_checked: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    pub fn new(files_checked: usize, mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then(a.line.unwrap_or(0).cmp(&b.line.unwrap_or(0)))
                .then(b.severity.cmp(&a.severity))
                .then(a.rule.cmp(&b.rule))
        });
        Self {
            files_checked,
            diagnostics,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Most severe finding, if any.
    pub fn worst(&self) -> Option<Severity> {
        self.diagnostics.iter().map(|d| d.severity).max()
    }

    /// True when anything at warning level or above was found. Info
    /// findings alone do not make a run fail.
    pub fn has_problems(&self) -> bool {
        self.worst().is_some_and(|s| s >= Severity::Warning)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} findings ({} errors, {} warnings, {} info) across {} files",
            self.diagnostics.len(),
            self.count(Severity::Error),
            self.count(Severity::Warning),
            self.count(Severity::Info),
            self.files_checked
        )
    }

    pub fn to_json(&self) -> tenet_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn diag(path: &str, line: Option<usize>, severity: Severity, rule: &str) -> Diagnostic {
        let d = Diagnostic::new(rule, severity, PathBuf::from(path), "message");
        match line {
            Some(n) => d.with_line(n),
            None => d,
        }
    }

    #[test]
    fn diagnostics_sort_by_path_then_line() {
        let report = LintReport::new(
            2,
            vec![
                diag("b/AGENTS.md", Some(3), Severity::Info, "x"),
                diag("a/AGENTS.md", Some(9), Severity::Warning, "x"),
                diag("a/AGENTS.md", Some(2), Severity::Error, "x"),
            ],
        );
        let paths: Vec<_> = report
            .diagnostics
            .iter()
            .map(|d| (d.path.display().to_string(), d.line))
            .collect();
        assert_eq!(
            paths,
            vec![
                ("a/AGENTS.md".to_string(), Some(2)),
                ("a/AGENTS.md".to_string(), Some(9)),
                ("b/AGENTS.md".to_string(), Some(3)),
            ]
        );
    }

    #[test]
    fn whole_file_findings_sort_before_line_findings() {
        let report = LintReport::new(
            1,
            vec![
                diag("AGENTS.md", Some(1), Severity::Warning, "x"),
                diag("AGENTS.md", None, Severity::Error, "y"),
            ],
        );
        assert_eq!(report.diagnostics[0].line, None);
    }

    #[test]
    fn worst_and_problem_threshold() {
        let info_only = LintReport::new(1, vec![diag("a", Some(1), Severity::Info, "x")]);
        assert_eq!(info_only.worst(), Some(Severity::Info));
        assert!(!info_only.has_problems());
        assert!(!info_only.is_clean());

        let with_warning = LintReport::new(
            1,
            vec![
                diag("a", Some(1), Severity::Info, "x"),
                diag("a", Some(2), Severity::Warning, "y"),
            ],
        );
        assert!(with_warning.has_problems());
    }

    #[test]
    fn summary_counts_by_severity() {
        let report = LintReport::new(
            3,
            vec![
                diag("a", Some(1), Severity::Error, "x"),
                diag("a", Some(2), Severity::Warning, "y"),
                diag("b", Some(1), Severity::Warning, "y"),
            ],
        );
        assert_eq!(
            report.summary(),
            "3 findings (1 errors, 2 warnings, 0 info) across 3 files"
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let report = LintReport::new(1, vec![diag("a", Some(1), Severity::Error, "x")]);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"files_checked\": 1"));
        assert!(json.contains("\"severity\": \"error\""));
    }
}
