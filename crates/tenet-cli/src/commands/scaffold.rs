use std::path::Path;

/// Starter configuration written by `tenet init`. Commented-out lines
/// show the defaults.
const STARTER_CONFIG: &str = r#"# 📐 tenet configuration

[discovery]
roots = ["."]
patterns = ["AGENTS.md", "CLAUDE.md", "CONVENTIONS.md", "STANDARDS.md", "*.agents.md"]
ignore = [".git", "node_modules", "target", "vendor", ".tenet"]
# max_depth = 8

[lint]
max_heading_depth = 4
require_title = true
checklist_marker = "-"
# max_line_length = 100
# disabled = ["fence-language"]

# Re-level individual rules:
# [lint.severity]
# line-length = "warning"

[duplicates]
similarity = 0.85
# shingle_size = 5
# min_lines = 8

[bundle]
format = "markdown"
# include_toc = true
# order = ["core-rules"]
# max_tokens = 8000

[logging]
level = "info"
# format = "pretty"
"#;

/// Starter standards document written by `tenet new`. Passes the
/// default rule set as-is.
const STARTER_DOCUMENT: &str = r#"---
name: engineering-standards
description: Working conventions for agents and humans in this repository
scope: repo
version: 0.1.0
---

# Engineering Standards

## Scope

State which parts of the repository these conventions cover, and where
more specific documents take over.

## Naming

- [ ] Modules and files use snake_case
- [ ] Public APIs spell words out instead of abbreviating

## Architecture

Describe the layering and which direction dependencies may point.

## Testing

- [ ] Every behavior change ships with a test
- [ ] Tests are deterministic and order-independent

## Error Handling

Say how errors propagate, which layer logs them, and what callers may
rely on.

## Git Hygiene

- [ ] Commit subjects are imperative and under 72 characters
- [ ] Every commit builds and passes tests on its own
"#;

/// Create a tenet.toml in the current directory.
pub(super) fn cmd_init(force: bool) -> tenet_core::Result<()> {
    let config_path = std::env::current_dir()?.join("tenet.toml");

    if config_path.exists() {
        if !force {
            println!("⚠️  {} already exists", config_path.display());
            println!("   Re-run with --force to replace it.");
            return Ok(());
        }
        let confirmed = dialoguer::Confirm::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt(format!("Replace {}?", config_path.display()))
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("   Keeping the existing file.");
            return Ok(());
        }
    }

    std::fs::write(&config_path, STARTER_CONFIG)?;
    println!("✅ Created {}", config_path.display());
    println!("   Edit it to fit the repository, then run: tenet check");

    Ok(())
}

/// Scaffold a starter standards document.
pub(super) fn cmd_new(path: &Path) -> tenet_core::Result<()> {
    if path.exists() {
        println!("⚠️  {} already exists", path.display());
        println!("   Pick another path or remove it first.");
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, STARTER_DOCUMENT)?;
    println!("✅ Created {}", path.display());
    println!("   Fill in the sections, then run: tenet check {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenet_config::TenetConfig;
    use tenet_lint::LintEngine;

    #[test]
    fn starter_config_parses_and_validates() {
        let config: TenetConfig = toml::from_str(STARTER_CONFIG).unwrap();
        let warnings = config.validate().unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.lint.max_heading_depth, 4);
        assert_eq!(config.duplicates.similarity, 0.85);
    }

    #[test]
    fn starter_document_passes_the_default_rules() {
        let doc = tenet_document::parse(STARTER_DOCUMENT, Path::new("AGENTS.md"));
        let engine = LintEngine::new(TenetConfig::default().lint);
        let findings = engine.check_document(&doc);
        assert!(findings.is_empty(), "starter document should be clean: {findings:?}");
    }

    #[test]
    fn starter_document_has_the_expected_shape() {
        let doc = tenet_document::parse(STARTER_DOCUMENT, Path::new("AGENTS.md"));
        assert_eq!(doc.display_name(), "engineering-standards");
        assert_eq!(doc.title.as_deref(), Some("Engineering Standards"));
        let (done, total) = doc.checklist_progress();
        assert_eq!(done, 0);
        assert_eq!(total, 6);
    }
}
