use console::style;
use std::path::Path;

use tenet_bundle::estimate_tokens;
use tenet_catalog::{Catalog, DuplicateScanner};
use tenet_config::TenetConfig;
use tenet_document::Document;

fn discover(config: &TenetConfig) -> tenet_core::Result<Catalog> {
    let mut catalog = Catalog::new(config.discovery.clone());
    catalog.discover()?;
    Ok(catalog)
}

pub(super) fn cmd_list(config: TenetConfig, json: bool) -> tenet_core::Result<()> {
    let catalog = discover(&config)?;

    if json {
        let documents: Vec<serde_json::Value> = catalog
            .list()
            .iter()
            .map(|(name, doc)| {
                serde_json::json!({
                    "name": name,
                    "path": doc.path,
                    "kind": doc.kind.label(),
                    "lines": doc.line_count,
                    "description": doc
                        .frontmatter
                        .as_ref()
                        .and_then(|fm| fm.description.clone()),
                })
            })
            .collect();
        let shadowed: Vec<serde_json::Value> = catalog
            .shadowed()
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "path": s.path,
                    "shadowed_by": s.shadowed_by,
                })
            })
            .collect();
        let out = serde_json::json!({ "documents": documents, "shadowed": shadowed });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No standards documents found.");
        println!("   Roots: {:?}", config.discovery.roots);
        println!("   Run 'tenet new' to scaffold one.");
        return Ok(());
    }

    println!("\x1b[1mDocuments\x1b[0m ({})", catalog.count());
    for (name, doc) in catalog.list() {
        println!(
            "  📄 {:<28} {:<10} {}",
            name,
            doc.kind.label(),
            style(doc.path.display()).dim()
        );
    }
    if !catalog.shadowed().is_empty() {
        println!();
        println!("\x1b[1mShadowed\x1b[0m ({})", catalog.shadowed().len());
        for s in catalog.shadowed() {
            println!(
                "  {} {} {}",
                style(&s.name).dim(),
                style(s.path.display()).dim(),
                style(format!("(shadowed by {})", s.shadowed_by.display())).dim()
            );
        }
    }
    Ok(())
}

pub(super) fn cmd_show(config: TenetConfig, name: &str) -> tenet_core::Result<()> {
    let catalog = discover(&config)?;

    // Accept either a catalog name or a direct path.
    let owned;
    let doc: &Document = match catalog.get(name) {
        Some(doc) => doc,
        None if Path::new(name).is_file() => {
            owned = Document::from_file(Path::new(name))?;
            &owned
        }
        None => {
            return Err(tenet_core::TenetError::DocumentNotFound(name.to_string()));
        }
    };

    println!(
        "📄 {} {}",
        style(doc.display_name()).bold(),
        style(format!("({})", doc.path.display())).dim()
    );
    println!(
        "   kind: {}   lines: {}   ~{} tokens",
        doc.kind.label(),
        doc.line_count,
        estimate_tokens(doc.body())
    );
    if let Some(fm) = &doc.frontmatter {
        if let Some(description) = &fm.description {
            println!("   {description}");
        }
        if !fm.tags.is_empty() {
            println!("   tags: {}", fm.tags.join(", "));
        }
    }

    if !doc.headings.is_empty() {
        println!();
        println!("\x1b[1mOutline\x1b[0m");
        for heading in &doc.headings {
            let indent = "  ".repeat(heading.level.saturating_sub(1) as usize);
            println!("  {}{} {}", indent, "#".repeat(heading.level as usize), heading.text);
        }
    }

    let (done, total) = doc.checklist_progress();
    if total > 0 {
        println!();
        println!("\x1b[1mChecklist\x1b[0m {done}/{total} complete");
    }
    if !doc.links.is_empty() {
        println!();
        println!("\x1b[1mLinks\x1b[0m ({})", doc.links.len());
        for link in &doc.links {
            println!("  {} → {}", link.text, style(&link.target).dim());
        }
    }
    if !doc.code_blocks.is_empty() {
        let untagged = doc
            .code_blocks
            .iter()
            .filter(|b| b.language.is_none())
            .count();
        println!();
        println!(
            "\x1b[1mCode blocks\x1b[0m {} ({} untagged)",
            doc.code_blocks.len(),
            untagged
        );
    }
    Ok(())
}

pub(super) fn cmd_dupes(
    config: TenetConfig,
    threshold: Option<f64>,
    json: bool,
) -> tenet_core::Result<()> {
    let mut dup_config = config.duplicates.clone();
    if let Some(t) = threshold {
        if !(0.0..=1.0).contains(&t) {
            return Err(tenet_core::TenetError::Config(format!(
                "threshold must be between 0.0 and 1.0, got {t}"
            )));
        }
        dup_config.similarity = t;
    }

    let catalog = discover(&config)?;
    let docs: Vec<&Document> = catalog.list().iter().map(|(_, doc)| *doc).collect();

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_message(format!("comparing {} documents...", docs.len()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    let report = DuplicateScanner::new(dup_config).scan(&docs);
    spinner.finish_and_clear();

    if json {
        println!("{}", report.to_json()?);
    } else if report.is_clean() {
        println!("✅ No duplicates among {} documents", docs.len());
    } else {
        for group in &report.exact {
            println!("❌ identical content:");
            for path in &group.paths {
                println!("     {}", path.display());
            }
        }
        for pair in &report.near {
            println!(
                "⚠️  {:.0}% similar: {} ↔ {}",
                pair.similarity * 100.0,
                pair.left.display(),
                pair.right.display()
            );
        }
        println!();
        println!(
            "\x1b[1m{} exact group(s), {} near pair(s)\x1b[0m",
            report.exact.len(),
            report.near.len()
        );
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
