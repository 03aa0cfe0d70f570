use std::path::PathBuf;

use tenet_bundle::Bundler;
use tenet_catalog::Catalog;
use tenet_config::TenetConfig;

pub(super) fn cmd_bundle(
    config: TenetConfig,
    names: Vec<String>,
    output: Option<PathBuf>,
    format: Option<String>,
    toc: bool,
) -> tenet_core::Result<()> {
    let mut bundle_config = config.bundle.clone();
    if let Some(format) = format {
        if !matches!(format.as_str(), "markdown" | "tagged") {
            return Err(tenet_core::TenetError::Config(format!(
                "unknown bundle format \"{format}\" (expected markdown or tagged)"
            )));
        }
        bundle_config.format = format;
    }
    if toc {
        bundle_config.include_toc = true;
    }

    let mut catalog = Catalog::new(config.discovery.clone());
    catalog.discover()?;

    let bundle = Bundler::new(bundle_config).compose(&catalog, &names)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &bundle.content)?;
            println!("✅ Wrote {} ({})", path.display(), bundle.summary());
            for name in &bundle.skipped_duplicates {
                println!("   💡 {name} skipped: exact duplicate of an included document");
            }
            if bundle.over_budget {
                println!(
                    "   ⚠️  ~{} tokens exceeds bundle.max_tokens = {}",
                    bundle.estimated_tokens, config.bundle.max_tokens
                );
            }
        }
        None => {
            // Accounting goes to stderr so the artifact can be piped.
            print!("{}", bundle.content);
            eprintln!("📦 {}", bundle.summary());
            for name in &bundle.skipped_duplicates {
                eprintln!("💡 {name} skipped: exact duplicate of an included document");
            }
            if bundle.over_budget {
                eprintln!(
                    "⚠️  ~{} tokens exceeds bundle.max_tokens = {}",
                    bundle.estimated_tokens, config.bundle.max_tokens
                );
            }
        }
    }
    Ok(())
}
