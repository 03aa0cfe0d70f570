use std::path::PathBuf;
use tracing::debug;

use tenet_catalog::Catalog;
use tenet_config::{ConfigLoader, TenetConfig};
use tenet_document::Document;
use tenet_lint::{LintEngine, LintReport};

/// Lint the catalog (or explicit paths) and print the report.
/// Exits non-zero when anything at warning level or above is found.
pub(super) fn cmd_check(
    config: TenetConfig,
    paths: Vec<PathBuf>,
    json: bool,
) -> tenet_core::Result<()> {
    let report = run_check(&config, &paths)?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        render_report(&report);
    }

    if report.has_problems() {
        std::process::exit(1);
    }
    Ok(())
}

/// Collect documents and run the engine. Shared by check and watch.
pub(super) fn run_check(config: &TenetConfig, paths: &[PathBuf]) -> tenet_core::Result<LintReport> {
    let documents = collect_documents(config, paths)?;
    let engine = LintEngine::new(config.lint.clone());
    Ok(engine.check_all(documents.iter()))
}

/// Documents to check: explicit files are loaded directly, explicit
/// directories are discovered with the configured patterns, and no
/// paths at all means the configured roots.
fn collect_documents(config: &TenetConfig, paths: &[PathBuf]) -> tenet_core::Result<Vec<Document>> {
    if paths.is_empty() {
        let mut catalog = Catalog::new(config.discovery.clone());
        catalog.discover()?;
        return Ok(catalog.into_documents());
    }

    let mut documents = Vec::new();
    let mut roots = Vec::new();
    for path in paths {
        if path.is_file() {
            documents.push(Document::from_file(path)?);
        } else if path.is_dir() {
            roots.push(path.clone());
        } else {
            return Err(tenet_core::TenetError::Document(format!(
                "no such file or directory: {}",
                path.display()
            )));
        }
    }
    if !roots.is_empty() {
        let mut discovery = config.discovery.clone();
        discovery.roots = roots;
        let mut catalog = Catalog::new(discovery);
        catalog.discover()?;
        documents.extend(catalog.into_documents());
    }
    Ok(documents)
}

fn render_report(report: &LintReport) {
    for diagnostic in &report.diagnostics {
        println!("{diagnostic}");
    }
    if !report.diagnostics.is_empty() {
        println!();
    }
    if report.is_clean() {
        if report.files_checked == 0 {
            println!("⚠️  No standards documents found. Check discovery.roots in tenet.toml.");
        } else {
            println!("✅ {} files checked, no findings", report.files_checked);
        }
    } else {
        println!("\x1b[1m{}\x1b[0m", report.summary());
    }
}

/// Watch the configured roots and re-run the check on every change.
/// The config file itself is hot-reloaded, so threshold edits apply
/// without restarting.
pub(super) async fn cmd_watch(
    config: TenetConfig,
    config_loader: ConfigLoader,
) -> tenet_core::Result<()> {
    use notify::{EventKind, RecursiveMode, Watcher};
    use tokio::sync::mpsc;

    let shared = config_loader.shared();
    // Keep the config watcher alive for the whole session; a missing
    // config file is fine, we just watch the documents then.
    let _config_watcher = config_loader.watch().ok();

    let (tx, mut rx) = mpsc::channel::<notify::Event>(64);
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res {
            if matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                let _ = tx.blocking_send(event);
            }
        }
    })
    .map_err(|e| tenet_core::TenetError::Catalog(format!("failed to create file watcher: {e}")))?;

    let mut watched = 0;
    for root in &config.discovery.roots {
        if root.exists() {
            watcher
                .watch(root, RecursiveMode::Recursive)
                .map_err(|e| {
                    tenet_core::TenetError::Catalog(format!(
                        "failed to watch {}: {}",
                        root.display(),
                        e
                    ))
                })?;
            watched += 1;
        } else {
            debug!(?root, "root does not exist, not watching");
        }
    }
    if watched == 0 {
        return Err(tenet_core::TenetError::Catalog(
            "none of the configured roots exist, nothing to watch".to_string(),
        ));
    }

    println!("👀 Watching {watched} root(s) for changes. Ctrl-C to stop.");
    run_and_render(&shared.read().clone());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\n👋 Stopped watching.");
                break;
            }
            event = rx.recv() => {
                match event {
                    Some(event) if touches_markdown(&event) => {
                        // Editors fire bursts of events per save; let the
                        // burst finish, then drain it and check once.
                        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                        while rx.try_recv().is_ok() {}

                        let stamp = chrono::Local::now().format("%H:%M:%S");
                        println!("\n\x1b[90m── {stamp} ──\x1b[0m");
                        run_and_render(&shared.read().clone());
                    }
                    Some(_) => {}
                    None => break,
                }
            }
        }
    }
    Ok(())
}

fn touches_markdown(event: &notify::Event) -> bool {
    event
        .paths
        .iter()
        .any(|p| p.extension().is_some_and(|ext| ext == "md"))
}

fn run_and_render(config: &TenetConfig) {
    match run_check(config, &[]) {
        Ok(report) => render_report(&report),
        Err(e) => println!("❌ check failed: {e}"),
    }
}
