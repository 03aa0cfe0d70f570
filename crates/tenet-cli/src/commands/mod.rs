use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use tenet_config::ConfigLoader;

mod bundle;
mod catalog;
mod check;
mod scaffold;

/// 📐 tenet — Linter and aggregator for engineering standards documents
#[derive(Parser)]
#[command(name = "tenet", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to tenet.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint all discovered documents, or just the given paths
    Check {
        /// Files or directories to check instead of the configured roots
        paths: Vec<PathBuf>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the document catalog, shadowing included
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one document's structure (headings, checklists, links)
    Show {
        /// Catalog name or path of the document
        name: String,
    },
    /// Find exact and near-duplicate documents
    Dupes {
        /// Similarity threshold override (0.0-1.0)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compose documents into a single artifact
    Bundle {
        /// Document names to include (default: all, duplicates collapsed)
        names: Vec<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: markdown or tagged
        #[arg(short, long)]
        format: Option<String>,

        /// Prepend a table of contents (markdown format only)
        #[arg(long)]
        toc: bool,
    },
    /// List lint rules and their severities
    Rules,
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a config value in tenet.toml (dot-notation key)
    Set {
        /// Config key in dot notation (e.g. lint.max_heading_depth)
        key: String,
        /// Value to set
        value: String,
    },
    /// Create a tenet.toml in the current directory
    Init {
        /// Replace an existing tenet.toml (asks for confirmation)
        #[arg(long)]
        force: bool,
    },
    /// Scaffold a starter standards document
    New {
        /// Where to write it
        #[arg(default_value = "AGENTS.md")]
        path: PathBuf,
    },
    /// Watch the configured roots and re-check on every change
    Watch,
    /// Show version and build info
    Version,
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub async fn run(self) -> tenet_core::Result<()> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level.as_deref().unwrap_or(config.log_level())
        };

        // Initialize tracing with appropriate format
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
                )
                .json()
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
                )
                .with_target(false)
                .init();
        }

        match self.command {
            Commands::Check { paths, json } => check::cmd_check(config, paths, json),
            Commands::List { json } => catalog::cmd_list(config, json),
            Commands::Show { name } => catalog::cmd_show(config, &name),
            Commands::Dupes { threshold, json } => catalog::cmd_dupes(config, threshold, json),
            Commands::Bundle {
                names,
                output,
                format,
                toc,
            } => bundle::cmd_bundle(config, names, output, format, toc),
            Commands::Rules => Self::cmd_rules(config),
            Commands::Config { json } => Self::cmd_config(config, json),
            Commands::Set { key, value } => {
                Self::cmd_config_set(config_loader.path().to_path_buf(), key, value)
            }
            Commands::Init { force } => scaffold::cmd_init(force),
            Commands::New { path } => scaffold::cmd_new(&path),
            Commands::Watch => check::cmd_watch(config, config_loader).await,
            Commands::Version => Self::cmd_version(),
            Commands::Completions { shell } => Self::cmd_completions(shell),
        }
    }

    fn cmd_rules(config: tenet_config::TenetConfig) -> tenet_core::Result<()> {
        println!("\x1b[1mLint Rules\x1b[0m");
        println!();
        for rule in tenet_lint::rules::all() {
            let disabled = config.lint.disabled.iter().any(|d| d == rule.name());
            let severity = config
                .lint
                .severity
                .get(rule.name())
                .and_then(|s| tenet_lint::Severity::parse(s))
                .unwrap_or_else(|| rule.default_severity());
            if disabled {
                println!(
                    "  \x1b[90m○ {:<20} {:<8} (disabled)\x1b[0m",
                    rule.name(),
                    severity.as_str()
                );
            } else {
                println!(
                    "  ● {:<20} {:<8} {}",
                    rule.name(),
                    severity.as_str(),
                    rule.description()
                );
            }
        }
        println!();
        println!("  Disable rules with lint.disabled, re-level them with lint.severity.");
        Ok(())
    }

    fn cmd_config(config: tenet_config::TenetConfig, json: bool) -> tenet_core::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config)
                    .map_err(|e| tenet_core::TenetError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_config_set(config_path: PathBuf, key: String, value: String) -> tenet_core::Result<()> {
        if !config_path.exists() {
            return Err(tenet_core::TenetError::Config(
                "No tenet.toml found. Run 'tenet init' first.".into(),
            ));
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            tenet_core::TenetError::Config(format!("Cannot read {}: {}", config_path.display(), e))
        })?;

        let mut doc = content.parse::<toml_edit::DocumentMut>().map_err(|e| {
            tenet_core::TenetError::Config(format!(
                "Invalid TOML in {}: {}",
                config_path.display(),
                e
            ))
        })?;

        // Parse dot-notation key into table path, e.g. "lint.max_heading_depth"
        // → ["lint", "max_heading_depth"]
        let parts: Vec<&str> = key.split('.').collect();
        if parts.is_empty() {
            return Err(tenet_core::TenetError::Config("Empty key".into()));
        }

        // Navigate to the correct table, creating intermediate tables as needed
        let table_parts = &parts[..parts.len() - 1];
        let leaf_key = parts[parts.len() - 1];

        let mut table: &mut toml_edit::Item = doc.as_item_mut();
        for part in table_parts {
            if table.get(part).is_none() {
                table[part] = toml_edit::Item::Table(toml_edit::Table::new());
            }
            table = &mut table[part];
        }

        // Infer the value type: bool, integer, float, or string
        let toml_value = if value == "true" {
            toml_edit::value(true)
        } else if value == "false" {
            toml_edit::value(false)
        } else if let Ok(i) = value.parse::<i64>() {
            toml_edit::value(i)
        } else if let Ok(f) = value.parse::<f64>() {
            toml_edit::value(f)
        } else {
            toml_edit::value(&value)
        };

        let old_value = table.get(leaf_key).map(|v| v.to_string());
        table[leaf_key] = toml_value;

        std::fs::write(&config_path, doc.to_string()).map_err(|e| {
            tenet_core::TenetError::Config(format!("Cannot write {}: {}", config_path.display(), e))
        })?;

        match old_value {
            Some(old) => println!("✅ {} = {} (was {})", key, value, old.trim()),
            None => println!("✅ {key} = {value} (new)"),
        }

        Ok(())
    }

    fn cmd_version() -> tenet_core::Result<()> {
        println!("📐 tenet v{}", env!("CARGO_PKG_VERSION"));
        println!("   Rust edition: 2024");
        println!("   Target: {}", std::env::consts::ARCH);
        println!("   OS: {}", std::env::consts::OS);
        #[cfg(debug_assertions)]
        println!("   Profile: debug");
        #[cfg(not(debug_assertions))]
        println!("   Profile: release");
        Ok(())
    }

    fn cmd_completions(shell: Shell) -> tenet_core::Result<()> {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "tenet", &mut std::io::stdout());
        Ok(())
    }
}
