use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::schema::TenetConfig;

/// Loads and optionally hot-reloads the tenet configuration.
#[derive(Debug)]
pub struct ConfigLoader {
    config: Arc<RwLock<TenetConfig>>,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > TENET_CONFIG env >
    /// nearest tenet.toml in the current directory or an ancestor >
    /// user config directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("TENET_CONFIG") {
            return PathBuf::from(p);
        }
        if let Ok(cwd) = std::env::current_dir() {
            for dir in cwd.ancestors() {
                let candidate = dir.join("tenet.toml");
                if candidate.exists() {
                    return candidate;
                }
            }
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tenet")
            .join("tenet.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> tenet_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<TenetConfig>(&raw).map_err(|e| tenet_core::TenetError::Parse {
                path: config_path.display().to_string(),
                reason: e.to_string(),
            })?
        } else {
            tracing::debug!(?config_path, "no config file, using defaults");
            TenetConfig::default()
        };

        // Apply environment variable overrides
        let config = Self::apply_env_overrides(config);

        // Validate config — log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(tenet_core::TenetError::Config(e));
            }
        }

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    /// Get a read snapshot of the current config.
    pub fn get(&self) -> TenetConfig {
        self.config.read().clone()
    }

    /// Get a shared reference for subscription.
    pub fn shared(&self) -> Arc<RwLock<TenetConfig>> {
        Arc::clone(&self.config)
    }

    /// Path the loader resolved to (may not exist on disk).
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (TENET_LOG_LEVEL, TENET_SIMILARITY, etc.)
    fn apply_env_overrides(mut config: TenetConfig) -> TenetConfig {
        if let Ok(v) = std::env::var("TENET_LOG_LEVEL") {
            config.logging.level = v;
        }
        if let Ok(v) = std::env::var("TENET_LOG_FORMAT") {
            config.logging.format = v;
        }
        if let Ok(v) = std::env::var("TENET_SIMILARITY") {
            if let Ok(threshold) = v.parse::<f64>() {
                config.duplicates.similarity = threshold;
            }
        }
        if let Ok(v) = std::env::var("TENET_MAX_HEADING_DEPTH") {
            if let Ok(depth) = v.parse::<u8>() {
                config.lint.max_heading_depth = depth;
            }
        }
        config
    }

    /// Reload the config from disk.
    pub fn reload(&self) -> tenet_core::Result<()> {
        if !self.config_path.exists() {
            return Err(tenet_core::TenetError::Config(format!(
                "config file not found: {}",
                self.config_path.display()
            )));
        }
        let raw = std::fs::read_to_string(&self.config_path)?;
        let new_config = toml::from_str::<TenetConfig>(&raw).map_err(|e| tenet_core::TenetError::Parse {
            path: self.config_path.display().to_string(),
            reason: e.to_string(),
        })?;
        let new_config = Self::apply_env_overrides(new_config);
        *self.config.write() = new_config;
        info!("configuration reloaded");
        Ok(())
    }

    /// Start a background file watcher that swaps the shared config when
    /// the config file changes. Returns a handle to the watcher (must be
    /// kept alive for watching to continue).
    pub fn watch(&self) -> tenet_core::Result<notify::RecommendedWatcher> {
        let config = Arc::clone(&self.config);
        let config_path = self.config_path.clone();

        info!(?config_path, "starting config file watcher");

        let path_for_event = config_path.clone();
        let mut watcher =
            notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
                match res {
                    Ok(event) => {
                        // Only react to modify/create events on our specific file
                        match event.kind {
                            EventKind::Modify(_) | EventKind::Create(_) => {
                                let is_our_file = event
                                    .paths
                                    .iter()
                                    .any(|p| p.file_name() == path_for_event.file_name());
                                if !is_our_file {
                                    return;
                                }

                                info!("config file changed, reloading");
                                match std::fs::read_to_string(&path_for_event) {
                                    Ok(raw) => match toml::from_str::<TenetConfig>(&raw) {
                                        Ok(new_config) => {
                                            let new_config =
                                                ConfigLoader::apply_env_overrides(new_config);
                                            *config.write() = new_config;
                                            info!("configuration hot-reloaded successfully");
                                        }
                                        Err(e) => {
                                            warn!(error = %e, "config file has errors, keeping current config");
                                        }
                                    },
                                    Err(e) => {
                                        warn!(error = %e, "failed to read config file during hot-reload");
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "file watcher error");
                    }
                }
            })
            .map_err(|e| {
                tenet_core::TenetError::Config(format!("failed to create file watcher: {}", e))
            })?;

        // Watch the parent directory (some editors create temp files + rename)
        let watch_path = self.config_path.parent().unwrap_or(Path::new("."));
        watcher
            .watch(watch_path, RecursiveMode::NonRecursive)
            .map_err(|e| {
                tenet_core::TenetError::Config(format!("failed to watch config directory: {}", e))
            })?;

        Ok(watcher)
    }
}
