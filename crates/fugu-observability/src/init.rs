// Copyright 2025 Fugu Developers
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for Fugu
//!
//! Console logging is always available. With the `file-logging` feature,
//! [`init_logging`] also writes per-crate files into a timestamped run folder
//! and applies the configured retention policy.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use fugu_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;

/// Keeps background log writers alive; logs are flushed when dropped.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder that receives log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the `EnvFilter` for the given flags and default level
pub fn build_env_filter(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<EnvFilter> {
    let filter = debug_flags.to_filter_string_with_default(default_level);
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

/// Install a human-readable console subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init_console_logging(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<()> {
    let env_filter = build_env_filter(debug_flags, default_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Initialize logging from configuration
///
/// Without the `file-logging` feature this is console logging at
/// `config.level`. With it, a run folder is created under `config.log_dir`:
/// ```text
/// ./logs/
///   └── run_20250101_120000/
///       ├── fugu-scaffold.log
///       ├── fugu-bricks.log
///       └── fugu.log (combined)
/// ```
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    #[cfg(feature = "file-logging")]
    {
        file::init_file_logging(debug_flags, config)
    }

    #[cfg(not(feature = "file-logging"))]
    {
        init_console_logging(debug_flags, &config.level)?;
        Ok(LoggingGuard { log_dir: None })
    }
}

#[cfg(feature = "file-logging")]
mod file {
    use super::*;
    use chrono::{NaiveDateTime, Utc};
    use tracing_appender::rolling;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{Layer, Registry};

    pub(super) fn init_file_logging(
        debug_flags: &CrateDebugFlags,
        config: &LoggingConfig,
    ) -> Result<LoggingGuard> {
        let base_log_dir = PathBuf::from(&config.log_dir);

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let run_folder = base_log_dir.join(format!("run_{}", timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        cleanup_old_logs(&base_log_dir, config.retention_days, config.retention_runs)?;

        let mut layers = Vec::new();
        let mut file_guards = Vec::new();

        let console_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_filter(build_env_filter(debug_flags, &config.level)?)
            .boxed();
        layers.push(console_layer);

        for crate_name in crate::KNOWN_CRATES {
            let file_appender = rolling::daily(&run_folder, format!("{}.log", crate_name));
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            file_guards.push(guard);

            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(EnvFilter::new(format!("{}=debug,off", crate_name)))
                .boxed();
            layers.push(file_layer);
        }

        let combined_appender = rolling::daily(&run_folder, "fugu.log");
        let (combined_non_blocking, combined_guard) = tracing_appender::non_blocking(combined_appender);
        file_guards.push(combined_guard);

        let combined_layer = tracing_subscriber::fmt::layer()
            .with_writer(combined_non_blocking)
            .with_target(true)
            .json()
            .with_filter(build_env_filter(debug_flags, &config.level)?)
            .boxed();
        layers.push(combined_layer);

        Registry::default()
            .with(layers)
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

        Ok(LoggingGuard {
            _file_guards: file_guards,
            log_dir: Some(run_folder),
        })
    }

    /// Remove run folders older than `retention_days`, then keep only the
    /// newest `retention_runs`.
    pub(super) fn cleanup_old_logs(
        base_log_dir: &Path,
        retention_days: u64,
        retention_runs: usize,
    ) -> Result<()> {
        if !base_log_dir.exists() {
            return Ok(());
        }

        let cutoff = Utc::now().naive_utc() - chrono::Duration::days(retention_days as i64);

        let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
        for entry in std::fs::read_dir(base_log_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let stamp = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix("run_"))
                .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y%m%d_%H%M%S").ok());
            if let Some(stamp) = stamp {
                runs.push((path, stamp));
            }
        }

        // oldest first
        runs.sort_by_key(|(_, stamp)| *stamp);

        let (expired, mut kept): (Vec<_>, Vec<_>) =
            runs.into_iter().partition(|(_, stamp)| *stamp < cutoff);
        for (path, _) in expired {
            if let Err(e) = std::fs::remove_dir_all(&path) {
                eprintln!("Warning: Failed to remove old log directory {}: {}", path.display(), e);
            }
        }

        if kept.len() > retention_runs {
            let excess = kept.len() - retention_runs;
            for (path, _) in kept.drain(..excess) {
                if let Err(e) = std::fs::remove_dir_all(&path) {
                    eprintln!("Warning: Failed to remove old log directory {}: {}", path.display(), e);
                }
            }
        }

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cleanup_keeps_newest_runs() {
            let dir = tempfile::tempdir().unwrap();
            let now = Utc::now();
            for offset in 0..4 {
                let stamp = (now - chrono::Duration::seconds(offset)).format("%Y%m%d_%H%M%S");
                std::fs::create_dir_all(dir.path().join(format!("run_{}", stamp))).unwrap();
            }
            std::fs::create_dir_all(dir.path().join("not_a_run")).unwrap();

            cleanup_old_logs(dir.path(), 30, 2).unwrap();

            let remaining = std::fs::read_dir(dir.path())
                .unwrap()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_name().to_string_lossy().starts_with("run_"))
                .count();
            assert_eq!(remaining, 2);
            assert!(dir.path().join("not_a_run").exists());
        }
    }
}
