// File-based diagnostic logging.
// The TUI owns stdout/stderr, so tracing output goes to a file, and only
// when --debug is given.

use anyhow::Context;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where `--debug` writes its log
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("pingpong-debug.log")
}

/// Install the global subscriber. With `enabled = false` nothing is
/// installed and every tracing macro is a no-op.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init(enabled: bool) -> anyhow::Result<()> {
    if !enabled {
        return Ok(());
    }

    let path = log_path();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "debug logging initialized");
    Ok(())
}
