//! Watch command - run the change loop on the command file.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::Settings;
use crate::logging::TracingSink;
use crate::watcher::CommandWatcherBuilder;

/// Make sure the command file exists so its directory can be watched.
pub fn ensure_command_file(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {}", parent.display()))?;
    }
    std::fs::write(path, "")
        .with_context(|| format!("cannot create command file {}", path.display()))?;

    crate::log_event!("watcher", "created command file", "{}", path.display());
    Ok(())
}

/// Run watch command until interrupted.
pub async fn run_watch(
    settings: &Settings,
    file: Option<PathBuf>,
    root: Option<PathBuf>,
    settle_ms: Option<u64>,
) -> anyhow::Result<()> {
    let command_file = file.unwrap_or_else(|| settings.command_file.clone());
    let sandbox_root = match root {
        Some(root) => root,
        None => settings
            .sandbox_root()
            .context("cannot determine sandbox root")?,
    };

    ensure_command_file(&command_file)?;

    let watcher = CommandWatcherBuilder::new()
        .command_file(command_file.clone())
        .sandbox_root(sandbox_root)
        .settle_ms(settle_ms.unwrap_or(settings.watch.settle_ms))
        .channel_capacity(settings.watch.channel_capacity)
        .build(TracingSink)
        .context("cannot start watcher")?;

    tracing::info!(
        "Write a command into {} (Ctrl-C to stop)",
        command_file.display()
    );

    tokio::select! {
        result = watcher.watch() => result.context("watcher stopped")?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("cannot listen for Ctrl-C")?;
            crate::log_event!("watcher", "interrupted");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_command_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inbox").join("command.txt");

        ensure_command_file(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_ensure_command_file_keeps_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("command.txt");
        std::fs::write(&path, "read the file a.txt").unwrap();

        ensure_command_file(&path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "read the file a.txt"
        );
    }
}
