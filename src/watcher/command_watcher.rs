//! Binds a `notify` watcher on the command file to a [`ChangeLoop`].

use std::path::PathBuf;

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::executor::OperationExecutor;
use crate::fs::LocalFs;
use crate::interpreter::Interpreter;
use crate::logging::LogSink;
use crate::sandbox::{PathGuard, normalize_lexically};

use super::change_loop::{ChangeEvent, ChangeLoop};
use super::error::WatchError;

/// Watches one command file and executes what is written to it.
///
/// The parent directory is watched non-recursively so that editors which
/// save by replacing the file are still seen.
pub struct CommandWatcher<S> {
    change_loop: ChangeLoop<LocalFs, S>,
    event_rx: mpsc::Receiver<ChangeEvent>,
    watcher: notify::RecommendedWatcher,
    watch_dir: PathBuf,
}

impl<S: LogSink> CommandWatcher<S> {
    /// Start watching. Runs until the watch handle is torn down.
    pub async fn watch(self) -> Result<(), WatchError> {
        let CommandWatcher {
            change_loop,
            event_rx,
            mut watcher,
            watch_dir,
        } = self;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: watch_dir.clone(),
                reason: e.to_string(),
            })?;
        crate::debug_event!("watcher", "watching", "{}", watch_dir.display());

        // `watcher` owns the sender; keep it alive for the whole loop.
        let result = change_loop.run(event_rx).await;
        drop(watcher);
        result
    }
}

/// Builder for constructing a [`CommandWatcher`].
pub struct CommandWatcherBuilder {
    command_file: Option<PathBuf>,
    sandbox_root: Option<PathBuf>,
    settle_ms: u64,
    channel_capacity: usize,
}

impl CommandWatcherBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            command_file: None,
            sandbox_root: None,
            settle_ms: 100,
            channel_capacity: 64,
        }
    }

    /// Set the command file to watch.
    pub fn command_file(mut self, path: PathBuf) -> Self {
        self.command_file = Some(path);
        self
    }

    /// Set the sandbox root. Defaults to the current directory.
    pub fn sandbox_root(mut self, path: PathBuf) -> Self {
        self.sandbox_root = Some(path);
        self
    }

    /// Set the settle duration in milliseconds.
    pub fn settle_ms(mut self, ms: u64) -> Self {
        self.settle_ms = ms;
        self
    }

    /// Set the notification channel bound.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Build the watcher, reporting outcomes to `sink`.
    pub fn build<S: LogSink>(self, sink: S) -> Result<CommandWatcher<S>, WatchError> {
        let command_file = self.command_file.ok_or_else(|| WatchError::InitFailed {
            reason: "Command file is required".to_string(),
        })?;

        let guard = match self.sandbox_root {
            Some(root) => PathGuard::new(root),
            None => PathGuard::current_dir(),
        }
        .map_err(|e| WatchError::InitFailed {
            reason: format!("Cannot resolve sandbox root: {e}"),
        })?;

        let command_file = std::path::absolute(&command_file)
            .map(|path| normalize_lexically(&path))
            .map_err(|e| WatchError::PathWatchFailed {
                path: command_file.clone(),
                reason: e.to_string(),
            })?;

        let file_name = command_file
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| WatchError::InitFailed {
                reason: format!("{} is not a file path", command_file.display()),
            })?;
        let watch_dir = command_file
            .parent()
            .map(|dir| dir.to_path_buf())
            .ok_or_else(|| WatchError::InitFailed {
                reason: format!("{} has no parent directory", command_file.display()),
            })?;

        let (tx, rx) = mpsc::channel(self.channel_capacity);

        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let relevant = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
                    && event
                        .paths
                        .iter()
                        .any(|path| path.file_name() == Some(file_name.as_os_str()));
                if relevant {
                    // A full channel already guarantees a pending cycle.
                    let _ = tx.try_send(ChangeEvent);
                }
            }
            Err(e) => tracing::error!("[watcher] file watch error: {e}"),
        })?;

        crate::log_event!("watcher", "sandbox", "{}", guard.root().display());

        let executor = OperationExecutor::new(guard, LocalFs::new());
        let interpreter = Interpreter::new(executor, sink);

        Ok(CommandWatcher {
            change_loop: ChangeLoop::new(command_file, interpreter, self.settle_ms),
            event_rx: rx,
            watcher,
            watch_dir,
        })
    }
}

impl Default for CommandWatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
