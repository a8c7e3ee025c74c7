//! The debounced, single-flight loop that turns change events into commands.

use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

use crate::fs::FileSystemPort;
use crate::interpreter::Interpreter;
use crate::logging::LogSink;

use super::debouncer::Debouncer;
use super::error::WatchError;
use super::state::{Phase, WatchState};

/// Minimum poll interval while waiting for events to settle.
const MIN_TICK: Duration = Duration::from_millis(10);

/// A change notification for the command file. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent;

/// What one cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleResult {
    /// A cycle was already running; the notification was dropped.
    Busy,
    /// The command file was empty or missing.
    Empty,
    /// Same content as the last executed command.
    Duplicate,
    /// The command could not be parsed.
    Rejected,
    /// The command was executed; see the sink for its outcome.
    Executed,
    /// The command file could not be read.
    Unreadable,
}

/// Reads the raw bytes of the command file as one snapshot.
///
/// A missing file is treated like an empty one: editors may remove and
/// recreate it on save.
async fn read_snapshot<F: FileSystemPort>(fs: &F, path: &Path) -> io::Result<Option<Vec<u8>>> {
    let stat = match fs.stat(path).await {
        Ok(stat) => stat,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    if stat.size == 0 {
        return Ok(None);
    }

    let bytes = match fs.read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(bytes))
}

/// Owns the watch state and runs cycles as notifications arrive.
///
/// Notifications that arrive while a cycle is running are dropped, not
/// queued: after each cycle the channel is drained.
pub struct ChangeLoop<F, S> {
    command_file: PathBuf,
    interpreter: Interpreter<F, S>,
    state: WatchState,
    debouncer: Debouncer,
}

impl<F: FileSystemPort, S: LogSink> ChangeLoop<F, S> {
    pub fn new(command_file: PathBuf, interpreter: Interpreter<F, S>, settle_ms: u64) -> Self {
        Self {
            command_file,
            interpreter,
            state: WatchState::new(),
            debouncer: Debouncer::new(settle_ms),
        }
    }

    pub fn command_file(&self) -> &Path {
        &self.command_file
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Raw bytes of the most recently executed command.
    pub fn last_command(&self) -> Option<&[u8]> {
        self.state.last_seen()
    }

    /// Run until the notification source closes.
    ///
    /// A notification still settling when the source closes is processed
    /// once before returning.
    pub async fn run(mut self, mut events: mpsc::Receiver<ChangeEvent>) -> Result<(), WatchError> {
        crate::log_event!("watcher", "started", "{}", self.command_file.display());

        let tick = self.debouncer.duration().max(MIN_TICK);

        loop {
            let timeout = sleep(tick);
            tokio::pin!(timeout);

            tokio::select! {
                event = events.recv() => {
                    match event {
                        Some(ChangeEvent) => self.debouncer.record(),
                        None => {
                            if self.debouncer.flush() {
                                self.on_change().await;
                            }
                            crate::log_event!("watcher", "stopped");
                            return Ok(());
                        }
                    }
                }

                _ = &mut timeout => {
                    if self.debouncer.take_ready() {
                        self.on_change().await;
                        let dropped = drain(&mut events);
                        if dropped > 0 {
                            crate::debug_event!(
                                "watcher",
                                "dropped",
                                "{dropped} notifications received while processing"
                            );
                        }
                    }
                }
            }
        }
    }

    /// Run one Idle -> Processing -> Idle cycle against the current content
    /// of the command file.
    pub async fn on_change(&mut self) -> CycleResult {
        let Some(mut cycle) = self.state.begin() else {
            crate::debug_event!("watcher", "busy, notification dropped");
            return CycleResult::Busy;
        };

        let fs = self.interpreter.executor().fs();
        let snapshot = match read_snapshot(fs, &self.command_file).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                crate::debug_event!("watcher", "command file empty");
                return CycleResult::Empty;
            }
            Err(source) => {
                let err = WatchError::SnapshotFailed {
                    path: self.command_file.clone(),
                    source,
                };
                self.interpreter
                    .sink()
                    .error("could not read command file", Some(&err));
                return CycleResult::Unreadable;
            }
        };

        if cycle.is_duplicate(&snapshot) {
            crate::debug_event!("watcher", "duplicate", "{} bytes", snapshot.len());
            return CycleResult::Duplicate;
        }

        let text = String::from_utf8_lossy(&snapshot).into_owned();
        cycle.accept(snapshot);

        if self.interpreter.interpret(&text).await.is_rejected() {
            CycleResult::Rejected
        } else {
            CycleResult::Executed
        }
    }
}

/// Discard every queued notification, returning how many were dropped.
fn drain(events: &mut mpsc::Receiver<ChangeEvent>) -> usize {
    let mut dropped = 0;
    while events.try_recv().is_ok() {
        dropped += 1;
    }
    dropped
}
