//! Change detection for the command file.
//!
//! # Architecture
//!
//! ```text
//! notify::RecommendedWatcher (parent dir of the command file)
//!         |  ChangeEvent (bounded channel, overflow dropped)
//!         v
//! ChangeLoop
//!   - Debouncer (settle period)
//!   - WatchState (Idle/Processing, last executed snapshot)
//!         |  snapshot text
//!         v
//! Interpreter -> CommandParser -> OperationExecutor -> LogSink
//! ```

mod change_loop;
mod command_watcher;
mod debouncer;
mod error;
mod state;

pub use change_loop::{ChangeEvent, ChangeLoop, CycleResult};
pub use command_watcher::{CommandWatcher, CommandWatcherBuilder};
pub use debouncer::Debouncer;
pub use error::WatchError;
pub use state::Phase;
