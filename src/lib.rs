pub mod cli;
pub mod command;
pub mod config;
pub mod executor;
pub mod fs;
pub mod interpreter;
pub mod logging;
pub mod sandbox;
pub mod watcher;

pub use command::{CommandGrammar, CommandParser, Operation, ParseError, ParseErrorKind};
pub use config::Settings;
pub use executor::{ExecError, OperationExecutor, Outcome};
pub use fs::{FileSystemPort, LocalFs};
pub use interpreter::{Interpretation, Interpreter};
pub use logging::{LogSink, MemorySink, TracingSink};
pub use sandbox::{PathError, PathGuard, ResolvedPath};
pub use watcher::{ChangeEvent, ChangeLoop, CommandWatcher, CommandWatcherBuilder, WatchError};
