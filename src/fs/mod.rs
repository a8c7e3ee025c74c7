//! File-system port consumed by the executor.
//!
//! The executor only ever talks to [`FileSystemPort`]; [`LocalFs`] is the
//! host adapter backed by `tokio::fs`.

mod local;
mod port;

pub use local::LocalFs;
pub use port::{DirEntry, EntryKind, FileStat, FileSystemPort};
