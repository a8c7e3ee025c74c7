//! Abstract file-system actions.

use std::fmt;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => f.write_str("FILE"),
            EntryKind::Dir => f.write_str("DIR"),
        }
    }
}

/// An immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Metadata reported by `stat`.
///
/// Timestamps are `None` where the platform does not record them.
#[derive(Debug, Clone)]
pub struct FileStat {
    pub kind: EntryKind,
    pub size: u64,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
}

/// File-system primitives the executor is allowed to use.
#[async_trait]
pub trait FileSystemPort: Send + Sync {
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create an empty file, failing if it already exists.
    async fn create_empty(&self, path: &Path) -> io::Result<()>;

    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Append `bytes`, creating the file if needed.
    ///
    /// Must not return until every byte is written and flushed to the
    /// underlying file.
    async fn append(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Copy `from` over `to`, returning the number of bytes copied.
    async fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;

    async fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    async fn stat(&self, path: &Path) -> io::Result<FileStat>;
}
