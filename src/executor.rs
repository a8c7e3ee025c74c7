//! Executes parsed operations against a [`FileSystemPort`].
//!
//! Every path is resolved through the [`PathGuard`] before any file-system
//! call, so a bad path aborts the whole operation with nothing touched.
//! Missing or already-present targets are warn-level no-ops per operation;
//! everything else the port reports becomes [`Outcome::Failed`].

use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::command::Operation;
use crate::fs::{EntryKind, FileSystemPort};
use crate::sandbox::{PathError, PathGuard, ResolvedPath};

/// Shown in place of the content of an empty file.
pub const EMPTY_FILE_PLACEHOLDER: &str = "<empty file>";

/// Appended to the read header when invalid UTF-8 was replaced for display.
pub const LOSSY_NOTE: &str = " (not valid UTF-8, invalid bytes shown as U+FFFD)";

/// Hard failures of an operation.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("{path} does not exist")]
    NotFound { path: PathBuf },

    #[error("{path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("could not {action} {path}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of executing one operation.
#[derive(Debug)]
pub enum Outcome {
    /// The action happened.
    Success(String),
    /// Warn-level no-op: target missing, already present, or a conflict.
    Skipped(String),
    /// The action failed.
    Failed(ExecError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

fn io_error(action: &'static str, path: &ResolvedPath) -> impl FnOnce(io::Error) -> ExecError {
    let path = path.as_path().to_path_buf();
    move |source| ExecError::Io {
        action,
        path,
        source,
    }
}

fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(time) => DateTime::<Local>::from(time).to_rfc3339(),
        None => "unavailable".to_string(),
    }
}

/// Maps operations to file-system actions inside one sandbox.
#[derive(Debug, Clone)]
pub struct OperationExecutor<F> {
    guard: PathGuard,
    fs: F,
}

impl<F: FileSystemPort> OperationExecutor<F> {
    pub fn new(guard: PathGuard, fs: F) -> Self {
        Self { guard, fs }
    }

    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Execute `op`. Never panics on file-system errors.
    pub async fn execute(&self, op: &Operation) -> Outcome {
        let result = match op {
            Operation::CreateFile { path } => self.create_file(path).await,
            Operation::DeleteFile { path } => self.delete_file(path).await,
            Operation::RenameFile { old_path, new_path } => {
                self.rename_file(old_path, new_path).await
            }
            Operation::AppendToFile { path, content } => self.append_to_file(path, content).await,
            Operation::ReadFile { path } => self.read_file(path).await,
            Operation::CopyFile {
                src_path,
                dest_path,
            } => self.copy_file(src_path, dest_path).await,
            Operation::ListDirectory { path } => self.list_directory(path).await,
            Operation::FileInfo { path } => self.file_info(path).await,
        };

        result.unwrap_or_else(Outcome::Failed)
    }

    async fn exists(&self, path: &ResolvedPath) -> Result<bool, ExecError> {
        self.fs
            .exists(path.as_path())
            .await
            .map_err(io_error("check", path))
    }

    /// Create the parent directories of `path`, staying inside the root.
    async fn ensure_parent(&self, path: &ResolvedPath) -> Result<(), ExecError> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        if !parent.starts_with(self.guard.root()) {
            return Ok(());
        }

        self.fs
            .create_dir_all(parent)
            .await
            .map_err(|source| ExecError::Io {
                action: "create directories for",
                path: parent.to_path_buf(),
                source,
            })
    }

    async fn create_file(&self, raw: &str) -> Result<Outcome, ExecError> {
        let path = self.guard.resolve(raw)?;

        if self.exists(&path).await? {
            return Ok(Outcome::Skipped(format!("file {raw} already exists")));
        }

        self.ensure_parent(&path).await?;
        match self.fs.create_empty(path.as_path()).await {
            Ok(()) => Ok(Outcome::Success(format!("created file {raw}"))),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Ok(Outcome::Skipped(format!("file {raw} already exists")))
            }
            Err(e) => Err(io_error("create", &path)(e)),
        }
    }

    async fn delete_file(&self, raw: &str) -> Result<Outcome, ExecError> {
        let path = self.guard.resolve(raw)?;

        if !self.exists(&path).await? {
            return Ok(Outcome::Skipped(format!("file {raw} does not exist")));
        }

        self.fs
            .remove_file(path.as_path())
            .await
            .map_err(io_error("delete", &path))?;
        Ok(Outcome::Success(format!("deleted file {raw}")))
    }

    async fn rename_file(&self, raw_old: &str, raw_new: &str) -> Result<Outcome, ExecError> {
        let old = self.guard.resolve(raw_old)?;
        let new = self.guard.resolve(raw_new)?;

        if !self.exists(&old).await? {
            return Ok(Outcome::Skipped(format!("file {raw_old} does not exist")));
        }
        if self.exists(&new).await? {
            return Ok(Outcome::Skipped(format!(
                "file {raw_new} already exists, not overwriting"
            )));
        }

        self.ensure_parent(&new).await?;
        self.fs
            .rename(old.as_path(), new.as_path())
            .await
            .map_err(io_error("rename", &old))?;
        Ok(Outcome::Success(format!("renamed {raw_old} to {raw_new}")))
    }

    async fn append_to_file(&self, raw: &str, content: &str) -> Result<Outcome, ExecError> {
        let path = self.guard.resolve(raw)?;

        self.ensure_parent(&path).await?;
        self.fs
            .append(path.as_path(), content.as_bytes())
            .await
            .map_err(io_error("append to", &path))?;
        Ok(Outcome::Success(format!(
            "appended {} bytes to {raw}",
            content.len()
        )))
    }

    async fn read_file(&self, raw: &str) -> Result<Outcome, ExecError> {
        let path = self.guard.resolve(raw)?;

        if !self.exists(&path).await? {
            return Ok(Outcome::Skipped(format!("file {raw} does not exist")));
        }

        let bytes = self
            .fs
            .read(path.as_path())
            .await
            .map_err(io_error("read", &path))?;
        let (content, note) = if bytes.is_empty() {
            (EMPTY_FILE_PLACEHOLDER.to_string(), "")
        } else {
            match String::from_utf8(bytes) {
                Ok(text) => (text, ""),
                Err(e) => (
                    String::from_utf8_lossy(e.as_bytes()).into_owned(),
                    LOSSY_NOTE,
                ),
            }
        };

        Ok(Outcome::Success(format!("contents of {raw}{note}:\n{content}")))
    }

    async fn copy_file(&self, raw_src: &str, raw_dest: &str) -> Result<Outcome, ExecError> {
        let src = self.guard.resolve(raw_src)?;
        let dest = self.guard.resolve(raw_dest)?;

        // Copying a file onto itself would truncate it before the read.
        if src == dest {
            return Ok(Outcome::Skipped(format!(
                "{raw_src} and {raw_dest} are the same file, not copying"
            )));
        }

        if !self.exists(&src).await? {
            return Ok(Outcome::Skipped(format!("file {raw_src} does not exist")));
        }

        self.ensure_parent(&dest).await?;
        let bytes = self
            .fs
            .copy(src.as_path(), dest.as_path())
            .await
            .map_err(io_error("copy", &src))?;
        Ok(Outcome::Success(format!(
            "copied {raw_src} to {raw_dest} ({bytes} bytes)"
        )))
    }

    async fn list_directory(&self, raw: &str) -> Result<Outcome, ExecError> {
        let path = self.guard.resolve(raw)?;

        let stat = match self.fs.stat(path.as_path()).await {
            Ok(stat) => stat,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ExecError::NotFound {
                    path: path.as_path().to_path_buf(),
                });
            }
            Err(e) => return Err(io_error("inspect", &path)(e)),
        };
        if stat.kind != EntryKind::Dir {
            return Err(ExecError::NotADirectory {
                path: path.as_path().to_path_buf(),
            });
        }

        let entries = self
            .fs
            .list(path.as_path())
            .await
            .map_err(io_error("list", &path))?;

        let mut message = format!("{raw} ({} entries):", entries.len());
        if entries.is_empty() {
            message.push_str("\n(empty directory)");
        }
        for entry in &entries {
            message.push_str(&format!("\n[{}] {}", entry.kind, entry.name));
        }

        Ok(Outcome::Success(message))
    }

    async fn file_info(&self, raw: &str) -> Result<Outcome, ExecError> {
        let path = self.guard.resolve(raw)?;

        if !self.exists(&path).await? {
            return Ok(Outcome::Skipped(format!("{raw} does not exist")));
        }

        let stat = self
            .fs
            .stat(path.as_path())
            .await
            .map_err(io_error("inspect", &path))?;
        let kind = match stat.kind {
            EntryKind::File => "file",
            EntryKind::Dir => "directory",
        };

        Ok(Outcome::Success(format!(
            "info for {raw}:\n  kind: {kind}\n  size: {} bytes\n  created: {}\n  modified: {}\n  accessed: {}",
            stat.size,
            format_time(stat.created),
            format_time(stat.modified),
            format_time(stat.accessed),
        )))
    }
}
