//! Parsed command intents.

use std::fmt;

/// A parsed operation. Path fields are raw and unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateFile { path: String },
    DeleteFile { path: String },
    RenameFile { old_path: String, new_path: String },
    /// `content` is kept byte for byte, surrounding whitespace included.
    AppendToFile { path: String, content: String },
    ReadFile { path: String },
    CopyFile { src_path: String, dest_path: String },
    ListDirectory { path: String },
    FileInfo { path: String },
}

impl Operation {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateFile { .. } => "create",
            Operation::DeleteFile { .. } => "delete",
            Operation::RenameFile { .. } => "rename",
            Operation::AppendToFile { .. } => "append",
            Operation::ReadFile { .. } => "read",
            Operation::CopyFile { .. } => "copy",
            Operation::ListDirectory { .. } => "list",
            Operation::FileInfo { .. } => "info",
        }
    }
}

/// Renders the operation back into command-file syntax.
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::CreateFile { path } => write!(f, "create a file {path}"),
            Operation::DeleteFile { path } => write!(f, "delete the file {path}"),
            Operation::RenameFile { old_path, new_path } => {
                write!(f, "rename the file {old_path} to {new_path}")
            }
            Operation::AppendToFile { path, content } => {
                write!(f, "add to the file {path} this content: {content}")
            }
            Operation::ReadFile { path } => write!(f, "read the file {path}"),
            Operation::CopyFile {
                src_path,
                dest_path,
            } => write!(f, "copy the file {src_path} to {dest_path}"),
            Operation::ListDirectory { path } => write!(f, "list the directory {path}"),
            Operation::FileInfo { path } => write!(f, "file info {path}"),
        }
    }
}
