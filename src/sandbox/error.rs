//! Error types for path resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from resolving a raw path against the sandbox root.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    EmptyPath,

    #[error("path {path} escapes the sandbox root {root}")]
    PathTraversal { path: PathBuf, root: PathBuf },
}
