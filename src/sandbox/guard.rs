//! Path resolution against a fixed sandbox root.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::PathError;

/// An absolute path known to lie within the sandbox root.
///
/// Only [`PathGuard::resolve`] constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Parent directory, if the path is not the filesystem root.
    pub fn parent(&self) -> Option<&Path> {
        self.0.parent()
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Resolves user-supplied path strings and rejects anything outside the root.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Create a guard rooted at `root`.
    ///
    /// A relative root is anchored at the process working directory.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref();
        let absolute = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()?.join(root)
        };

        Ok(Self {
            root: normalize_lexically(&absolute),
        })
    }

    /// Create a guard rooted at the process working directory.
    pub fn current_dir() -> std::io::Result<Self> {
        Self::new(std::env::current_dir()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `raw` to an absolute path inside the sandbox.
    ///
    /// Containment is checked component by component, so a sibling such as
    /// `/work-other` is rejected for the root `/work`. No I/O is performed
    /// and symlinks are not followed: a symlink inside the root that points
    /// outside it is resolved as an ordinary path under the root, so
    /// operations through it reach the link target.
    pub fn resolve(&self, raw: &str) -> Result<ResolvedPath, PathError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PathError::EmptyPath);
        }

        let candidate = normalize_lexically(&self.root.join(trimmed));
        if !candidate.starts_with(&self.root) {
            return Err(PathError::PathTraversal {
                path: candidate,
                root: self.root.clone(),
            });
        }

        Ok(ResolvedPath(candidate))
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the filesystem root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().collect()
}
