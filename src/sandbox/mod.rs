//! Sandbox boundary for every path a command touches.
//!
//! Raw path strings from the command file are resolved against the sandbox
//! root exactly once, at execution entry. A [`ResolvedPath`] can only be
//! obtained from [`PathGuard::resolve`], so holding one proves the path lies
//! inside the root.

mod error;
mod guard;

pub use error::PathError;
pub use guard::{PathGuard, ResolvedPath, normalize_lexically};
