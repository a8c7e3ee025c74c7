//! Run command - execute one command without watching.

use std::path::PathBuf;

use anyhow::Context;

use crate::config::Settings;
use crate::executor::OperationExecutor;
use crate::fs::LocalFs;
use crate::interpreter::Interpreter;
use crate::logging::TracingSink;
use crate::sandbox::PathGuard;

/// Parse and execute `text`. Returns whether it succeeded; warn-level
/// no-ops count as success.
pub async fn run_command(
    settings: &Settings,
    text: &[String],
    root: Option<PathBuf>,
) -> anyhow::Result<bool> {
    let sandbox_root = match root {
        Some(root) => root,
        None => settings
            .sandbox_root()
            .context("cannot determine sandbox root")?,
    };
    let guard = PathGuard::new(&sandbox_root)
        .with_context(|| format!("invalid sandbox root {}", sandbox_root.display()))?;

    let interpreter = Interpreter::new(OperationExecutor::new(guard, LocalFs::new()), TracingSink);
    let interpretation = interpreter.interpret(&text.join(" ")).await;

    Ok(interpretation.is_ok())
}
