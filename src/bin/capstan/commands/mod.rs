//! Command implementations for the Capstan CLI.

pub mod completions;
pub mod executor;
pub mod generator;
pub mod projects;

use std::path::PathBuf;

use anyhow::Result;

use capstan::GlobalContext;

/// Find the workspace root from the current directory.
pub fn workspace_root(ctx: &GlobalContext) -> Result<PathBuf> {
    ctx.find_workspace_root().ok_or_else(|| {
        anyhow::anyhow!(
            "could not find workspace.json or angular.json in {} or any parent directory",
            ctx.cwd().display()
        )
    })
}
