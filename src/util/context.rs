//! Global context for Capstan operations.
//!
//! Provides centralized access to the working directory and
//! workspace-configuration discovery.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::workspace::{WORKSPACE_CONFIG_ALIAS, WORKSPACE_CONFIG_NAME};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            verbose: false,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Find the workspace configuration file (`angular.json` or
    /// `workspace.json`) starting from cwd and searching upward.
    pub fn find_workspace_config(&self) -> Option<PathBuf> {
        let mut current = self.cwd.clone();
        loop {
            for name in [WORKSPACE_CONFIG_ALIAS, WORKSPACE_CONFIG_NAME] {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Find the workspace root (directory containing the configuration).
    pub fn find_workspace_root(&self) -> Option<PathBuf> {
        self.find_workspace_config()
            .and_then(|p| p.parent().map(Path::to_path_buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_workspace_config_in_cwd() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("workspace.json");
        std::fs::write(&config, "{ \"projects\": {} }").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        assert_eq!(ctx.find_workspace_config(), Some(config));
    }

    #[test]
    fn test_find_workspace_config_upward() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("angular.json");
        std::fs::write(&config, "{ \"projects\": {} }").unwrap();

        let nested = tmp.path().join("apps").join("app");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested).unwrap();
        assert_eq!(ctx.find_workspace_config(), Some(config));
        assert_eq!(ctx.find_workspace_root(), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_find_workspace_config_missing() {
        let tmp = TempDir::new().unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        assert_eq!(ctx.find_workspace_config(), None);
    }
}
