//! Implementation loading - manifest references to loadable handles.
//!
//! Resolution never executes the referenced module; it produces a
//! handle the host's module loader can import and invoke.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// Export name every capability implementation lives under.
pub const DEFAULT_EXPORT: &str = "default";

/// A loadable module handle: where the code lives and what to import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementationHandle {
    /// Resolved path of the module file
    pub path: PathBuf,

    /// Export to invoke, always `default`
    pub export: String,
}

/// Turns a manifest-relative implementation reference into a handle.
pub trait ImplementationLoader {
    /// Resolve `reference` relative to a manifest directory.
    fn load(&self, dir: &Path, reference: &str) -> Result<ImplementationHandle>;
}

/// Loader resolving references against the filesystem.
///
/// References usually omit the extension; candidates are tried in the
/// host environment's order: as written, then with each known
/// extension, then as a directory with an index module.
#[derive(Debug, Clone)]
pub struct FsLoader {
    extensions: Vec<&'static str>,
}

impl FsLoader {
    pub fn new() -> Self {
        FsLoader {
            extensions: vec!["js", "cjs", "mjs"],
        }
    }

    fn candidates(&self, base: &Path) -> Vec<PathBuf> {
        let mut paths = vec![base.to_path_buf()];
        for ext in &self.extensions {
            paths.push(base.with_extension(ext));
        }
        for ext in &self.extensions {
            paths.push(base.join(format!("index.{ext}")));
        }
        paths
    }
}

impl Default for FsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImplementationLoader for FsLoader {
    fn load(&self, dir: &Path, reference: &str) -> Result<ImplementationHandle> {
        let base = dir.join(reference);

        for candidate in self.candidates(&base) {
            if candidate.is_file() {
                return Ok(ImplementationHandle {
                    path: candidate,
                    export: DEFAULT_EXPORT.to_string(),
                });
            }
        }

        bail!(
            "cannot resolve implementation `{}` relative to {}",
            reference,
            dir.display()
        );
    }
}
