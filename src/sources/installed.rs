//! Installed source - packages under `node_modules` directories.

use std::path::{Path, PathBuf};

use crate::core::manifest::ManifestError;
use crate::sources::PackageSource;

/// Directory name searched for installed packages.
pub const MODULES_DIR: &str = "node_modules";

/// Descriptor file name within an installed package.
pub const DESCRIPTOR_NAME: &str = "package.json";

/// A source for packages installed under `node_modules`.
///
/// Searches the root directory and each of its ancestors, matching the
/// host environment's own lookup order. Scoped names (`@org/pkg`)
/// resolve through their nested directory layout.
#[derive(Debug, Clone)]
pub struct InstalledSource {
    /// Directory the search starts from
    root: PathBuf,
}

impl InstalledSource {
    /// Create a source rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        InstalledSource { root: root.into() }
    }

    /// The directory the search starts from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PackageSource for InstalledSource {
    fn name(&self) -> &str {
        "installed"
    }

    fn locate(&self, package: &str) -> Result<PathBuf, ManifestError> {
        let mut current = self.root.clone();
        loop {
            let candidate = current.join(MODULES_DIR).join(package).join(DESCRIPTOR_NAME);
            if candidate.is_file() {
                tracing::debug!("located `{}` at {}", package, candidate.display());
                return Ok(candidate);
            }

            if !current.pop() {
                return Err(ManifestError::PackageNotFound {
                    package: package.to_string(),
                    root: self.root.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install_package(root: &Path, name: &str) {
        let dir = root.join(MODULES_DIR).join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(DESCRIPTOR_NAME),
            format!(r#"{{ "name": "{name}", "version": "1.0.0" }}"#),
        )
        .unwrap();
    }

    #[test]
    fn test_locate_in_root() {
        let tmp = TempDir::new().unwrap();
        install_package(tmp.path(), "my-pkg");

        let source = InstalledSource::new(tmp.path());
        let path = source.locate("my-pkg").unwrap();
        assert!(path.ends_with("node_modules/my-pkg/package.json"));
    }

    #[test]
    fn test_locate_scoped_package() {
        let tmp = TempDir::new().unwrap();
        install_package(tmp.path(), "@org/plugin");

        let source = InstalledSource::new(tmp.path());
        let path = source.locate("@org/plugin").unwrap();
        assert!(path.ends_with("node_modules/@org/plugin/package.json"));
    }

    #[test]
    fn test_locate_walks_ancestors() {
        let tmp = TempDir::new().unwrap();
        install_package(tmp.path(), "hoisted");

        let nested = tmp.path().join("packages").join("app");
        std::fs::create_dir_all(&nested).unwrap();

        let source = InstalledSource::new(&nested);
        assert!(source.locate("hoisted").is_ok());
    }

    #[test]
    fn test_locate_missing_package() {
        let tmp = TempDir::new().unwrap();

        let source = InstalledSource::new(tmp.path());
        let result = source.locate("absent");
        assert!(matches!(result, Err(ManifestError::PackageNotFound { .. })));
    }
}
