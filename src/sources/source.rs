//! PackageSource trait - common interface for package location.

use std::path::PathBuf;

use crate::core::manifest::ManifestError;

/// Maps a package name to its on-disk package descriptor.
pub trait PackageSource {
    /// Get the source name for display.
    fn name(&self) -> &str;

    /// Locate the package descriptor (`package.json`) for a package.
    fn locate(&self, package: &str) -> Result<PathBuf, ManifestError>;
}
