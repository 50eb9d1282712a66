//! Capability resolution.
//!
//! Resolves the executor and generator identifiers a workspace declares
//! into their parsed schema plus an implementation handle. Package
//! location and implementation loading are injected collaborators, so
//! each resolution call is self-contained: no caching, every call
//! re-reads its manifests from disk.

pub mod errors;
pub mod executor;
pub mod generator;

pub use errors::ResolveError;

use std::path::Path;

use anyhow::anyhow;
use serde_json::Value;

use crate::sources::{FsLoader, ImplementationHandle, ImplementationLoader, InstalledSource, PackageSource};

/// Schema field carrying the execution-protocol marker.
pub const NX_SCHEMA_FIELD: &str = "cli";

/// Sentinel value opting a capability into the nx protocol.
pub const NX_SCHEMA_VALUE: &str = "nx";

/// Whether a capability schema opts into the nx execution protocol.
///
/// Trivial, but the single home of the field-name/sentinel convention:
/// every call site depends on these exact strings.
pub fn is_nx_schema(schema: &Value) -> bool {
    schema.get(NX_SCHEMA_FIELD).and_then(Value::as_str) == Some(NX_SCHEMA_VALUE)
}

/// The terminal result of resolution.
///
/// Constructed fresh per call; never cached; owned by the caller.
#[derive(Debug, Clone)]
pub struct ResolvedCapability {
    /// The parsed options schema
    pub schema: Value,

    /// Handle to the implementation module
    pub implementation: ImplementationHandle,
}

/// Resolves capability identifiers against installed packages.
pub struct CapabilityResolver {
    source: Box<dyn PackageSource>,
    loader: Box<dyn ImplementationLoader>,
}

impl CapabilityResolver {
    /// Create a resolver with explicit collaborators.
    pub fn new(source: Box<dyn PackageSource>, loader: Box<dyn ImplementationLoader>) -> Self {
        CapabilityResolver { source, loader }
    }

    /// Create a resolver for packages installed under a workspace root.
    pub fn for_root(root: &Path) -> Self {
        Self::new(
            Box::new(InstalledSource::new(root)),
            Box::new(FsLoader::new()),
        )
    }

    /// Locate the package descriptor for a package name.
    fn locate_descriptor(&self, package: &str) -> anyhow::Result<std::path::PathBuf> {
        tracing::debug!("locating `{}` via {} source", package, self.source.name());
        Ok(self.source.locate(package)?)
    }

    /// Turn a matched manifest entry into a `ResolvedCapability`.
    ///
    /// Both paths resolve relative to the directory of the manifest the
    /// entry was found in, which for inherited generators is the
    /// ancestor's directory.
    fn materialize(
        &self,
        dir: &Path,
        schema: Option<&str>,
        implementation: &str,
    ) -> anyhow::Result<ResolvedCapability> {
        let schema_rel = schema.ok_or_else(|| anyhow!("entry declares no schema"))?;
        let schema_path = dir.join(schema_rel);
        let schema = crate::core::manifest::read_json(&schema_path)?;

        let implementation = self.loader.load(dir, implementation)?;

        Ok(ResolvedCapability {
            schema,
            implementation,
        })
    }
}
