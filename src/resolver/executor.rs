//! Executor resolution.
//!
//! An executor identifier has the form `<module>:<executor>`: the
//! module names an installed package whose descriptor points at its
//! executors manifest, and the executor names an entry in that
//! manifest (`executors`, falling back to the legacy `builders`).

use std::path::Path;

use anyhow::anyhow;

use crate::core::manifest::{ExecutorsManifest, PackageDescriptor};
use crate::core::workspace::TargetDefinition;
use crate::resolver::{CapabilityResolver, ResolveError, ResolvedCapability};

/// Split a `<module>:<executor>` identifier into its two parts.
fn split_identifier(identifier: &str) -> Result<(&str, &str), ResolveError> {
    match identifier.split_once(':') {
        Some((module, executor))
            if !module.is_empty() && !executor.is_empty() && !executor.contains(':') =>
        {
            Ok((module, executor))
        }
        _ => Err(ResolveError::MalformedIdentifier {
            identifier: identifier.to_string(),
        }),
    }
}

impl CapabilityResolver {
    /// Resolve a target's executor to its schema and implementation.
    ///
    /// Any failure along the way surfaces as a single
    /// [`ResolveError::UnresolvableExecutor`] with the original failure
    /// preserved in its detail.
    pub fn resolve_executor(
        &self,
        target: &TargetDefinition,
    ) -> Result<ResolvedCapability, ResolveError> {
        self.resolve_executor_identifier(&target.executor)
    }

    /// Resolve an executor identifier directly.
    pub fn resolve_executor_identifier(
        &self,
        identifier: &str,
    ) -> Result<ResolvedCapability, ResolveError> {
        self.executor_capability(identifier)
            .map_err(|cause| ResolveError::UnresolvableExecutor {
                identifier: identifier.to_string(),
                detail: format!("{cause:#}"),
            })
    }

    /// Whether a target's executor opts into the nx execution protocol.
    ///
    /// Uses the same resolution as [`resolve_executor`]; resolution
    /// failures propagate unchanged.
    ///
    /// [`resolve_executor`]: CapabilityResolver::resolve_executor
    pub fn is_nx_executor(&self, target: &TargetDefinition) -> Result<bool, ResolveError> {
        let resolved = self.resolve_executor(target)?;
        Ok(super::is_nx_schema(&resolved.schema))
    }

    fn executor_capability(&self, identifier: &str) -> anyhow::Result<ResolvedCapability> {
        let (module, executor) = split_identifier(identifier)?;

        let descriptor_path = self.locate_descriptor(module)?;
        let descriptor = PackageDescriptor::load(&descriptor_path)?;
        let manifest_rel = descriptor
            .executors_manifest()
            .ok_or_else(|| anyhow!("package `{module}` declares no executors manifest"))?;

        let manifest_path = descriptor_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(manifest_rel);
        let manifest = ExecutorsManifest::load(&manifest_path)?;

        let entry = manifest
            .entry(executor)
            .ok_or_else(|| ResolveError::ExecutorNotFound {
                name: executor.to_string(),
                manifest: manifest.path().to_path_buf(),
            })?;

        self.materialize(manifest.dir(), entry.schema.as_deref(), &entry.implementation)
    }
}
