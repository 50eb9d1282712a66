//! Generator resolution.
//!
//! Generators are addressed by collection and name. The collection is
//! either a direct manifest path (identifier ending in `.json`) or an
//! installed package. A name missing from a collection falls back to
//! the collection's `extends` parents: an ordered depth-first search
//! where the first parent to resolve wins and failing parents are
//! skipped. Local names always shadow inherited ones, since the chain
//! is only consulted after local lookup fails.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::anyhow;

use crate::core::manifest::{GeneratorsManifest, PackageDescriptor, MANIFEST_EXTENSION};
use crate::resolver::{CapabilityResolver, ResolveError, ResolvedCapability};

impl CapabilityResolver {
    /// Resolve a generator to its schema and implementation.
    ///
    /// Any failure along the way surfaces as a single
    /// [`ResolveError::UnresolvableGenerator`] with the original
    /// failure preserved in its detail.
    pub fn resolve_generator(
        &self,
        collection: &str,
        name: &str,
    ) -> Result<ResolvedCapability, ResolveError> {
        let mut visited = HashSet::new();
        self.generator_capability(collection, name, &mut visited)
            .map_err(|cause| ResolveError::UnresolvableGenerator {
                collection: collection.to_string(),
                name: name.to_string(),
                detail: format!("{cause:#}"),
            })
    }

    /// Whether a generator's schema opts into the nx execution protocol.
    ///
    /// Uses the same resolution as [`resolve_generator`]; resolution
    /// failures propagate unchanged.
    ///
    /// [`resolve_generator`]: CapabilityResolver::resolve_generator
    pub fn is_nx_generator(&self, collection: &str, name: &str) -> Result<bool, ResolveError> {
        let resolved = self.resolve_generator(collection, name)?;
        Ok(super::is_nx_schema(&resolved.schema))
    }

    fn generator_capability(
        &self,
        collection: &str,
        name: &str,
        visited: &mut HashSet<String>,
    ) -> anyhow::Result<ResolvedCapability> {
        visited.insert(collection.to_string());

        let manifest = self.generators_manifest(collection)?;

        if let Some((canonical, entry)) = manifest.find(name) {
            let implementation = entry
                .implementation_ref()
                .ok_or_else(|| anyhow!("generator `{canonical}` declares no implementation"))?;

            // Schema and implementation resolve relative to the manifest
            // that defined the entry, which for inherited generators is
            // the ancestor's directory.
            return self.materialize(manifest.dir(), entry.schema.as_deref(), implementation);
        }

        for parent in manifest.extends() {
            if visited.contains(parent) {
                tracing::debug!(
                    "skipping `{}`: already searched in this resolution",
                    parent
                );
                continue;
            }

            match self.generator_capability(parent, name, visited) {
                Ok(resolved) => return Ok(resolved),
                Err(cause) => {
                    tracing::debug!("collection `{}` did not provide `{}`: {:#}", parent, name, cause);
                }
            }
        }

        Err(ResolveError::GeneratorNotFound {
            name: name.to_string(),
            manifest: manifest.path().to_path_buf(),
        }
        .into())
    }

    /// Locate and load the generators manifest for a collection.
    ///
    /// An identifier ending in the manifest extension is a direct file
    /// path; anything else names an installed package whose descriptor
    /// declares the manifest location.
    fn generators_manifest(&self, collection: &str) -> anyhow::Result<GeneratorsManifest> {
        let path = if collection.ends_with(MANIFEST_EXTENSION) {
            PathBuf::from(collection)
        } else {
            let descriptor_path = self.locate_descriptor(collection)?;
            let descriptor = PackageDescriptor::load(&descriptor_path)?;
            let manifest_rel = descriptor
                .generators_manifest()
                .ok_or_else(|| anyhow!("package `{collection}` declares no generators manifest"))?;

            descriptor_path
                .parent()
                .unwrap_or(Path::new("."))
                .join(manifest_rel)
        };

        Ok(GeneratorsManifest::load(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Install a generator collection package whose manifest body is
    /// given verbatim.
    fn install_collection(root: &Path, name: &str, manifest: &str) -> PathBuf {
        let pkg = root.join("node_modules").join(name);
        std::fs::create_dir_all(&pkg).unwrap();

        std::fs::write(
            pkg.join("package.json"),
            format!(r#"{{ "name": "{name}", "version": "1.0.0", "generators": "./collection.json" }}"#),
        )
        .unwrap();
        std::fs::write(pkg.join("collection.json"), manifest).unwrap();

        pkg
    }

    fn install_generator_files(pkg: &Path, stem: &str, cli: Option<&str>) {
        let schema = match cli {
            Some(cli) => format!(r#"{{ "cli": "{cli}", "properties": {{}} }}"#),
            None => r#"{ "properties": {} }"#.to_string(),
        };
        std::fs::write(pkg.join(format!("{stem}.json")), schema).unwrap();
        std::fs::write(
            pkg.join(format!("{stem}.js")),
            "module.exports.default = () => {};",
        )
        .unwrap();
    }

    const BASE: &str = r#"{
        "generators": {
            "library": {
                "implementation": "./library",
                "schema": "./library.json",
                "aliases": ["lib", "l"]
            }
        }
    }"#;

    #[test]
    fn test_resolve_by_name_and_aliases() {
        let tmp = TempDir::new().unwrap();
        let pkg = install_collection(tmp.path(), "base", BASE);
        install_generator_files(&pkg, "library", Some("nx"));

        let resolver = CapabilityResolver::for_root(tmp.path());

        let by_name = resolver.resolve_generator("base", "library").unwrap();
        for alias in ["lib", "l"] {
            let by_alias = resolver.resolve_generator("base", alias).unwrap();
            assert_eq!(by_alias.schema, by_name.schema);
            assert_eq!(by_alias.implementation, by_name.implementation);
        }
    }

    #[test]
    fn test_resolve_direct_manifest_path() {
        let tmp = TempDir::new().unwrap();
        let pkg = install_collection(tmp.path(), "base", BASE);
        install_generator_files(&pkg, "library", Some("nx"));

        let resolver = CapabilityResolver::for_root(tmp.path());
        let direct = pkg.join("collection.json");
        let resolved = resolver
            .resolve_generator(direct.to_str().unwrap(), "library")
            .unwrap();

        assert_eq!(resolved.implementation.path, pkg.join("library.js"));
    }

    #[test]
    fn test_factory_synonym_resolves() {
        let tmp = TempDir::new().unwrap();
        let pkg = install_collection(
            tmp.path(),
            "legacy",
            r#"{
                "schematics": {
                    "component": { "factory": "./component", "schema": "./component.json" }
                }
            }"#,
        );
        install_generator_files(&pkg, "component", None);

        let resolver = CapabilityResolver::for_root(tmp.path());
        assert!(resolver.resolve_generator("legacy", "component").is_ok());
        assert!(!resolver.is_nx_generator("legacy", "component").unwrap());
    }

    #[test]
    fn test_extends_first_parent_wins() {
        let tmp = TempDir::new().unwrap();

        let p1 = install_collection(
            tmp.path(),
            "p1",
            r#"{ "generators": { "shared": { "implementation": "./shared", "schema": "./shared.json" } } }"#,
        );
        install_generator_files(&p1, "shared", Some("nx"));

        let p2 = install_collection(
            tmp.path(),
            "p2",
            r#"{ "generators": { "shared": { "implementation": "./shared", "schema": "./shared.json" } } }"#,
        );
        install_generator_files(&p2, "shared", Some("nx"));

        install_collection(
            tmp.path(),
            "child",
            r#"{ "generators": {}, "extends": ["p1", "p2"] }"#,
        );

        let resolver = CapabilityResolver::for_root(tmp.path());
        let resolved = resolver.resolve_generator("child", "shared").unwrap();

        // Inherited entries keep the ancestor's relative paths.
        assert_eq!(resolved.implementation.path, p1.join("shared.js"));
    }

    #[test]
    fn test_extends_skips_failing_parent() {
        let tmp = TempDir::new().unwrap();

        let p2 = install_collection(
            tmp.path(),
            "p2",
            r#"{ "generators": { "shared": { "implementation": "./shared", "schema": "./shared.json" } } }"#,
        );
        install_generator_files(&p2, "shared", Some("nx"));

        // "p1" is not installed at all; the chain moves on to "p2".
        install_collection(
            tmp.path(),
            "child",
            r#"{ "generators": {}, "extends": ["p1", "p2"] }"#,
        );

        let resolver = CapabilityResolver::for_root(tmp.path());
        let resolved = resolver.resolve_generator("child", "shared").unwrap();
        assert_eq!(resolved.implementation.path, p2.join("shared.js"));
    }

    #[test]
    fn test_local_name_shadows_inherited() {
        let tmp = TempDir::new().unwrap();

        let parent = install_collection(
            tmp.path(),
            "parent",
            r#"{ "generators": { "library": { "implementation": "./library", "schema": "./library.json" } } }"#,
        );
        install_generator_files(&parent, "library", Some("nx"));

        let child = install_collection(
            tmp.path(),
            "child",
            r#"{
                "generators": { "library": { "implementation": "./local", "schema": "./local.json" } },
                "extends": ["parent"]
            }"#,
        );
        install_generator_files(&child, "local", Some("nx"));

        let resolver = CapabilityResolver::for_root(tmp.path());
        let resolved = resolver.resolve_generator("child", "library").unwrap();
        assert_eq!(resolved.implementation.path, child.join("local.js"));
    }

    #[test]
    fn test_empty_extends_is_unresolvable() {
        let tmp = TempDir::new().unwrap();
        install_collection(tmp.path(), "base", r#"{ "generators": {}, "extends": [] }"#);

        let resolver = CapabilityResolver::for_root(tmp.path());
        let err = resolver.resolve_generator("base", "foo").unwrap_err();

        match err {
            ResolveError::UnresolvableGenerator {
                collection,
                name,
                detail,
            } => {
                assert_eq!(collection, "base");
                assert_eq!(name, "foo");
                assert!(detail.contains("cannot find generator 'foo'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cyclic_extends_terminates() {
        let tmp = TempDir::new().unwrap();
        install_collection(
            tmp.path(),
            "a",
            r#"{ "generators": {}, "extends": ["b"] }"#,
        );
        install_collection(
            tmp.path(),
            "b",
            r#"{ "generators": {}, "extends": ["a"] }"#,
        );

        let resolver = CapabilityResolver::for_root(tmp.path());
        let err = resolver.resolve_generator("a", "foo").unwrap_err();
        assert!(matches!(err, ResolveError::UnresolvableGenerator { .. }));
    }

    #[test]
    fn test_cycle_does_not_mask_reachable_parent() {
        let tmp = TempDir::new().unwrap();

        // "a" extends ["b", "c"]; "b" cycles back to "a"; "c" provides it.
        install_collection(tmp.path(), "a", r#"{ "generators": {}, "extends": ["b", "c"] }"#);
        install_collection(tmp.path(), "b", r#"{ "generators": {}, "extends": ["a"] }"#);
        let c = install_collection(
            tmp.path(),
            "c",
            r#"{ "generators": { "widget": { "implementation": "./widget", "schema": "./widget.json" } } }"#,
        );
        install_generator_files(&c, "widget", Some("nx"));

        let resolver = CapabilityResolver::for_root(tmp.path());
        let resolved = resolver.resolve_generator("a", "widget").unwrap();
        assert_eq!(resolved.implementation.path, c.join("widget.js"));
    }

    #[test]
    fn test_is_nx_generator_propagates_failure() {
        let tmp = TempDir::new().unwrap();
        let resolver = CapabilityResolver::for_root(tmp.path());
        assert!(resolver.is_nx_generator("ghost", "foo").is_err());
    }
}
