//! Package descriptors and capability manifests.
//!
//! Every installed package may ship an executors manifest and/or a
//! generators manifest; the package descriptor (`package.json`) declares
//! where they live. Manifests still using the legacy vocabulary
//! (`builders`, `schematics`, `factory`) are normalized on parse.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// File extension marking a collection identifier as a direct manifest path.
pub const MANIFEST_EXTENSION: &str = ".json";

/// Error locating, reading, or parsing a manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find package `{package}` in any module directory under {}", .root.display())]
    PackageNotFound { package: String, root: PathBuf },

    #[error("manifest not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and deserialize a JSON file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ManifestError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ManifestError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The slice of a package descriptor (`package.json`) Capstan cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDescriptor {
    /// Package name
    pub name: String,

    /// Package version, when declared
    #[serde(default)]
    pub version: Option<String>,

    /// Relative path to the executors manifest
    #[serde(default)]
    pub executors: Option<String>,

    /// Relative path to the generators manifest
    #[serde(default)]
    pub generators: Option<String>,

    /// Legacy name for the generators manifest location
    #[serde(default)]
    pub schematics: Option<String>,
}

impl PackageDescriptor {
    /// Load a package descriptor from a file path.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let descriptor: PackageDescriptor = read_json(path)?;
        tracing::debug!(
            "loaded descriptor for `{}`{} from {}",
            descriptor.name,
            descriptor
                .version
                .as_deref()
                .map(|v| format!("@{v}"))
                .unwrap_or_default(),
            path.display()
        );
        Ok(descriptor)
    }

    /// Relative path to the executors manifest, if declared.
    pub fn executors_manifest(&self) -> Option<&str> {
        self.executors.as_deref()
    }

    /// Relative path to the generators manifest, falling back to the
    /// legacy `schematics` field.
    pub fn generators_manifest(&self) -> Option<&str> {
        self.generators.as_deref().or(self.schematics.as_deref())
    }
}

/// One entry in an executors manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutorEntry {
    /// Module-relative path to the implementation
    pub implementation: String,

    /// Relative path to the options schema
    #[serde(default)]
    pub schema: Option<String>,
}

/// Raw executors manifest, legacy `builders` mapping included.
#[derive(Debug, Deserialize)]
struct RawExecutorsManifest {
    #[serde(default)]
    executors: Option<IndexMap<String, ExecutorEntry>>,

    #[serde(default)]
    builders: Option<IndexMap<String, ExecutorEntry>>,
}

/// A parsed executors manifest.
#[derive(Debug, Clone)]
pub struct ExecutorsManifest {
    /// The file this manifest was read from
    path: PathBuf,

    /// Entries, `executors` winning over `builders` per key
    entries: IndexMap<String, ExecutorEntry>,
}

impl ExecutorsManifest {
    /// Load an executors manifest from a file path.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let raw: RawExecutorsManifest = read_json(path)?;

        let mut entries = raw.executors.unwrap_or_default();
        for (name, entry) in raw.builders.unwrap_or_default() {
            entries.entry(name).or_insert(entry);
        }

        Ok(ExecutorsManifest {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// The file this manifest was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory schema and implementation paths resolve against.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// Look up an executor by name.
    pub fn entry(&self, name: &str) -> Option<&ExecutorEntry> {
        self.entries.get(name)
    }
}

/// One entry in a generators manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorEntry {
    /// Module-relative path to the implementation
    #[serde(default)]
    pub implementation: Option<String>,

    /// Legacy synonym for `implementation`
    #[serde(default)]
    pub factory: Option<String>,

    /// Relative path to the options schema
    #[serde(default)]
    pub schema: Option<String>,

    /// Alternate names this generator answers to
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl GeneratorEntry {
    /// The implementation reference, `factory` accepted when
    /// `implementation` is absent.
    pub fn implementation_ref(&self) -> Option<&str> {
        self.implementation.as_deref().or(self.factory.as_deref())
    }
}

/// Raw generators manifest, legacy `schematics` mapping included.
#[derive(Debug, Deserialize)]
struct RawGeneratorsManifest {
    #[serde(default)]
    generators: Option<IndexMap<String, GeneratorEntry>>,

    #[serde(default)]
    schematics: Option<IndexMap<String, GeneratorEntry>>,

    #[serde(default)]
    extends: Option<Vec<String>>,
}

/// A parsed generators manifest.
#[derive(Debug, Clone)]
pub struct GeneratorsManifest {
    /// The file this manifest was read from
    path: PathBuf,

    /// Entries, taken from `generators` when present, else `schematics`
    entries: IndexMap<String, GeneratorEntry>,

    /// Parent collections consulted when local lookup fails
    extends: Vec<String>,
}

impl GeneratorsManifest {
    /// Load a generators manifest from a file path.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let raw: RawGeneratorsManifest = read_json(path)?;

        Ok(GeneratorsManifest {
            path: path.to_path_buf(),
            entries: raw.generators.or(raw.schematics).unwrap_or_default(),
            extends: raw.extends.unwrap_or_default(),
        })
    }

    /// The file this manifest was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory schema and implementation paths resolve against.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// Parent collections, in declaration order.
    pub fn extends(&self) -> &[String] {
        &self.extends
    }

    /// Resolve a requested name to its canonical entry.
    ///
    /// An exact key match wins; otherwise the first entry (in manifest
    /// order) whose aliases contain the name is the match.
    pub fn find(&self, name: &str) -> Option<(&str, &GeneratorEntry)> {
        if let Some((key, entry)) = self.entries.get_key_value(name) {
            return Some((key, entry));
        }

        self.entries
            .iter()
            .find(|(_, entry)| entry.aliases.iter().any(|a| a == name))
            .map(|(key, entry)| (key.as_str(), entry))
    }

    /// Canonical entry name for a requested name, when one matches.
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        self.find(name).map(|(key, _)| key)
    }

    /// Look up an entry by its canonical name.
    pub fn entry(&self, name: &str) -> Option<&GeneratorEntry> {
        self.entries.get(name)
    }
}
