//! Workspace configuration parsing and schema.
//!
//! The workspace file is the central configuration of an Nx-style
//! monorepo. Supports both `workspace.json` (canonical) and
//! `angular.json` (checked first, for backward compatibility), and
//! normalizes the legacy `architect`/`builder`/`schematics` vocabulary
//! to `targets`/`executor`/`generators` on read.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical workspace configuration file name.
pub const WORKSPACE_CONFIG_NAME: &str = "workspace.json";

/// Legacy configuration file name, takes precedence when present.
pub const WORKSPACE_CONFIG_ALIAS: &str = "angular.json";

/// Determine which configuration file name a workspace root uses.
///
/// `angular.json` wins over `workspace.json` when both exist (fixed
/// check order, first match wins).
pub fn workspace_config_name(root: &Path) -> &'static str {
    if root.join(WORKSPACE_CONFIG_ALIAS).exists() {
        WORKSPACE_CONFIG_ALIAS
    } else {
        WORKSPACE_CONFIG_NAME
    }
}

/// Per-collection generator defaults: collection name -> generator name -> options.
pub type GeneratorDefaults = IndexMap<String, IndexMap<String, Value>>;

/// The parsed workspace configuration.
///
/// Constructed only through normalization, so no legacy field names
/// survive construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDefinition {
    /// All projects in the workspace, keyed by name
    pub projects: IndexMap<String, ProjectDefinition>,

    /// Project used when none is specified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,

    /// Workspace-level generator defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generators: Option<GeneratorDefaults>,

    /// CLI settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cli: Option<CliConfig>,
}

/// Settings under the workspace `cli` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Collection consulted when a generator is named without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_collection: Option<String>,
}

/// A single project within the workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDefinition {
    /// Project root path, relative to the workspace root
    pub root: String,

    /// Named targets, keyed by target name
    pub targets: IndexMap<String, TargetDefinition>,

    /// Project-level generator defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generators: Option<GeneratorDefaults>,

    /// Selector/import prefix for generated code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Source root, when it differs from `root`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
}

/// A named, executable unit of work within a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDefinition {
    /// Executor identifier of the form `<module>:<name>`
    pub executor: String,

    /// Default options, validated later against the executor's schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,

    /// Output paths produced by this target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,

    /// Named option overrides (e.g. `production`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<IndexMap<String, Value>>,
}

/// Raw workspace as deserialized from JSON, legacy fields included.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWorkspace {
    #[serde(default)]
    projects: IndexMap<String, RawProject>,

    #[serde(default)]
    default_project: Option<String>,

    #[serde(default)]
    generators: Option<GeneratorDefaults>,

    #[serde(default)]
    schematics: Option<GeneratorDefaults>,

    #[serde(default)]
    cli: Option<CliConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    root: String,

    #[serde(default)]
    targets: Option<IndexMap<String, RawTarget>>,

    #[serde(default)]
    architect: Option<IndexMap<String, RawTarget>>,

    #[serde(default)]
    generators: Option<GeneratorDefaults>,

    #[serde(default)]
    schematics: Option<GeneratorDefaults>,

    #[serde(default)]
    prefix: Option<String>,

    #[serde(default)]
    source_root: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTarget {
    #[serde(default)]
    executor: Option<String>,

    #[serde(default)]
    builder: Option<String>,

    #[serde(default)]
    options: Option<Value>,

    #[serde(default)]
    outputs: Option<Vec<String>>,

    #[serde(default)]
    configurations: Option<IndexMap<String, Value>>,
}

impl RawWorkspace {
    /// Build the canonical definition, rewriting legacy field names.
    ///
    /// Each rewrite applies only when the current name is absent, so a
    /// file that carries both keeps the current one.
    fn normalize(self) -> Result<WorkspaceDefinition> {
        let mut projects = IndexMap::with_capacity(self.projects.len());

        for (project_name, project) in self.projects {
            let raw_targets = project
                .targets
                .or(project.architect)
                .unwrap_or_default();

            let mut targets = IndexMap::with_capacity(raw_targets.len());
            for (target_name, target) in raw_targets {
                let executor = match target.executor.or(target.builder) {
                    Some(executor) => executor,
                    None => bail!(
                        "target `{}` of project `{}` declares neither `executor` nor `builder`",
                        target_name,
                        project_name
                    ),
                };

                targets.insert(
                    target_name,
                    TargetDefinition {
                        executor,
                        options: target.options,
                        outputs: target.outputs,
                        configurations: target.configurations,
                    },
                );
            }

            projects.insert(
                project_name,
                ProjectDefinition {
                    root: project.root,
                    targets,
                    generators: project.generators.or(project.schematics),
                    prefix: project.prefix,
                    source_root: project.source_root,
                },
            );
        }

        Ok(WorkspaceDefinition {
            projects,
            default_project: self.default_project,
            generators: self.generators.or(self.schematics),
            cli: self.cli,
        })
    }
}

/// Read and normalize the workspace configuration at a workspace root.
pub fn read_workspace_configuration(root: &Path) -> Result<WorkspaceDefinition> {
    let path = root.join(workspace_config_name(root));
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read workspace configuration: {}", path.display()))?;

    parse_workspace_configuration(&content, &path)
}

/// Parse workspace configuration content.
pub fn parse_workspace_configuration(content: &str, path: &Path) -> Result<WorkspaceDefinition> {
    let raw: RawWorkspace = serde_json::from_str(content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    raw.normalize()
        .with_context(|| format!("invalid workspace configuration: {}", path.display()))
}

/// A loaded workspace: its root directory and normalized definition.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    definition: WorkspaceDefinition,
}

impl Workspace {
    /// Load the workspace rooted at the given directory.
    pub fn load(root: &Path) -> Result<Self> {
        let definition = read_workspace_configuration(root)?;
        Ok(Workspace {
            root: root.to_path_buf(),
            definition,
        })
    }

    /// Get the workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the normalized definition.
    pub fn definition(&self) -> &WorkspaceDefinition {
        &self.definition
    }

    /// Path of the configuration file in use.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(workspace_config_name(&self.root))
    }

    /// Get a project by name.
    pub fn project(&self, name: &str) -> Option<&ProjectDefinition> {
        self.definition.projects.get(name)
    }

    /// Get a target of a project.
    pub fn target(&self, project: &str, target: &str) -> Option<&TargetDefinition> {
        self.project(project).and_then(|p| p.targets.get(target))
    }
}
