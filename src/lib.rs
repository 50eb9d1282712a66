//! Capstan - executor and generator resolution for Nx-style workspaces
//!
//! This crate provides the core library functionality for Capstan,
//! including workspace configuration reading, manifest discovery, and
//! capability (executor/generator) resolution.

pub mod core;
pub mod resolver;
pub mod sources;
pub mod util;

pub use crate::core::{
    manifest::{ExecutorsManifest, GeneratorsManifest, PackageDescriptor},
    workspace::{ProjectDefinition, TargetDefinition, WorkspaceDefinition},
};

pub use crate::resolver::{CapabilityResolver, ResolvedCapability};
pub use crate::sources::{ImplementationHandle, InstalledSource};
pub use crate::util::context::GlobalContext;
