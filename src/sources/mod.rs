//! Package sources and implementation loading.
//!
//! Sources are responsible for mapping package names to their on-disk
//! descriptors; loaders turn a manifest-relative implementation
//! reference into a loadable handle. Both are injected into the
//! resolver so the resolution algorithm stays testable in isolation.

pub mod installed;
pub mod loader;
pub mod source;

pub use installed::InstalledSource;
pub use loader::{FsLoader, ImplementationHandle, ImplementationLoader};
pub use source::PackageSource;
