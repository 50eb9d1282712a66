//! Resolution error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error during capability resolution.
///
/// Only the two `Unresolvable*` kinds cross the resolver's public
/// boundary; the others feed the fallback search or end up as the
/// `detail` text of the wrapping error.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid executor identifier `{identifier}`, expected `<module>:<executor>`")]
    MalformedIdentifier { identifier: String },

    #[error("cannot find executor '{name}' in {}", .manifest.display())]
    ExecutorNotFound { name: String, manifest: PathBuf },

    #[error("cannot find generator '{name}' in {}", .manifest.display())]
    GeneratorNotFound { name: String, manifest: PathBuf },

    #[error("unable to resolve {identifier}.\n{detail}")]
    UnresolvableExecutor { identifier: String, detail: String },

    #[error("unable to resolve {collection}:{name}.\n{detail}")]
    UnresolvableGenerator {
        collection: String,
        name: String,
        detail: String,
    },
}
