use thiserror::Error;
use topology::TopologyError;

use crate::replica::ReplicaId;

/// Errors produced by catalog construction and resolution.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The spec names a peer the topology does not know.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// A bare peer spec was given and no default refinement is configured,
    /// neither per-peer nor per-kind.
    #[error("no default refinement for peer '{peer}'")]
    NoDefaultRefinement {
        /// Canonical peer name.
        peer: String,
    },
    /// No prefix entry matches the replica, exactly or by refinement default.
    #[error("no prefix configured for replica '{replica}'")]
    MissingPrefix {
        /// The fully-qualified replica.
        replica: ReplicaId,
    },
    /// A configured glob pattern failed to compile.
    #[error("invalid {role} pattern '{pattern}' for '{key}': {source}")]
    InvalidPattern {
        /// Table key the pattern was configured under.
        key: String,
        /// Pattern role, `include` or `exclude`.
        role: &'static str,
        /// The offending pattern text.
        pattern: String,
        /// Underlying glob compilation error.
        source: globset::Error,
    },
}
