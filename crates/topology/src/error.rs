use thiserror::Error;

/// Errors produced by topology construction and lookups.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TopologyError {
    /// The name is not a configured peer in either category.
    #[error("unknown peer '{name}'")]
    UnknownPeer {
        /// Name as given by the caller.
        name: String,
    },
    /// Two peers share a canonical name, or an alias shadows one.
    #[error("duplicate peer name '{name}'")]
    DuplicatePeer {
        /// The colliding name.
        name: String,
    },
    /// No mount convention is configured for a peer kind that needs one.
    #[error("no mount convention configured for {kind} peers")]
    MissingMountConvention {
        /// Kind label, `host` or `drive`.
        kind: &'static str,
    },
}
