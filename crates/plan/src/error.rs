use catalog::CatalogError;
use exec::SessionError;
use topology::TopologyError;

/// Everything that can stop a transfer from being planned.
///
/// All variants are detected before any transfer-tool invocation; execution
/// failures are the caller's to interpret from the command's own exit
/// status.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Peer lookup or mount resolution failed.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// Replica normalization, prefix, or working-set resolution failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// An endpoint has no route from the invoking node.
    #[error("peer `{peer}` is not reachable from `{node}`")]
    UnreachablePeer {
        /// The peer with no route.
        peer: String,
        /// The invoking node's identity.
        node: String,
    },
    /// Opening a session or expanding a path on one failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}
