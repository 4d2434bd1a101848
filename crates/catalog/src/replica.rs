use std::fmt;

use crate::working_set::WorkingSet;

/// Fully-qualified replica identifier, `peer/refinement`.
///
/// The peer component is always a canonical peer name; alias spellings are
/// collapsed during [`crate::Catalog::normalize`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ReplicaId {
    peer: String,
    refinement: String,
}

impl ReplicaId {
    /// Creates an identifier from already-normalized parts.
    #[must_use]
    pub fn new(peer: impl Into<String>, refinement: impl Into<String>) -> Self {
        Self {
            peer: peer.into(),
            refinement: refinement.into(),
        }
    }

    /// Canonical peer name.
    #[must_use]
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Refinement distinguishing replicas on the same peer.
    #[must_use]
    pub fn refinement(&self) -> &str {
        &self.refinement
    }
}

impl fmt::Display for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.peer, self.refinement)
    }
}

/// One resolved replica: identifier, path prefix, and working set.
///
/// The prefix may contain environment tokens (`$HOME`, `$USER`); they are
/// expanded by the executing side's session at plan time, never here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Replica {
    id: ReplicaId,
    prefix: String,
    working_set: WorkingSet,
}

impl Replica {
    pub(crate) fn new(id: ReplicaId, prefix: String, working_set: WorkingSet) -> Self {
        Self {
            id,
            prefix,
            working_set,
        }
    }

    /// The replica's identifier.
    #[must_use]
    pub const fn id(&self) -> &ReplicaId {
        &self.id
    }

    /// Configured path prefix, unexpanded.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Include/exclude filters for this replica's contents.
    #[must_use]
    pub const fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }
}
