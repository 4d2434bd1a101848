use std::fmt;

use serde::Deserialize;

/// Named remote endpoint taken verbatim from the connection table.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct RemoteHost {
    /// Hostname or address the SSH transport dials.
    pub host: String,
    /// Login user on that host.
    pub user: String,
}

impl RemoteHost {
    /// Creates a remote endpoint descriptor.
    #[must_use]
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
        }
    }
}

impl fmt::Display for RemoteHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.host)
    }
}

/// Reachability of one peer relative to the invoking node.
///
/// Computed on demand by [`crate::Network::resolve_connection`]; never stored
/// as peer state because the answer depends on where the planner runs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Connection {
    /// The peer is the invoking node itself (or storage mounted on it).
    Local,
    /// The peer is reachable through the configured remote entry.
    Remote(RemoteHost),
    /// No route exists from the invoking node to this peer.
    Impossible,
}

impl Connection {
    /// Returns `true` when the peer is the invoking node.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    /// Returns `true` when no route exists.
    #[must_use]
    pub const fn is_impossible(&self) -> bool {
        matches!(self, Self::Impossible)
    }

    /// The remote endpoint, when one exists.
    #[must_use]
    pub const fn remote(&self) -> Option<&RemoteHost> {
        match self {
            Self::Remote(remote) => Some(remote),
            Self::Local | Self::Impossible => None,
        }
    }
}
