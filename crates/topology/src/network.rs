use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::connection::{Connection, RemoteHost};
use crate::error::TopologyError;
use crate::mount::{MountConvention, MountConventions};
use crate::peer::{Peer, PeerKind};

/// The configured peer network, built once and queried read-only.
///
/// Peers live in a single arena; an index maps every canonical name *and*
/// every configuration alias to its arena slot, so all lookups accept either
/// spelling and collapse to the canonical peer.
#[derive(Clone, Debug)]
pub struct Network {
    peers: Vec<Peer>,
    index: FxHashMap<String, usize>,
    connections: FxHashMap<String, RemoteHost>,
    mounts: MountConventions,
}

impl Network {
    /// Builds the network from configured peers, connection entries keyed by
    /// canonical peer name, and the per-kind mount conventions.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicatePeer`] when a canonical name or
    /// alias collides with any other name or alias.
    pub fn new(
        peers: Vec<Peer>,
        connections: FxHashMap<String, RemoteHost>,
        mounts: MountConventions,
    ) -> Result<Self, TopologyError> {
        let mut index = FxHashMap::default();
        for (slot, peer) in peers.iter().enumerate() {
            if index.insert(peer.name().to_string(), slot).is_some() {
                return Err(TopologyError::DuplicatePeer {
                    name: peer.name().to_string(),
                });
            }
        }
        // Aliases are indexed after every canonical name so a collision is
        // always attributed to the alias, whichever order peers were given.
        for (slot, peer) in peers.iter().enumerate() {
            for alias in peer.aliases() {
                if index.insert(alias.clone(), slot).is_some() {
                    return Err(TopologyError::DuplicatePeer {
                        name: alias.clone(),
                    });
                }
            }
        }

        for name in connections.keys() {
            if !index.contains_key(name.as_str()) {
                warn!(
                    target: "oc_sync::topology",
                    peer = name.as_str(),
                    "connection entry for unconfigured peer is inert"
                );
            }
        }

        Ok(Self {
            peers,
            index,
            connections,
            mounts,
        })
    }

    /// Looks up a peer by canonical name or alias.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnknownPeer`] when the name is in neither
    /// category.
    pub fn peer(&self, name: &str) -> Result<&Peer, TopologyError> {
        self.index
            .get(name)
            .map(|&slot| &self.peers[slot])
            .ok_or_else(|| TopologyError::UnknownPeer {
                name: name.to_string(),
            })
    }

    /// Classifies a name into its peer kind.
    pub fn classify(&self, name: &str) -> Result<&PeerKind, TopologyError> {
        self.peer(name).map(Peer::kind)
    }

    /// Canonical name for a peer given either its name or an alias.
    pub fn canonical_name(&self, name: &str) -> Result<&str, TopologyError> {
        self.peer(name).map(Peer::name)
    }

    /// Configured aliases of a peer, sorted for stable output.
    ///
    /// Unknown names yield an empty list rather than an error; callers asking
    /// for aliases are rendering, not validating.
    #[must_use]
    pub fn aliases_of(&self, name: &str) -> Vec<&str> {
        let Ok(peer) = self.peer(name) else {
            return Vec::new();
        };
        let mut aliases: Vec<&str> = peer.aliases().iter().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }

    /// Resolves how `name` is reachable from the node identified by
    /// `invoking_node`.
    ///
    /// Drive peers are always [`Connection::Local`]. A host peer is local
    /// when the invoking identity is in its recognized set, remote when a
    /// connection entry exists for it, and [`Connection::Impossible`]
    /// otherwise. Pure table lookup; no network I/O happens here.
    pub fn resolve_connection(
        &self,
        name: &str,
        invoking_node: &str,
    ) -> Result<Connection, TopologyError> {
        let peer = self.peer(name)?;

        if peer.kind().is_drive() {
            debug!(
                target: "oc_sync::topology",
                peer = peer.name(),
                "drive peer resolves local"
            );
            return Ok(Connection::Local);
        }

        if peer.recognizes(invoking_node) {
            debug!(
                target: "oc_sync::topology",
                peer = peer.name(),
                node = invoking_node,
                "host peer is the invoking node"
            );
            return Ok(Connection::Local);
        }

        match self.connections.get(peer.name()) {
            Some(remote) => {
                debug!(
                    target: "oc_sync::topology",
                    peer = peer.name(),
                    remote = %remote,
                    "host peer reachable via connection entry"
                );
                Ok(Connection::Remote(remote.clone()))
            }
            None => {
                debug!(
                    target: "oc_sync::topology",
                    peer = peer.name(),
                    node = invoking_node,
                    "no route to host peer"
                );
                Ok(Connection::Impossible)
            }
        }
    }

    /// Mount prefix to prepend to the peer's replica prefixes, or `None`
    /// when replica prefixes are already absolute on the peer.
    ///
    /// Drive prefixes are the configured media root joined with the drive's
    /// own name, e.g. `/media/$USER/flint`. Environment tokens stay
    /// unexpanded; expansion happens on the executing side.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::MissingMountConvention`] when the peer's
    /// kind has no configured slot.
    pub fn mount_prefix(&self, name: &str) -> Result<Option<String>, TopologyError> {
        let peer = self.peer(name)?;
        let convention = self.mounts.for_kind(peer.kind()).ok_or(
            TopologyError::MissingMountConvention {
                kind: peer.kind().label(),
            },
        )?;

        match convention {
            MountConvention::Direct => Ok(None),
            MountConvention::Root(root) => Ok(Some(format!("{root}/{}", peer.name()))),
        }
    }
}
