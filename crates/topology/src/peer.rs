use rustc_hash::FxHashSet;

/// Peer category tag carrying kind-specific payload.
///
/// Host peers know the machine identities that count as "being" them; drive
/// peers have no extra payload because they are always local to the invoking
/// node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PeerKind {
    /// A networked machine, possibly reachable over SSH.
    Host {
        /// Machine identities (e.g. kernel hostnames) equivalent to the
        /// peer's canonical name for locality checks.
        node_aliases: FxHashSet<String>,
    },
    /// Locally mountable storage, e.g. a removable drive.
    Drive,
}

impl PeerKind {
    /// Returns `true` for host peers.
    #[must_use]
    pub const fn is_host(&self) -> bool {
        matches!(self, Self::Host { .. })
    }

    /// Returns `true` for drive peers.
    #[must_use]
    pub const fn is_drive(&self) -> bool {
        matches!(self, Self::Drive)
    }

    /// Human-readable kind label used in diagnostics and config keys.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Host { .. } => "host",
            Self::Drive => "drive",
        }
    }
}

/// One named node of the sync network.
///
/// Built once from configuration and immutable afterwards. Equality covers
/// the full configured state, which keeps fixture assertions cheap in tests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Peer {
    name: String,
    aliases: FxHashSet<String>,
    kind: PeerKind,
}

impl Peer {
    /// Creates a host peer with configuration aliases and node aliases.
    #[must_use]
    pub fn host(name: impl Into<String>, aliases: Vec<String>, node_aliases: Vec<String>) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.into_iter().collect(),
            kind: PeerKind::Host {
                node_aliases: node_aliases.into_iter().collect(),
            },
        }
    }

    /// Creates a drive peer with configuration aliases.
    #[must_use]
    pub fn drive(name: impl Into<String>, aliases: Vec<String>) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.into_iter().collect(),
            kind: PeerKind::Drive,
        }
    }

    /// Canonical peer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind tag with kind-specific payload.
    #[must_use]
    pub const fn kind(&self) -> &PeerKind {
        &self.kind
    }

    /// Configured alternate names for this peer.
    #[must_use]
    pub const fn aliases(&self) -> &FxHashSet<String> {
        &self.aliases
    }

    /// Whether `identity` names this peer's own machine.
    ///
    /// The recognized set is the canonical name plus, for hosts, the node
    /// aliases. Configuration aliases are alternate *spellings* in config
    /// files and deliberately do not count as machine identity.
    #[must_use]
    pub fn recognizes(&self, identity: &str) -> bool {
        if self.name == identity {
            return true;
        }
        match &self.kind {
            PeerKind::Host { node_aliases } => node_aliases.contains(identity),
            PeerKind::Drive => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Peer, PeerKind};

    #[test]
    fn host_recognizes_name_and_node_aliases() {
        let peer = Peer::host(
            "basalt",
            vec!["slab".into()],
            vec!["basalt.lan".into(), "basalt-wifi".into()],
        );

        assert!(peer.recognizes("basalt"));
        assert!(peer.recognizes("basalt.lan"));
        assert!(peer.recognizes("basalt-wifi"));
    }

    #[test]
    fn config_aliases_are_not_machine_identity() {
        let peer = Peer::host("basalt", vec!["slab".into()], vec![]);

        assert!(peer.aliases().contains("slab"));
        assert!(!peer.recognizes("slab"));
    }

    #[test]
    fn drive_recognizes_only_its_name() {
        let peer = Peer::drive("flint", vec!["test-drive".into()]);

        assert!(peer.recognizes("flint"));
        assert!(!peer.recognizes("test-drive"));
        assert!(!peer.recognizes("basalt"));
    }

    #[test]
    fn kind_labels_match_config_vocabulary() {
        let host = Peer::host("h", vec![], vec![]);
        let drive = Peer::drive("d", vec![]);

        assert_eq!(host.kind().label(), "host");
        assert_eq!(drive.kind().label(), "drive");
        assert!(host.kind().is_host());
        assert!(drive.kind().is_drive());
        assert!(matches!(host.kind(), PeerKind::Host { .. }));
    }
}
