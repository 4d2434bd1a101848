use crate::peer::PeerKind;

/// How replicas of one peer kind attach to a filesystem.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MountConvention {
    /// Replica prefixes are already absolute paths on the peer's own
    /// filesystem. Hosts are normally configured this way.
    Direct,
    /// Replica prefixes hang off `root/<peer name>`. Drives are normally
    /// configured with a media-mount root such as `/media/$USER`; the root
    /// may contain environment tokens expanded later on the executing side.
    Root(String),
}

/// Per-kind mount convention table.
///
/// A slot left `None` means the kind is unconfigured; resolving a peer of
/// that kind fails with [`crate::TopologyError::MissingMountConvention`]
/// rather than guessing a default.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MountConventions {
    host: Option<MountConvention>,
    drive: Option<MountConvention>,
}

impl MountConventions {
    /// Creates the table from per-kind slots.
    #[must_use]
    pub const fn new(host: Option<MountConvention>, drive: Option<MountConvention>) -> Self {
        Self { host, drive }
    }

    /// Convention for the given peer kind, if configured.
    #[must_use]
    pub const fn for_kind(&self, kind: &PeerKind) -> Option<&MountConvention> {
        match kind {
            PeerKind::Host { .. } => self.host.as_ref(),
            PeerKind::Drive => self.drive.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MountConvention, MountConventions};
    use crate::peer::Peer;

    #[test]
    fn slots_select_by_peer_kind() {
        let mounts = MountConventions::new(
            Some(MountConvention::Direct),
            Some(MountConvention::Root("/media/$USER".into())),
        );

        assert_eq!(
            mounts.for_kind(Peer::host("h", vec![], vec![]).kind()),
            Some(&MountConvention::Direct)
        );
        assert_eq!(
            mounts.for_kind(Peer::drive("d", vec![]).kind()),
            Some(&MountConvention::Root("/media/$USER".into()))
        );
    }

    #[test]
    fn default_table_is_unconfigured() {
        let mounts = MountConventions::default();
        assert_eq!(mounts.for_kind(Peer::drive("d", vec![]).kind()), None);
    }
}
