use serde::Deserialize;

use crate::spec::{Backup, Compression, Encryption, SyncPolicy, SyncSpec, TransportPolicy};

/// Partial [`SyncPolicy`]: `None` fields carry no opinion.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SyncOverride {
    /// Override for [`SyncPolicy::inject`].
    #[serde(default)]
    pub inject: Option<bool>,
    /// Override for [`SyncPolicy::clobber`].
    #[serde(default)]
    pub clobber: Option<bool>,
    /// Override for [`SyncPolicy::clean`].
    #[serde(default)]
    pub clean: Option<bool>,
    /// Override for [`SyncPolicy::prune`].
    #[serde(default)]
    pub prune: Option<bool>,
}

impl SyncOverride {
    fn apply(self, policy: &mut SyncPolicy) {
        if let Some(inject) = self.inject {
            policy.inject = inject;
        }
        if let Some(clobber) = self.clobber {
            policy.clobber = clobber;
        }
        if let Some(clean) = self.clean {
            policy.clean = clean;
        }
        if let Some(prune) = self.prune {
            policy.prune = prune;
        }
    }
}

/// Partial [`TransportPolicy`]: `None` fields carry no opinion.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TransportOverride {
    /// Override for [`TransportPolicy::compression`].
    #[serde(default)]
    pub compression: Option<Compression>,
    /// Override for [`TransportPolicy::encryption`].
    #[serde(default)]
    pub encryption: Option<Encryption>,
    /// Override for [`TransportPolicy::backup`].
    #[serde(default)]
    pub backup: Option<Backup>,
    /// Override for [`TransportPolicy::dry_run`].
    #[serde(default)]
    pub dry_run: Option<bool>,
    /// Override for [`TransportPolicy::create_target`].
    #[serde(default)]
    pub create_target: Option<bool>,
}

impl TransportOverride {
    fn apply(self, policy: &mut TransportPolicy) {
        if let Some(compression) = self.compression {
            policy.compression = compression;
        }
        if let Some(encryption) = self.encryption {
            policy.encryption = encryption;
        }
        if let Some(backup) = self.backup {
            policy.backup = backup;
        }
        if let Some(dry_run) = self.dry_run {
            policy.dry_run = dry_run;
        }
        if let Some(create_target) = self.create_target {
            policy.create_target = create_target;
        }
    }
}

/// One policy layer: sync and transport fragments merged as a unit.
///
/// A later layer's `Some` fields fully replace the running value; there is
/// no deeper merging than per-field overwrite.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PolicyLayer {
    /// Sync switch overrides.
    #[serde(default)]
    pub sync: SyncOverride,
    /// Transport overrides.
    #[serde(default)]
    pub transport: TransportOverride,
}

impl PolicyLayer {
    /// Overwrites `spec` fields this layer has opinions on.
    pub fn apply(self, spec: &mut SyncSpec) {
        self.sync.apply(&mut spec.sync);
        self.transport.apply(&mut spec.transport);
    }

    /// Whether the layer has no opinion on any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
