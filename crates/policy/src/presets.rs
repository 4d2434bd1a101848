use crate::layer::{PolicyLayer, SyncOverride, TransportOverride};
use crate::spec::SyncPolicy;

/// A named, fully-specified [`SyncPolicy`] assignment.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    name: &'static str,
    summary: &'static str,
    policy: SyncPolicy,
}

impl Preset {
    /// Name used to select the preset from the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// One-line human description.
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        self.summary
    }

    /// The policy the preset stands for.
    #[must_use]
    pub const fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// The preset as a layer with an opinion on every sync switch.
    ///
    /// Presets pin all four switches, so applying the layer discards any
    /// sync values from earlier layers. Transport fields are untouched.
    #[must_use]
    pub fn as_layer(&self) -> PolicyLayer {
        PolicyLayer {
            sync: SyncOverride {
                inject: Some(self.policy.inject),
                clobber: Some(self.policy.clobber),
                clean: Some(self.policy.clean),
                prune: Some(self.policy.prune),
            },
            transport: TransportOverride::default(),
        }
    }
}

/// All built-in presets, in listing order.
pub static PRESETS: [Preset; 6] = [
    Preset {
        name: "safe",
        summary: "Adds and refreshes files without ever deleting anything on the target.",
        policy: SyncPolicy {
            inject: false,
            clobber: false,
            clean: false,
            prune: false,
        },
    },
    Preset {
        name: "inplace-safe",
        summary: "Refreshes files the target already holds and adds nothing new.",
        policy: SyncPolicy {
            inject: true,
            clobber: false,
            clean: false,
            prune: false,
        },
    },
    Preset {
        name: "inplace",
        summary: "Rewrites existing target files even when timestamps say they are current.",
        policy: SyncPolicy {
            inject: true,
            clobber: true,
            clean: false,
            prune: false,
        },
    },
    Preset {
        name: "update",
        summary: "The usual choice. Refreshes stale files and mirrors source deletions.",
        policy: SyncPolicy {
            inject: false,
            clobber: false,
            clean: true,
            prune: false,
        },
    },
    Preset {
        name: "force-update",
        summary: "Mirrors source deletions and rewrites files regardless of timestamps.",
        policy: SyncPolicy {
            inject: false,
            clobber: true,
            clean: true,
            prune: false,
        },
    },
    Preset {
        name: "colonize",
        summary: "Full takeover. Ignores timestamps, mirrors deletions, and purges excluded files.",
        policy: SyncPolicy {
            inject: false,
            clobber: true,
            clean: true,
            prune: true,
        },
    },
];

/// Selecting a preset name that is not defined.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown sync preset `{name}`")]
pub struct UnknownPreset {
    /// The rejected name.
    pub name: String,
}

/// Looks up a preset by name.
///
/// # Errors
///
/// Returns [`UnknownPreset`] when no preset carries `name`.
pub fn preset(name: &str) -> Result<&'static Preset, UnknownPreset> {
    PRESETS
        .iter()
        .find(|preset| preset.name == name)
        .ok_or_else(|| UnknownPreset {
            name: name.to_owned(),
        })
}
