use tracing::debug;

use crate::layer::PolicyLayer;
use crate::pairs::PairOverrides;
use crate::spec::SyncSpec;

/// Compiles the effective [`SyncSpec`] for a transfer from `src` to
/// `target`.
///
/// Layers apply in fixed order, each overwriting only the fields it has an
/// opinion on:
///
/// 1. built-in defaults ([`SyncSpec::default`])
/// 2. the image-wide layer
/// 3. the pair layer matched by [`PairOverrides::lookup`], if any
/// 4. the caller's layer, from command-line switches
///
/// Both replica ids must already be in canonical `"peer/refinement"` form;
/// pair matching is textual.
#[must_use]
pub fn compile(
    src: &str,
    target: &str,
    image: &PolicyLayer,
    pairs: &PairOverrides,
    caller: &PolicyLayer,
) -> SyncSpec {
    let mut spec = SyncSpec::default();
    image.apply(&mut spec);
    match pairs.lookup(src, target) {
        Some((key, layer)) => {
            debug!(target: "oc_sync::policy", pair = %key, "pair override applied");
            layer.apply(&mut spec);
        }
        None => {
            debug!(target: "oc_sync::policy", src, dst = target, "no pair override");
        }
    }
    caller.apply(&mut spec);
    spec
}

#[cfg(test)]
mod tests {
    use super::compile;
    use crate::layer::{PolicyLayer, SyncOverride, TransportOverride};
    use crate::pairs::{PairOverrides, PairingKey};
    use crate::spec::{Backup, Compression, SyncSpec};

    fn image_layer() -> PolicyLayer {
        PolicyLayer {
            sync: SyncOverride {
                clean: Some(true),
                ..SyncOverride::default()
            },
            transport: TransportOverride {
                backup: Some(Backup::Rename),
                ..TransportOverride::default()
            },
        }
    }

    #[test]
    fn all_layers_empty_yields_builtin_defaults() {
        let spec = compile(
            "tower/home",
            "vault/user",
            &PolicyLayer::default(),
            &PairOverrides::new(),
            &PolicyLayer::default(),
        );
        assert_eq!(spec, SyncSpec::default());
    }

    #[test]
    fn image_layer_shapes_the_baseline() {
        let spec = compile(
            "tower/home",
            "vault/user",
            &image_layer(),
            &PairOverrides::new(),
            &PolicyLayer::default(),
        );
        assert!(spec.sync.clean);
        assert_eq!(spec.transport.backup, Backup::Rename);
        // Fields no layer mentioned keep their built-in values.
        assert!(!spec.sync.prune);
        assert_eq!(spec.transport.compression, Compression::Auto);
    }

    #[test]
    fn pair_layer_overrides_image() {
        let mut pairs = PairOverrides::new();
        pairs.insert(
            PairingKey::symmetric("tower/home", "vault/user"),
            PolicyLayer {
                sync: SyncOverride {
                    clean: Some(false),
                    ..SyncOverride::default()
                },
                ..PolicyLayer::default()
            },
        );

        let spec = compile(
            "vault/user",
            "tower/home",
            &image_layer(),
            &pairs,
            &PolicyLayer::default(),
        );
        assert!(!spec.sync.clean);
        // Image opinions survive where the pair is silent.
        assert_eq!(spec.transport.backup, Backup::Rename);
    }

    #[test]
    fn caller_layer_has_the_last_word() {
        let mut pairs = PairOverrides::new();
        pairs.insert(
            PairingKey::directional("tower/home", "vault/user"),
            PolicyLayer {
                transport: TransportOverride {
                    compression: Some(Compression::None),
                    ..TransportOverride::default()
                },
                ..PolicyLayer::default()
            },
        );
        let caller = PolicyLayer {
            transport: TransportOverride {
                compression: Some(Compression::Native),
                dry_run: Some(true),
                ..TransportOverride::default()
            },
            ..PolicyLayer::default()
        };

        let spec = compile("tower/home", "vault/user", &image_layer(), &pairs, &caller);
        assert_eq!(spec.transport.compression, Compression::Native);
        assert!(spec.transport.dry_run);
    }

    #[test]
    fn unrelated_pair_entries_do_not_apply() {
        let mut pairs = PairOverrides::new();
        pairs.insert(
            PairingKey::symmetric("annex/user", "vault/user"),
            PolicyLayer {
                sync: SyncOverride {
                    prune: Some(true),
                    ..SyncOverride::default()
                },
                ..PolicyLayer::default()
            },
        );

        let spec = compile(
            "tower/home",
            "vault/user",
            &PolicyLayer::default(),
            &pairs,
            &PolicyLayer::default(),
        );
        assert!(!spec.sync.prune);
    }
}
