use std::fmt;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::layer::PolicyLayer;

/// Whether a pairing applies one way or both ways.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Applies only when the pair's first replica is the source.
    #[serde(rename = "->")]
    Directional,
    /// Applies regardless of which replica is the source.
    #[serde(rename = "<->")]
    Symmetric,
}

/// Identifies one pairing entry by its replica ids and direction.
///
/// Replica ids are stored in the `"peer/refinement"` form produced by
/// normalization, so lookups only hit entries written against canonical
/// names.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PairingKey {
    src: String,
    target: String,
    direction: Direction,
}

impl PairingKey {
    /// Key for a one-way pairing from `src` to `target`.
    #[must_use]
    pub fn directional(src: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            target: target.into(),
            direction: Direction::Directional,
        }
    }

    /// Key for a pairing that applies in either transfer direction.
    #[must_use]
    pub fn symmetric(src: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            target: target.into(),
            direction: Direction::Symmetric,
        }
    }

    /// First replica id of the pair.
    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Second replica id of the pair.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Direction of the pairing.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for PairingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            Direction::Directional => "->",
            Direction::Symmetric => "<->",
        };
        write!(f, "{} {arrow} {}", self.src, self.target)
    }
}

/// Per-pair policy layers keyed by replica pairing.
///
/// At most one entry applies to a transfer. Probing order for a transfer
/// from `src` to `target`:
///
/// 1. directional `src -> target`
/// 2. symmetric `src <-> target`
/// 3. symmetric `target <-> src`
///
/// The first hit wins and later probes are not consulted.
#[derive(Clone, Debug, Default)]
pub struct PairOverrides {
    table: FxHashMap<PairingKey, PolicyLayer>,
}

impl PairOverrides {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `layer` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: PairingKey, layer: PolicyLayer) {
        self.table.insert(key, layer);
    }

    /// Number of registered pairings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether no pairings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Finds the layer for a transfer from `src` to `target`, if any.
    ///
    /// Returns the matched key alongside the layer so callers can report
    /// which entry applied.
    #[must_use]
    pub fn lookup(&self, src: &str, target: &str) -> Option<(&PairingKey, &PolicyLayer)> {
        let probes = [
            PairingKey::directional(src, target),
            PairingKey::symmetric(src, target),
            PairingKey::symmetric(target, src),
        ];
        probes
            .iter()
            .find_map(|probe| self.table.get_key_value(probe))
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, PairOverrides, PairingKey};
    use crate::layer::{PolicyLayer, SyncOverride};

    fn layer_with_clean(clean: bool) -> PolicyLayer {
        PolicyLayer {
            sync: SyncOverride {
                clean: Some(clean),
                ..SyncOverride::default()
            },
            ..PolicyLayer::default()
        }
    }

    #[test]
    fn directional_entry_matches_only_its_direction() {
        let mut pairs = PairOverrides::new();
        pairs.insert(
            PairingKey::directional("tower/home", "vault/user"),
            layer_with_clean(true),
        );

        assert!(pairs.lookup("tower/home", "vault/user").is_some());
        assert!(pairs.lookup("vault/user", "tower/home").is_none());
    }

    #[test]
    fn symmetric_entry_matches_both_directions() {
        let mut pairs = PairOverrides::new();
        pairs.insert(
            PairingKey::symmetric("tower/home", "vault/user"),
            layer_with_clean(true),
        );

        let (key, _) = pairs.lookup("tower/home", "vault/user").unwrap();
        assert_eq!(key.direction(), Direction::Symmetric);
        let (key, _) = pairs.lookup("vault/user", "tower/home").unwrap();
        assert_eq!(key.src(), "tower/home");
    }

    #[test]
    fn directional_beats_symmetric() {
        let mut pairs = PairOverrides::new();
        pairs.insert(
            PairingKey::directional("tower/home", "vault/user"),
            layer_with_clean(true),
        );
        pairs.insert(
            PairingKey::symmetric("tower/home", "vault/user"),
            layer_with_clean(false),
        );

        let (key, layer) = pairs.lookup("tower/home", "vault/user").unwrap();
        assert_eq!(key.direction(), Direction::Directional);
        assert_eq!(layer.sync.clean, Some(true));

        // The reverse transfer only sees the symmetric entry.
        let (key, layer) = pairs.lookup("vault/user", "tower/home").unwrap();
        assert_eq!(key.direction(), Direction::Symmetric);
        assert_eq!(layer.sync.clean, Some(false));
    }

    #[test]
    fn forward_symmetric_beats_reversed_symmetric() {
        let mut pairs = PairOverrides::new();
        pairs.insert(
            PairingKey::symmetric("tower/home", "vault/user"),
            layer_with_clean(true),
        );
        pairs.insert(
            PairingKey::symmetric("vault/user", "tower/home"),
            layer_with_clean(false),
        );

        let (_, layer) = pairs.lookup("tower/home", "vault/user").unwrap();
        assert_eq!(layer.sync.clean, Some(true));
    }

    #[test]
    fn unrelated_pairs_do_not_match() {
        let mut pairs = PairOverrides::new();
        pairs.insert(
            PairingKey::symmetric("tower/home", "vault/user"),
            layer_with_clean(true),
        );

        assert!(pairs.lookup("tower/home", "annex/user").is_none());
        assert!(pairs.is_empty() || pairs.len() == 1);
    }

    #[test]
    fn direction_deserializes_from_arrows() {
        let directional: Direction = serde_json::from_str(r#""->""#).unwrap();
        let symmetric: Direction = serde_json::from_str(r#""<->""#).unwrap();
        assert_eq!(directional, Direction::Directional);
        assert_eq!(symmetric, Direction::Symmetric);
    }

    #[test]
    fn key_display_matches_config_spelling() {
        let key = PairingKey::directional("tower/home", "vault/user");
        assert_eq!(key.to_string(), "tower/home -> vault/user");
        let key = PairingKey::symmetric("tower/home", "vault/user");
        assert_eq!(key.to_string(), "tower/home <-> vault/user");
    }
}
