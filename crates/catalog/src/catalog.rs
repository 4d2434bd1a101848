use globset::Glob;
use rustc_hash::FxHashMap;
use topology::{Network, PeerKind};
use tracing::debug;

use crate::error::CatalogError;
use crate::replica::{Replica, ReplicaId};
use crate::working_set::{Patterns, WorkingSet};

/// The replica catalogue: every table needed to turn a replica spec into a
/// [`Replica`].
///
/// Tables are keyed the way config files spell them: fully-qualified
/// `peer/refinement` strings for exact entries, bare peer names for
/// peer-level working sets, bare refinements for prefix defaults. All keys
/// use canonical peer names; [`CatalogBuilder`] callers are expected to have
/// collapsed aliases via the topology first (resolution re-collapses spec
/// input, so only table keys need care).
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    default_refinements: FxHashMap<String, String>,
    host_default_refinement: Option<String>,
    drive_default_refinement: Option<String>,
    prefixes: FxHashMap<String, String>,
    refinement_prefixes: FxHashMap<String, String>,
    includes: FxHashMap<String, Patterns>,
    excludes: FxHashMap<String, Patterns>,
}

impl Catalog {
    /// Starts an empty catalog builder.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Normalizes a replica spec into a fully-qualified [`ReplicaId`].
    ///
    /// The peer component may be an alias; it is collapsed to the canonical
    /// name. A bare peer spec resolves its default refinement from the
    /// per-peer table first, then the per-kind table. Everything after the
    /// first `/` is the refinement, verbatim.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Topology`] when the peer is unknown;
    /// [`CatalogError::NoDefaultRefinement`] when a bare spec has no default
    /// to fall back on.
    pub fn normalize(&self, spec: &str, network: &Network) -> Result<ReplicaId, CatalogError> {
        let (peer_part, refinement) = match spec.split_once('/') {
            Some((peer, rest)) => (peer, Some(rest)),
            None => (spec, None),
        };

        let peer = network.canonical_name(peer_part)?;

        let refinement = match refinement {
            Some(refinement) => refinement.to_string(),
            None => self
                .default_refinement(peer, network.classify(peer)?)
                .ok_or_else(|| CatalogError::NoDefaultRefinement {
                    peer: peer.to_string(),
                })?
                .to_string(),
        };

        Ok(ReplicaId::new(peer, refinement))
    }

    /// Path prefix for a replica.
    ///
    /// Exact `peer/refinement` entries win; otherwise the refinement-keyed
    /// default table applies (so `home` can map to `$HOME` once for every
    /// peer).
    ///
    /// # Errors
    ///
    /// [`CatalogError::MissingPrefix`] when neither table matches.
    pub fn resolve_prefix(&self, id: &ReplicaId) -> Result<&str, CatalogError> {
        if let Some(prefix) = self.prefixes.get(&id.to_string()) {
            return Ok(prefix);
        }
        self.refinement_prefixes
            .get(id.refinement())
            .map(String::as_str)
            .ok_or_else(|| CatalogError::MissingPrefix {
                replica: id.clone(),
            })
    }

    /// Include/exclude working set for a replica.
    ///
    /// Selection runs independently per role: the exact `peer/refinement`
    /// entry wins; a bare-peer entry applies only when the refinement is the
    /// peer's default; otherwise the role is empty. The `everything`
    /// sentinel collapses after selection.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Topology`] when the peer is unknown (the default
    /// refinement check needs the peer's kind).
    pub fn resolve_working_set(
        &self,
        id: &ReplicaId,
        network: &Network,
    ) -> Result<WorkingSet, CatalogError> {
        let kind = network.classify(id.peer())?;
        let is_default = self.default_refinement(id.peer(), kind) == Some(id.refinement());

        let includes = select_patterns(&self.includes, id, is_default)
            .map_or_else(Vec::new, Patterns::into_includes);
        let excludes = select_patterns(&self.excludes, id, is_default)
            .map_or_else(Vec::new, Patterns::into_excludes);

        debug!(
            target: "oc_sync::catalog",
            replica = %id,
            includes = includes.len(),
            excludes = excludes.len(),
            "working set resolved"
        );

        Ok(WorkingSet::new(includes, excludes))
    }

    /// Resolves a replica spec all the way to a [`Replica`].
    pub fn resolve(&self, spec: &str, network: &Network) -> Result<Replica, CatalogError> {
        let id = self.normalize(spec, network)?;
        let prefix = self.resolve_prefix(&id)?.to_string();
        let working_set = self.resolve_working_set(&id, network)?;
        Ok(Replica::new(id, prefix, working_set))
    }

    fn default_refinement(&self, peer: &str, kind: &PeerKind) -> Option<&str> {
        if let Some(refinement) = self.default_refinements.get(peer) {
            return Some(refinement);
        }
        match kind {
            PeerKind::Host { .. } => self.host_default_refinement.as_deref(),
            PeerKind::Drive => self.drive_default_refinement.as_deref(),
        }
    }
}

fn select_patterns(
    table: &FxHashMap<String, Patterns>,
    id: &ReplicaId,
    is_default: bool,
) -> Option<Patterns> {
    if let Some(patterns) = table.get(&id.to_string()) {
        return Some(patterns.clone());
    }
    if is_default {
        return table.get(id.peer()).cloned();
    }
    None
}

/// Builder assembling a [`Catalog`] from configuration tables.
///
/// [`CatalogBuilder::build`] compiles every configured glob so invalid
/// patterns fail at startup instead of plan time.
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// Sets a per-peer default refinement, overriding the kind default.
    #[must_use]
    pub fn default_refinement(
        mut self,
        peer: impl Into<String>,
        refinement: impl Into<String>,
    ) -> Self {
        self.catalog
            .default_refinements
            .insert(peer.into(), refinement.into());
        self
    }

    /// Sets the default refinement for host peers.
    #[must_use]
    pub fn host_default_refinement(mut self, refinement: impl Into<String>) -> Self {
        self.catalog.host_default_refinement = Some(refinement.into());
        self
    }

    /// Sets the default refinement for drive peers.
    #[must_use]
    pub fn drive_default_refinement(mut self, refinement: impl Into<String>) -> Self {
        self.catalog.drive_default_refinement = Some(refinement.into());
        self
    }

    /// Adds an exact `peer/refinement` prefix entry.
    #[must_use]
    pub fn prefix(mut self, replica: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.catalog.prefixes.insert(replica.into(), prefix.into());
        self
    }

    /// Adds a refinement-keyed default prefix entry.
    #[must_use]
    pub fn refinement_prefix(
        mut self,
        refinement: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        self.catalog
            .refinement_prefixes
            .insert(refinement.into(), prefix.into());
        self
    }

    /// Adds an include selection under a `peer/refinement` or bare peer key.
    #[must_use]
    pub fn includes(mut self, key: impl Into<String>, patterns: Patterns) -> Self {
        self.catalog.includes.insert(key.into(), patterns);
        self
    }

    /// Adds an exclude selection under a `peer/refinement` or bare peer key.
    #[must_use]
    pub fn excludes(mut self, key: impl Into<String>, patterns: Patterns) -> Self {
        self.catalog.excludes.insert(key.into(), patterns);
        self
    }

    /// Validates every configured pattern and finishes the catalog.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidPattern`] naming the table key, role, and
    /// offending pattern of the first glob that fails to compile.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        validate_patterns(&self.catalog.includes, "include")?;
        validate_patterns(&self.catalog.excludes, "exclude")?;
        Ok(self.catalog)
    }
}

fn validate_patterns(
    table: &FxHashMap<String, Patterns>,
    role: &'static str,
) -> Result<(), CatalogError> {
    for (key, patterns) in table {
        for pattern in patterns.explicit_patterns() {
            if let Err(source) = Glob::new(pattern) {
                return Err(CatalogError::InvalidPattern {
                    key: key.clone(),
                    role,
                    pattern: pattern.to_string(),
                    source,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use topology::{MountConvention, MountConventions, Peer};

    fn sample_network() -> Network {
        let peers = vec![
            Peer::host("basalt", vec!["slab".into()], vec![]),
            Peer::host("quartz", vec![], vec![]),
            Peer::drive("flint", vec![]),
        ];
        Network::new(
            peers,
            FxHashMap::default(),
            MountConventions::new(
                Some(MountConvention::Direct),
                Some(MountConvention::Root("/media/$USER".into())),
            ),
        )
        .unwrap()
    }

    fn sample_catalog() -> Catalog {
        Catalog::builder()
            .host_default_refinement("home")
            .drive_default_refinement("user")
            .default_refinement("quartz", "tree")
            .prefix("basalt/scratch", "$HOME/scratch/tree")
            .prefix("quartz/tree", "$HOME/depot/tree")
            .refinement_prefix("home", "$HOME")
            .refinement_prefix("user", "$USER")
            .includes("basalt/scratch", Patterns::List(vec!["projects/**".into()]))
            .excludes("basalt", Patterns::List(vec!["*.git".into(), "*~".into()]))
            .excludes("flint/user", Patterns::Everything)
            .build()
            .unwrap()
    }

    #[test]
    fn bare_host_spec_uses_kind_default() {
        let id = sample_catalog()
            .normalize("basalt", &sample_network())
            .unwrap();
        assert_eq!(id, ReplicaId::new("basalt", "home"));
    }

    #[test]
    fn per_peer_default_beats_kind_default() {
        let id = sample_catalog()
            .normalize("quartz", &sample_network())
            .unwrap();
        assert_eq!(id, ReplicaId::new("quartz", "tree"));
    }

    #[test]
    fn bare_drive_spec_uses_drive_default() {
        let id = sample_catalog()
            .normalize("flint", &sample_network())
            .unwrap();
        assert_eq!(id, ReplicaId::new("flint", "user"));
    }

    #[test]
    fn explicit_refinement_passes_through() {
        let id = sample_catalog()
            .normalize("basalt/scratch", &sample_network())
            .unwrap();
        assert_eq!(id, ReplicaId::new("basalt", "scratch"));
    }

    #[test]
    fn aliases_collapse_to_canonical_peers() {
        let id = sample_catalog()
            .normalize("slab/scratch", &sample_network())
            .unwrap();
        assert_eq!(id, ReplicaId::new("basalt", "scratch"));
    }

    #[test]
    fn nested_refinements_are_kept_verbatim() {
        let id = sample_catalog()
            .normalize("basalt/projects/active", &sample_network())
            .unwrap();
        assert_eq!(id.refinement(), "projects/active");
    }

    #[test]
    fn normalize_is_idempotent() {
        let network = sample_network();
        let catalog = sample_catalog();

        for spec in ["basalt", "slab", "quartz", "flint", "basalt/scratch"] {
            let once = catalog.normalize(spec, &network).unwrap();
            let twice = catalog.normalize(&once.to_string(), &network).unwrap();
            assert_eq!(once, twice, "normalize must be idempotent for {spec}");
        }
    }

    #[test]
    fn missing_default_refinement_is_reported() {
        let network = sample_network();
        let catalog = Catalog::builder()
            .drive_default_refinement("user")
            .build()
            .unwrap();

        let err = catalog.normalize("basalt", &network).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NoDefaultRefinement { peer } if peer == "basalt"
        ));
    }

    #[test]
    fn unknown_peer_surfaces_from_topology() {
        let err = sample_catalog()
            .normalize("walrus/home", &sample_network())
            .unwrap_err();
        assert!(matches!(err, CatalogError::Topology(_)));
    }

    #[test]
    fn exact_prefix_beats_refinement_default() {
        let catalog = sample_catalog();
        let id = ReplicaId::new("basalt", "scratch");
        assert_eq!(catalog.resolve_prefix(&id).unwrap(), "$HOME/scratch/tree");
    }

    #[test]
    fn refinement_default_prefix_applies_without_exact_entry() {
        let catalog = sample_catalog();
        let id = ReplicaId::new("basalt", "home");
        assert_eq!(catalog.resolve_prefix(&id).unwrap(), "$HOME");
    }

    #[test]
    fn missing_prefix_is_reported_with_replica() {
        let catalog = sample_catalog();
        let id = ReplicaId::new("basalt", "attic");

        let err = catalog.resolve_prefix(&id).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingPrefix { replica } if replica == id
        ));
    }

    #[test]
    fn exact_working_set_entry_wins() {
        let network = sample_network();
        let set = sample_catalog()
            .resolve_working_set(&ReplicaId::new("basalt", "scratch"), &network)
            .unwrap();

        assert_eq!(set.includes(), ["projects/**"]);
        // The bare-peer excludes do not apply: scratch is not the default.
        assert!(set.excludes().is_empty());
    }

    #[test]
    fn bare_peer_entry_applies_only_to_default_refinement() {
        let network = sample_network();
        let catalog = sample_catalog();

        let default = catalog
            .resolve_working_set(&ReplicaId::new("basalt", "home"), &network)
            .unwrap();
        assert_eq!(default.excludes(), ["*.git", "*~"]);

        let other = catalog
            .resolve_working_set(&ReplicaId::new("basalt", "attic"), &network)
            .unwrap();
        assert!(other.excludes().is_empty());
    }

    #[test]
    fn exclude_sentinel_collapses_to_star() {
        let network = sample_network();
        let set = sample_catalog()
            .resolve_working_set(&ReplicaId::new("flint", "user"), &network)
            .unwrap();
        assert_eq!(set.excludes(), ["*"]);
    }

    #[test]
    fn exclude_sentinel_ignores_configured_includes() {
        let network = sample_network();
        let catalog = Catalog::builder()
            .host_default_refinement("home")
            .includes("basalt/home", Patterns::List(vec!["docs/**".into()]))
            .excludes("basalt/home", Patterns::Everything)
            .build()
            .unwrap();

        let set = catalog
            .resolve_working_set(&ReplicaId::new("basalt", "home"), &network)
            .unwrap();
        assert_eq!(set.excludes(), ["*"]);
        assert_eq!(set.includes(), ["docs/**"]);
    }

    #[test]
    fn resolve_bundles_id_prefix_and_working_set() {
        let network = sample_network();
        let replica = sample_catalog().resolve("slab", &network).unwrap();

        assert_eq!(replica.id().to_string(), "basalt/home");
        assert_eq!(replica.prefix(), "$HOME");
        assert_eq!(replica.working_set().excludes(), ["*.git", "*~"]);
    }

    #[test]
    fn invalid_glob_fails_at_build() {
        let result = Catalog::builder()
            .excludes("basalt/home", Patterns::List(vec!["a[".into()]))
            .build();

        assert!(matches!(
            result.unwrap_err(),
            CatalogError::InvalidPattern { role: "exclude", .. }
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_is_idempotent_for_arbitrary_refinements(
                refinement in "[a-z][a-z0-9/]{0,20}",
            ) {
                let network = sample_network();
                let catalog = sample_catalog();
                let spec = format!("basalt/{refinement}");

                let once = catalog.normalize(&spec, &network).unwrap();
                let twice = catalog.normalize(&once.to_string(), &network).unwrap();
                prop_assert_eq!(once, twice);
            }
        }
    }
}
