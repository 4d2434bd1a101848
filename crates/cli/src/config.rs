//! TOML configuration loading.
//!
//! One file describes everything the frontend needs: the `[network]` tables
//! become a [`Network`], the `[image]` tables a [`Catalog`], and the
//! `[policy]` tables the configured [`PolicyLayer`] plus per-pair
//! overrides. Decoding is strict (`deny_unknown_fields` throughout) so a
//! typo fails loudly instead of silently configuring nothing.
//!
//! Pair rules are normalized against the network and image at load time:
//! aliases collapse to canonical peer names and bare peers gain their
//! default refinement, so a rule written as `slab` matches a transfer
//! planned for `basalt/home`. Rules naming unknown peers are dropped with
//! a warning, mirroring how the topology treats connection entries for
//! unconfigured peers.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use catalog::{Catalog, CatalogError, Patterns};
use policy::{Direction, PairOverrides, PairingKey, PolicyLayer, SyncOverride, TransportOverride};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use thiserror::Error;
use topology::{MountConvention, MountConventions, Network, Peer, RemoteHost, TopologyError};
use tracing::{debug, warn};

/// Everything the configuration file provides, decoded and cross-checked.
#[derive(Debug)]
pub(crate) struct Configured {
    pub network: Network,
    pub catalog: Catalog,
    pub defaults: PolicyLayer,
    pub pairs: PairOverrides,
}

/// Failures while locating, reading, or decoding the configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file does not exist at the resolved path.
    #[error("no configuration file at `{}`; create it or pass --config", .path.display())]
    Missing { path: PathBuf },

    /// The file exists but could not be read.
    #[error("cannot read `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML or does not match the expected tables.
    #[error("cannot parse `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The `[network]` tables decoded but do not form a valid network.
    #[error("invalid network in `{}`: {source}", .path.display())]
    Network {
        path: PathBuf,
        #[source]
        source: TopologyError,
    },

    /// The `[image]` tables decoded but do not form a valid catalog.
    #[error("invalid image in `{}`: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },

    /// Neither `XDG_CONFIG_HOME` nor `HOME` is set.
    #[error("cannot locate a configuration directory; pass --config")]
    NoConfigDir,
}

/// Resolves the default configuration path.
///
/// `$XDG_CONFIG_HOME/oc-sync/config.toml` when set, otherwise
/// `~/.config/oc-sync/config.toml`.
///
/// # Errors
///
/// [`ConfigError::NoConfigDir`] when neither environment variable is set.
pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
    if let Some(base) = env::var_os("XDG_CONFIG_HOME").filter(|base| !base.is_empty()) {
        return Ok(PathBuf::from(base).join("oc-sync/config.toml"));
    }
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".config/oc-sync/config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Reads and assembles the configuration at `path`.
pub(crate) fn load(path: &Path) -> Result<Configured, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let file: ConfigFile = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    assemble(path, file)
}

fn assemble(path: &Path, file: ConfigFile) -> Result<Configured, ConfigError> {
    let network = build_network(file.network).map_err(|source| ConfigError::Network {
        path: path.to_path_buf(),
        source,
    })?;

    warn_inert_image_keys(&network, &file.image);
    let catalog = build_catalog(file.image).map_err(|source| ConfigError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let (defaults, pairs) = build_policy(&network, &catalog, file.policy);

    debug!(
        target: "oc_sync::cli",
        config = %path.display(),
        pair_rules = pairs.len(),
        "configuration loaded"
    );

    Ok(Configured {
        network,
        catalog,
        defaults,
        pairs,
    })
}

fn build_network(table: NetworkTable) -> Result<Network, TopologyError> {
    let mut peers = Vec::with_capacity(table.hosts.len() + table.drives.len());
    let mut connections = FxHashMap::default();

    for (name, entry) in table.hosts {
        if let Some(remote) = entry.connection {
            connections.insert(name.clone(), remote);
        }
        peers.push(Peer::host(name, entry.aliases, entry.nodes));
    }
    for (name, entry) in table.drives {
        peers.push(Peer::drive(name, entry.aliases));
    }

    let mounts = MountConventions::new(
        table.mounts.host.map(Into::into),
        table.mounts.drive.map(Into::into),
    );
    Network::new(peers, connections, mounts)
}

fn build_catalog(table: ImageTable) -> Result<Catalog, CatalogError> {
    let mut builder = Catalog::builder();

    if let Some(refinement) = table.host_refinement {
        builder = builder.host_default_refinement(refinement);
    }
    if let Some(refinement) = table.drive_refinement {
        builder = builder.drive_default_refinement(refinement);
    }
    for (refinement, prefix) in table.refinement_prefixes {
        builder = builder.refinement_prefix(refinement, prefix);
    }
    for (peer, entry) in table.peers {
        builder = builder.default_refinement(peer, entry.refinement);
    }
    for (key, entry) in table.replicas {
        if let Some(prefix) = entry.prefix {
            builder = builder.prefix(key.clone(), prefix);
        }
        if let Some(includes) = entry.includes {
            builder = builder.includes(key.clone(), includes);
        }
        if let Some(excludes) = entry.excludes {
            builder = builder.excludes(key, excludes);
        }
    }

    builder.build()
}

fn build_policy(
    network: &Network,
    catalog: &Catalog,
    table: PolicyTable,
) -> (PolicyLayer, PairOverrides) {
    let mut pairs = PairOverrides::default();

    for rule in table.pairs {
        let (Ok(src), Ok(target)) = (
            catalog.normalize(&rule.src, network),
            catalog.normalize(&rule.target, network),
        ) else {
            warn!(
                target: "oc_sync::cli",
                src = rule.src.as_str(),
                target = rule.target.as_str(),
                "pair rule names an unknown replica and is inert"
            );
            continue;
        };

        let key = match rule.direction {
            Direction::Directional => {
                PairingKey::directional(src.to_string(), target.to_string())
            }
            Direction::Symmetric => PairingKey::symmetric(src.to_string(), target.to_string()),
        };
        pairs.insert(
            key,
            PolicyLayer {
                sync: rule.sync,
                transport: rule.transport,
            },
        );
    }

    (table.defaults, pairs)
}

/// Warns about `[image]` keys that cannot match anything the catalog will
/// ever look up: table keys must use canonical peer names.
fn warn_inert_image_keys(network: &Network, image: &ImageTable) {
    for peer in image.peers.keys() {
        warn_unless_canonical(network, peer, "image peer entry");
    }
    for key in image.replicas.keys() {
        let peer = key.split_once('/').map_or(key.as_str(), |(peer, _)| peer);
        warn_unless_canonical(network, peer, "image replica entry");
    }
}

fn warn_unless_canonical(network: &Network, name: &str, what: &str) {
    match network.canonical_name(name) {
        Ok(canonical) if canonical != name => warn!(
            target: "oc_sync::cli",
            entry = name,
            canonical,
            "{what} uses an alias; spell it with the canonical name"
        ),
        Err(_) => warn!(
            target: "oc_sync::cli",
            entry = name,
            "{what} names an unconfigured peer and is inert"
        ),
        Ok(_) => {}
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    network: NetworkTable,
    #[serde(default)]
    image: ImageTable,
    #[serde(default)]
    policy: PolicyTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NetworkTable {
    #[serde(default)]
    hosts: BTreeMap<String, HostEntry>,
    #[serde(default)]
    drives: BTreeMap<String, DriveEntry>,
    #[serde(default)]
    mounts: MountTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HostEntry {
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    nodes: Vec<String>,
    connection: Option<RemoteHost>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DriveEntry {
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MountTable {
    host: Option<MountRule>,
    drive: Option<MountRule>,
}

/// Spelled `"direct"` or `{ root = "/media/$USER" }` in the file.
#[derive(Debug)]
enum MountRule {
    Direct,
    Root(String),
}

impl From<MountRule> for MountConvention {
    fn from(rule: MountRule) -> Self {
        match rule {
            MountRule::Direct => Self::Direct,
            MountRule::Root(root) => Self::Root(root),
        }
    }
}

impl<'de> Deserialize<'de> for MountRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MountRuleVisitor;

        impl<'de> Visitor<'de> for MountRuleVisitor {
            type Value = MountRule;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("the string \"direct\" or a table with a `root` key")
            }

            fn visit_str<E>(self, value: &str) -> Result<MountRule, E>
            where
                E: de::Error,
            {
                if value == "direct" {
                    Ok(MountRule::Direct)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            fn visit_map<A>(self, mut map: A) -> Result<MountRule, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut root = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "root" => root = Some(map.next_value::<String>()?),
                        other => return Err(de::Error::unknown_field(other, &["root"])),
                    }
                }
                root.map(MountRule::Root)
                    .ok_or_else(|| de::Error::missing_field("root"))
            }
        }

        deserializer.deserialize_any(MountRuleVisitor)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ImageTable {
    host_refinement: Option<String>,
    drive_refinement: Option<String>,
    #[serde(default)]
    refinement_prefixes: BTreeMap<String, String>,
    #[serde(default)]
    peers: BTreeMap<String, PeerImage>,
    #[serde(default)]
    replicas: BTreeMap<String, ReplicaImage>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PeerImage {
    refinement: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReplicaImage {
    prefix: Option<String>,
    includes: Option<Patterns>,
    excludes: Option<Patterns>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyTable {
    #[serde(default)]
    defaults: PolicyLayer,
    #[serde(default)]
    pairs: Vec<PairRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PairRule {
    src: String,
    target: String,
    direction: Direction,
    #[serde(default)]
    sync: SyncOverride,
    #[serde(default)]
    transport: TransportOverride,
}
