#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `topology` models the peer network that oc-sync plans transfers across: a
//! small, declaratively configured set of hosts (networked machines) and
//! drives (locally mounted storage). The crate answers three questions about
//! any configured peer name:
//!
//! - what *kind* of peer is it ([`Network::classify`]),
//! - how is it *reachable* from the node running the planner
//!   ([`Network::resolve_connection`]),
//! - where do its replicas *mount* on a filesystem
//!   ([`Network::mount_prefix`]).
//!
//! Reachability is a topology declaration, never a live probe: resolution
//! consults the configured connection table and the invoking node's identity
//! and performs no network I/O.
//!
//! # Design
//!
//! - [`Peer`] is a single struct with a payload-carrying [`PeerKind`] tag.
//!   Host peers carry their node aliases (machine identities that count as
//!   "being" that peer); drives carry nothing extra.
//! - [`Network`] owns the peers in one arena and indexes every canonical name
//!   and alias into it, so alias resolution is a plain map lookup and peer
//!   data is never duplicated.
//! - [`Connection`] is computed on demand from `(peer, invoking node)` and is
//!   deliberately not stored on the peer: the same topology file produces
//!   different connection answers on different machines.
//! - [`MountConventions`] is a typed two-slot table (one slot per peer kind).
//!   An unconfigured slot is an error surfaced at resolution time, not a
//!   silent default.
//!
//! # Invariants
//!
//! - Peer names are unique across both kinds; aliases may not shadow any
//!   canonical name or other alias. [`Network::new`] rejects violations.
//! - Drive peers always resolve to [`Connection::Local`]; remote-drive
//!   discovery is out of scope.
//! - A host peer is local exactly when the invoking node identity is the
//!   peer's canonical name or one of its node aliases.
//!
//! # Errors
//!
//! All fallible lookups return [`TopologyError`]: unknown names, construction
//! collisions, and missing mount conventions. See the enum for the full set.
//!
//! # Examples
//!
//! ```
//! use topology::{Connection, MountConvention, MountConventions, Network, Peer};
//!
//! let peers = vec![
//!     Peer::host("basalt", vec!["slab".into()], vec![]),
//!     Peer::host("quartz", vec![], vec![]),
//!     Peer::drive("flint", vec![]),
//! ];
//! let connections = [(
//!     "quartz".to_string(),
//!     topology::RemoteHost::new("quartz.example.net", "alice"),
//! )]
//! .into_iter()
//! .collect();
//! let mounts = MountConventions::new(
//!     Some(MountConvention::Direct),
//!     Some(MountConvention::Root("/media/$USER".into())),
//! );
//! let network = Network::new(peers, connections, mounts).unwrap();
//!
//! // "slab" is an alias for the host "basalt".
//! assert!(network.classify("slab").unwrap().is_host());
//!
//! // Planning from the machine "basalt": quartz is remote, flint local.
//! let conn = network.resolve_connection("quartz", "basalt").unwrap();
//! assert!(matches!(conn, Connection::Remote(_)));
//! assert_eq!(
//!     network.resolve_connection("flint", "basalt").unwrap(),
//!     Connection::Local,
//! );
//! ```
//!
//! # See also
//!
//! - `catalog` resolves replica identifiers and paths on top of this crate.
//! - `plan` combines connections and mounts into executable transfer plans.

mod connection;
mod error;
mod mount;
mod network;
mod peer;

pub use connection::{Connection, RemoteHost};
pub use error::TopologyError;
pub use mount::{MountConvention, MountConventions};
pub use network::Network;
pub use peer::{Peer, PeerKind};
