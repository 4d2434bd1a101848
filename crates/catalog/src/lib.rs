#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `catalog` resolves replica identifiers into concrete, plan-ready data: a
//! normalized [`ReplicaId`], an absolute-ish path prefix (environment tokens
//! still unexpanded), and the include/exclude [`WorkingSet`] applied during
//! transfer. The [`Catalog`] owns the configured tables and answers lookups
//! as pure functions; nothing is cached or mutated after construction.
//!
//! # Design
//!
//! - [`Catalog::normalize`] turns a user-facing spec (`peer` or
//!   `peer/refinement`, alias spellings allowed) into a fully-qualified
//!   [`ReplicaId`]. Bare peer names pick up a default refinement from the
//!   per-peer override table first, then the per-kind table. The function is
//!   idempotent: a fully-qualified spec passes through unchanged.
//! - [`Catalog::resolve_prefix`] prefers an exact `peer/refinement` entry and
//!   falls back to the refinement-keyed default table (`home` → `$HOME`
//!   style). No entry in either table is a hard error.
//! - [`Catalog::resolve_working_set`] selects include and exclude pattern
//!   lists independently, each preferring the exact entry, then a bare-peer
//!   entry when the refinement is the peer's default, then empty. The
//!   "everything" sentinel collapses after selection: exclude-everything
//!   becomes the single glob `*`, include-everything becomes no include
//!   filter at all.
//! - [`Catalog::resolve`] bundles all three into a [`Replica`], the unit the
//!   plan compiler consumes.
//!
//! # Invariants
//!
//! - `normalize(normalize(x)) == normalize(x)` for every spec `x` that
//!   normalizes at all.
//! - Every glob pattern in the catalog compiled successfully at
//!   construction; plan-time lookups cannot hit invalid patterns.
//! - An exclude sentinel always yields excludes `["*"]`, regardless of any
//!   includes configured for the same replica.
//!
//! # Errors
//!
//! [`CatalogError`] covers unknown peers (via the topology tables), missing
//! default refinements, missing prefixes, and invalid glob patterns at
//! construction.
//!
//! # Examples
//!
//! ```
//! use catalog::{Catalog, Patterns};
//! use topology::{MountConvention, MountConventions, Network, Peer};
//!
//! let network = Network::new(
//!     vec![Peer::host("basalt", vec![], vec![])],
//!     Default::default(),
//!     MountConventions::new(Some(MountConvention::Direct), None),
//! )
//! .unwrap();
//!
//! let catalog = Catalog::builder()
//!     .host_default_refinement("home")
//!     .refinement_prefix("home", "$HOME")
//!     .excludes("basalt/home", Patterns::List(vec!["*.tmp".into()]))
//!     .build()
//!     .unwrap();
//!
//! let replica = catalog.resolve("basalt", &network).unwrap();
//! assert_eq!(replica.id().to_string(), "basalt/home");
//! assert_eq!(replica.prefix(), "$HOME");
//! assert_eq!(replica.working_set().excludes(), ["*.tmp"]);
//! ```
//!
//! # See also
//!
//! - `topology` for peer classification and alias handling.
//! - `plan` for how prefixes and working sets end up in a transfer plan.

mod catalog;
mod error;
mod replica;
mod working_set;

pub use catalog::{Catalog, CatalogBuilder};
pub use error::CatalogError;
pub use replica::{Replica, ReplicaId};
pub use working_set::{Patterns, WorkingSet};
