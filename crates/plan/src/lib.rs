#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `plan` turns a resolved replica pair and a compiled policy into a
//! [`TransferPlan`]: the execution side, both endpoint addresses with
//! their paths expanded, and the canonical ordered option list. The plan
//! is tool-agnostic; spelling the options as actual transfer-tool flags is
//! the adapter's job.
//!
//! # Design
//!
//! [`plan_transfer`] works in a strict order. Reachability first: both
//! endpoints are classified against the invoking node and an
//! [`Connection::Impossible`](topology::Connection) answer on either side
//! aborts before any session exists, so an unreachable pair never causes
//! so much as a path expansion. Then the execution side: the command runs
//! on the source side except in the one pull-shaped case where only the
//! target is local. Then paths: each replica's prefix is joined onto its
//! peer's mount prefix and expanded by a session *on that replica's own
//! side*, because only the owning side knows its environment. Last the
//! option list, with `auto` compression resolved by endpoint locality
//! before the policy table is consulted.
//!
//! Endpoint rendering is relative: the executing side addresses itself by
//! bare path, and addresses the far side as `user@host:path` only when the
//! far side is on a different `(host, user)`. Two replicas on the same
//! remote account therefore produce an entirely host-local command that
//! happens to run over SSH.
//!
//! # Invariants
//!
//! - No session is opened before both endpoints pass the reachability
//!   check.
//! - Identical inputs yield identical plans; option order is fixed and
//!   documented on [`compile_options`].
//! - The option table never sees `auto` compression from
//!   [`plan_transfer`].
//!
//! # Errors
//!
//! [`PlanError`] aggregates the plan-time taxonomy: topology and catalog
//! failures pass through transparently, unreachable pairs and session
//! failures are reported with the endpoint that caused them.
//!
//! # Examples
//!
//! ```
//! use catalog::Catalog;
//! use exec::SessionFactory;
//! use plan::{ExecutionSide, plan_transfer};
//! use policy::SyncSpec;
//! use rustc_hash::FxHashMap;
//! use topology::{MountConvention, MountConventions, Network, Peer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let network = Network::new(
//!     vec![
//!         Peer::host("anchor", vec![], vec!["anchor.lan".into()]),
//!         Peer::drive("pocket", vec![]),
//!     ],
//!     FxHashMap::default(),
//!     MountConventions::new(
//!         Some(MountConvention::Direct),
//!         Some(MountConvention::Root("/media".into())),
//!     ),
//! )?;
//! let catalog = Catalog::builder()
//!     .host_default_refinement("main")
//!     .drive_default_refinement("main")
//!     .prefix("anchor/main", "/srv/library")
//!     .prefix("pocket/main", "library")
//!     .build()?;
//!
//! let src = catalog.resolve("anchor", &network)?;
//! let target = catalog.resolve("pocket", &network)?;
//! let plan = plan_transfer(
//!     &network,
//!     &SessionFactory,
//!     &src,
//!     &target,
//!     SyncSpec::default(),
//!     "anchor.lan",
//! )?;
//!
//! assert_eq!(plan.side(), ExecutionSide::Source);
//! assert_eq!(plan.src().to_string(), "/srv/library");
//! assert_eq!(plan.target().to_string(), "/media/pocket/library");
//! # Ok(())
//! # }
//! ```
//!
//! # See also
//!
//! - `rsync_cmd` renders a [`TransferPlan`] into an rsync invocation.
//! - `exec` supplies the sessions used for path expansion here and for
//!   running the rendered command later.

mod endpoint;
mod error;
mod options;
mod transfer;

pub use endpoint::{Endpoint, ExecutionSide};
pub use error::PlanError;
pub use options::{PlanOption, compile_options};
pub use transfer::{TransferPlan, plan_transfer, resolve_endpoint};
