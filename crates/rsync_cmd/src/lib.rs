#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rsync_cmd` is the one place that knows rsync's flag spelling. It turns
//! a [`TransferPlan`](plan::TransferPlan) into the command line the
//! executing side will run, builds the backup-maintenance commands that
//! operate on the same suffix convention, and rejects policies rsync
//! cannot express before any planning happens.
//!
//! # Design
//!
//! Rendering is a pure mapping: every canonical
//! [`PlanOption`](plan::PlanOption) has exactly one argv token, and the
//! token order is the plan's option order. Nothing here inspects policy
//! semantics; that was the planner's job. The single policy check that
//! *is* rsync-specific, the encryption selection, lives in
//! [`validate_sync_spec`] so callers can fail fast before resolving
//! endpoints.
//!
//! # Invariants
//!
//! - [`render`] is deterministic for a given plan.
//! - Every command built here embeds [`BACKUP_SUFFIX`]; the transfer's
//!   `--suffix` flag and the maintenance `find` patterns can never drift
//!   apart.
//!
//! # Errors
//!
//! [`InvalidSyncSpec`] is the adapter's only error: the policy asks for
//! something rsync has no spelling for.
//!
//! # See also
//!
//! - `plan` produces the [`TransferPlan`](plan::TransferPlan) consumed
//!   here.
//! - `cli` prints the rendered command and runs it through an `exec`
//!   session.

mod command;
mod maintenance;
mod validate;

pub use command::{BACKUP_SUFFIX, create_target_command, option_token, render};
pub use maintenance::{diff_backup_command, list_backups_command, prune_backups_command};
pub use validate::{InvalidSyncSpec, validate_sync_spec};
