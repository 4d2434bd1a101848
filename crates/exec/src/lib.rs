#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `exec` provides the execution contexts the planner and executor speak
//! through. A [`Session`] is bound to one peer and offers exactly two
//! capabilities: expanding a path string through that peer's shell and
//! running a command there. [`LocalSession`] wraps `sh -c` on the invoking
//! node; [`SshSession`] reaches a remote host through the system `ssh`
//! binary. The [`SessionFactory`] maps a resolved
//! [`Connection`](topology::Connection) to the right implementation.
//!
//! # Design
//!
//! Path expansion is deliberately shell-based: the configured replica
//! prefixes may contain `$HOME`-style placeholders whose values only the
//! *owning* side knows, so expansion must happen where the path will be
//! used, not where the planner runs. Both session kinds expand by running
//! `echo "<path>"` and taking the first line of stdout.
//!
//! [`Session::run`] captures output rather than streaming it. A non-zero
//! exit status is not an error at this layer; callers inspect
//! [`Output::status`](std::process::Output) themselves, because some
//! commands (`diff`, notably) use non-zero statuses as ordinary answers.
//!
//! # Invariants
//!
//! - Sessions hold no open connection state; every call spawns a fresh
//!   process, so a `Session` is cheap to create and safe to drop at any
//!   point.
//! - [`SessionFactory`] never produces a session for
//!   [`Connection::Impossible`](topology::Connection); the planner rejects
//!   such pairs before any session is requested.
//!
//! # Errors
//!
//! [`SessionError`] covers spawn failures, expansion that yields no usable
//! path, and the unreachable-connection guard.
//!
//! # Examples
//!
//! ```
//! use exec::{LocalSession, Session};
//!
//! let session = LocalSession;
//! let expanded = session.expand("/tmp/incoming")?;
//! assert_eq!(expanded, "/tmp/incoming");
//! # Ok::<(), exec::SessionError>(())
//! ```
//!
//! # See also
//!
//! - `plan` calls [`Session::expand`] while resolving endpoint paths.
//! - `cli` runs the rendered transfer command through [`Session::run`].

mod error;
mod factory;
mod local;
mod session;
mod ssh;

pub use error::SessionError;
pub use factory::{SessionFactory, SessionProvider};
pub use local::LocalSession;
pub use session::Session;
pub use ssh::SshSession;
