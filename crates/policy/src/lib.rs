#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `policy` models *what* a synchronization should do, separate from how any
//! transfer tool spells it. A [`SyncSpec`] couples the [`SyncPolicy`]
//! switches (inject, clobber, clean, prune) with the [`TransportPolicy`]
//! (compression, encryption, backup, dry-run, target creation). The crate's
//! job is [`compile`]: folding the configured layers into one concrete spec
//! for an ordered (source, target) replica pair.
//!
//! # Design
//!
//! Layering runs low to high precedence, each layer a per-field overwrite:
//!
//! 1. built-in hard defaults ([`SyncSpec::default`]),
//! 2. the image-wide default layer from configuration,
//! 3. the first matching pair override, probing directional
//!    `(src, target)`, then symmetric `(src, target)`, then symmetric
//!    `(target, src)`; first hit wins and later keys are never consulted,
//! 4. caller overrides (command-line flags and presets), which always win.
//!
//! Layers are [`PolicyLayer`] values: every field an `Option`, `None`
//! meaning "no opinion". Merging never combines values; a later `Some`
//! replaces the field outright.
//!
//! [`PRESETS`] carries the six named [`SyncPolicy`] bundles (`safe` through
//! `colonize`) that the command line exposes; a preset is just a fully
//! populated sync layer applied at the caller level.
//!
//! # Invariants
//!
//! - [`compile`] is total: any combination of layers yields a valid
//!   [`SyncSpec`]; validation against a transfer tool's capabilities happens
//!   in the tool adapter, not here.
//! - Pair lookup is first-match, never a merge of multiple matching keys.
//!
//! # Examples
//!
//! ```
//! use policy::{Compression, PairOverrides, PolicyLayer, compile};
//!
//! let image = PolicyLayer::default();
//! let pairs = PairOverrides::default();
//! let mut cli = PolicyLayer::default();
//! cli.sync.clean = Some(true);
//!
//! let spec = compile("basalt/home", "flint/user", &image, &pairs, &cli);
//! assert!(spec.sync.clean);
//! assert!(!spec.sync.prune);
//! assert_eq!(spec.transport.compression, Compression::Auto);
//! ```
//!
//! # See also
//!
//! - `plan` resolves `Compression::Auto` by endpoint locality and turns the
//!   compiled spec into a canonical option list.
//! - `rsync_cmd` validates a compiled spec against what rsync supports.

mod compile;
mod layer;
mod pairs;
mod presets;
mod spec;

pub use compile::compile;
pub use layer::{PolicyLayer, SyncOverride, TransportOverride};
pub use pairs::{Direction, PairOverrides, PairingKey};
pub use presets::{PRESETS, Preset, UnknownPreset, preset};
pub use spec::{Backup, Compression, Encryption, SyncPolicy, SyncSpec, TransportPolicy};
