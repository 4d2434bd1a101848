use std::fmt;

use serde::Deserialize;

/// Protocol-agnostic synchronization behavior switches.
///
/// The four switches are orthogonal; presets are just named combinations.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SyncPolicy {
    /// Only update files that already exist on the target; add nothing new.
    pub inject: bool,
    /// Overwrite regardless of modification times.
    pub clobber: bool,
    /// Delete target files that were removed from the source.
    pub clean: bool,
    /// Delete target files that the working set excludes.
    pub prune: bool,
}

/// Compression selection for the transfer stream.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Compression {
    /// Never compress.
    None,
    /// Decide by endpoint locality at plan time: local pairs skip
    /// compression, anything crossing a network link compresses.
    #[default]
    Auto,
    /// Use the transfer tool's own compression.
    Native,
}

impl Compression {
    /// Resolves `Auto` against endpoint locality; explicit selections pass
    /// through unchanged.
    #[must_use]
    pub const fn resolve(self, both_local: bool) -> Self {
        match self {
            Self::Auto => {
                if both_local {
                    Self::None
                } else {
                    Self::Native
                }
            }
            Self::None | Self::Native => self,
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Auto => "auto",
            Self::Native => "native",
        })
    }
}

/// Encryption selection for the transfer stream.
///
/// Remote transfers already ride an SSH channel; this selects *additional*
/// in-stream encryption, which no current adapter provides. Anything but
/// `None` fails adapter validation before a plan is built.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Encryption {
    /// No in-stream encryption.
    #[default]
    None,
    /// Encrypt the stream inside the transport.
    Inline,
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Inline => "inline",
        })
    }
}

/// What happens to target files a transfer would overwrite or delete.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Backup {
    /// Overwritten files are simply replaced.
    #[default]
    None,
    /// Overwritten files are renamed aside with the tool's backup suffix.
    Rename,
}

impl fmt::Display for Backup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Rename => "rename",
        })
    }
}

/// Transport-level behavior for one transfer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransportPolicy {
    /// Compression selection.
    pub compression: Compression,
    /// Encryption selection.
    pub encryption: Encryption,
    /// Backup behavior for overwritten target files.
    pub backup: Backup,
    /// Plan and report without moving data.
    pub dry_run: bool,
    /// Create the target directory before transferring into it.
    pub create_target: bool,
}

impl Default for TransportPolicy {
    /// Built-in hard defaults: auto compression, no encryption, no backups,
    /// live run, and target creation on.
    fn default() -> Self {
        Self {
            compression: Compression::Auto,
            encryption: Encryption::None,
            backup: Backup::None,
            dry_run: false,
            create_target: true,
        }
    }
}

/// One fully-resolved synchronization intent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SyncSpec {
    /// Synchronization behavior switches.
    pub sync: SyncPolicy,
    /// Transport behavior.
    pub transport: TransportPolicy,
}
