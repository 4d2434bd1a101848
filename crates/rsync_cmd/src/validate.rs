use policy::{Encryption, SyncSpec};

/// Policy selections rsync has no spelling for.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InvalidSyncSpec {
    /// Remote transfers already ride SSH; a separate in-stream encryption
    /// layer cannot be expressed as an rsync flag.
    #[error("rsync already transports over ssh; `encryption = \"{0}\"` has no rsync equivalent")]
    UnsupportedEncryption(Encryption),
}

/// Checks that rsync can express every part of `spec`.
///
/// Runs before planning so an unsupported policy fails without resolving
/// a single endpoint.
///
/// # Errors
///
/// Returns [`InvalidSyncSpec::UnsupportedEncryption`] for any explicit
/// encryption selection other than `none`.
pub fn validate_sync_spec(spec: &SyncSpec) -> Result<(), InvalidSyncSpec> {
    match spec.transport.encryption {
        Encryption::None => Ok(()),
        Encryption::Inline => Err(InvalidSyncSpec::UnsupportedEncryption(Encryption::Inline)),
    }
}
