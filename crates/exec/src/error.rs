use std::io;

/// Failure while creating or talking to an execution context.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The underlying process could not be spawned at all.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        /// Program that failed to start (`sh` or `ssh`).
        program: &'static str,
        /// The spawn failure.
        #[source]
        source: io::Error,
    },
    /// The expansion command ran but did not yield a usable path.
    #[error("expanding `{path}` failed: {detail}")]
    Expansion {
        /// Path string handed to the shell.
        path: String,
        /// What went wrong, including any stderr the shell produced.
        detail: String,
    },
    /// A session was requested for a peer with no route.
    #[error("no session exists for an unreachable peer")]
    Unreachable,
}
