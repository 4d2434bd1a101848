use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::error::SessionError;
use crate::session::Session;

/// Execution context on a remote host, reached through the system `ssh`
/// binary.
///
/// `BatchMode=yes` is forced so a missing key or host verification failure
/// surfaces as a command failure instead of a hung prompt. The command
/// string travels as a single remote argument and is interpreted by the
/// remote login shell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SshSession {
    host: String,
    user: String,
}

impl SshSession {
    /// Creates a session that dials `user@host`.
    #[must_use]
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
        }
    }

    /// The `user@host` address this session dials.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

impl Session for SshSession {
    fn run(&self, command: &str) -> Result<Output, SessionError> {
        debug!(
            target: "oc_sync::exec",
            host = %self.host,
            user = %self.user,
            command,
            "running remote command"
        );
        let mut ssh = Command::new("ssh");
        ssh.args(["-o", "BatchMode=yes", "-l", &self.user, &self.host, command]);
        ssh.stdin(Stdio::null());
        ssh.output().map_err(|source| SessionError::Launch {
            program: "ssh",
            source,
        })
    }
}
