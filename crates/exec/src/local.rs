use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::error::SessionError;
use crate::session::Session;

/// Execution context on the invoking node itself.
///
/// Commands run through `sh -c` with stdin closed; nothing at this layer
/// is interactive.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSession;

impl Session for LocalSession {
    fn run(&self, command: &str) -> Result<Output, SessionError> {
        debug!(target: "oc_sync::exec", command, "running local command");
        let mut shell = Command::new("sh");
        shell.args(["-c", command]);
        shell.stdin(Stdio::null());
        shell.output().map_err(|source| SessionError::Launch {
            program: "sh",
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::LocalSession;
    use crate::session::Session;

    #[test]
    fn run_captures_stdout_and_status() {
        let output = LocalSession.run("printf 'one\\ntwo'").unwrap();
        assert!(output.status.success());
        assert_eq!(output.stdout, b"one\ntwo");
    }

    #[test]
    fn run_reports_nonzero_status_as_output() {
        let output = LocalSession.run("exit 7").unwrap();
        assert_eq!(output.status.code(), Some(7));
    }

    #[test]
    fn expand_leaves_plain_paths_alone() {
        let expanded = LocalSession.expand("/tmp/incoming").unwrap();
        assert_eq!(expanded, "/tmp/incoming");
    }

    #[test]
    fn expand_resolves_environment_placeholders() {
        let expanded = LocalSession.expand("$HOME/scratch").unwrap();
        assert!(!expanded.contains('$'));
        assert!(expanded.ends_with("/scratch"));
    }

    #[test]
    fn expand_keeps_only_the_first_line() {
        // A path with an embedded newline would otherwise smuggle a second
        // line into the endpoint.
        let expanded = LocalSession.expand("/tmp/a\nb").unwrap();
        assert_eq!(expanded, "/tmp/a");
    }

    #[test]
    fn expand_rejects_empty_results() {
        let err = LocalSession.expand("$oc_sync_unset_variable_e2a7").unwrap_err();
        assert!(err.to_string().contains("produced no output"));
    }
}
