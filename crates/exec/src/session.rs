use std::process::Output;

use crate::error::SessionError;

/// One peer's execution context.
///
/// Implementations differ only in *where* the shell runs; the contract is
/// identical. Commands always go through a POSIX shell on the session's
/// side, so quoting and variable references behave the same locally and
/// remotely.
pub trait Session: std::fmt::Debug {
    /// Runs `command` through the context's shell and captures its output.
    ///
    /// A non-zero exit status is reported inside the returned
    /// [`Output`], not as an error; only a failure to launch the shell at
    /// all errors here.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Launch`] when the underlying process cannot
    /// be spawned.
    fn run(&self, command: &str) -> Result<Output, SessionError>;

    /// Expands shell placeholders in `path` on this context.
    ///
    /// Runs `echo "<path>"` and returns the first stdout line, trimmed.
    /// The shell on the session's side owns the variable values, so
    /// `$HOME` in a configured prefix means the *peer's* home, not the
    /// planner's.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Expansion`] when the shell exits non-zero
    /// or produces no output, and [`SessionError::Launch`] when it cannot
    /// be spawned.
    fn expand(&self, path: &str) -> Result<String, SessionError> {
        let output = self.run(&format!("echo \"{path}\""))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SessionError::Expansion {
                path: path.to_owned(),
                detail: format!(
                    "shell exited with {}: {}",
                    output.status,
                    stderr.trim_end()
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let expanded = stdout.lines().next().unwrap_or("").trim();
        if expanded.is_empty() {
            return Err(SessionError::Expansion {
                path: path.to_owned(),
                detail: "expansion produced no output".to_owned(),
            });
        }
        Ok(expanded.to_owned())
    }
}
