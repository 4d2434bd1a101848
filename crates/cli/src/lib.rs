#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Command-line frontend for `oc-sync`.
//!
//! # Overview
//!
//! The frontend wires the whole pipeline together: parse arguments, load
//! the TOML configuration, compile the layered sync policy, plan the
//! transfer, render the rsync command, and dispatch it over the right
//! session after a confirmation prompt. The binary is a thin wrapper
//! around [`run`], which takes the argument vector and both output streams
//! so tests can drive the complete frontend in memory.
//!
//! # Exit codes
//!
//! | code | meaning |
//! |-----:|---------|
//! | 0 | requested operation completed |
//! | 1 | the command line did not parse |
//! | 2 | configuration missing or invalid, or no node identity |
//! | 3 | planning failed: unknown replica, unreachable peer, bad policy |
//! | 4 | rsync or a maintenance command failed |
//! | 5 | declined (or unable to ask) at the confirmation prompt |
//!
//! # Design
//!
//! Modes are mutually exclusive: `--list-syncs`, the three backup
//! maintenance flags, and the SRC TARGET transfer form. Usage problems are
//! reported before the configuration file is read, and every run prints
//! the exact command it is about to execute before executing it;
//! `--plan-only` stops right there.
//!
//! # See also
//!
//! - [`plan`] for endpoint resolution and execution-side choice
//! - [`rsync_cmd`] for command rendering
//! - [`policy`] for the layering rules the switches feed into

mod args;
mod config;
mod identity;
mod logging;
mod prompt;

use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use exec::{Session, SessionFactory, SessionProvider};
use policy::{Backup, Compression, PolicyLayer};
use topology::Connection;
use tracing::info;

use crate::args::ParsedArgs;
use crate::config::Configured;
use crate::prompt::Confirmation;

/// Process exit codes, one per failure class.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum ExitCode {
    /// The requested operation completed.
    Success = 0,
    /// The command line did not parse or named an unknown preset.
    Usage = 1,
    /// The configuration is missing or invalid, or the local node could
    /// not be determined.
    Config = 2,
    /// Planning failed: unknown replica, unreachable peer, or a sync spec
    /// rsync cannot express.
    Plan = 3,
    /// rsync or a maintenance command could not run or exited nonzero.
    Execution = 4,
    /// The operator declined the confirmation prompt, or there was no
    /// terminal to ask on.
    Aborted = 5,
}

impl ExitCode {
    /// The numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Runs the frontend against an argument vector and explicit streams.
///
/// The first element of `arguments` is the binary name, as in
/// [`std::env::args_os`]. Returns the process exit code; see the crate
/// docs for the table.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match args::parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            return ExitCode::Usage.code();
        }
    };
    logging::init(parsed.verbosity);
    execute(parsed, stdout, stderr)
}

#[derive(Clone, Copy, Debug)]
enum Maintenance {
    List,
    Diff,
    Prune,
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let ParsedArgs {
        show_help,
        show_version,
        verbosity: _,
        config,
        node,
        sync_preset,
        list_syncs,
        dry_run,
        plan_only,
        assume_yes,
        inject,
        clobber,
        clean,
        prune,
        compress,
        backup,
        create_target,
        list_backups,
        diff_backups,
        prune_backups,
        replicas,
    } = parsed;

    if show_help {
        if stdout.write_all(args::HELP_TEXT.as_bytes()).is_err() {
            return ExitCode::Usage.code();
        }
        return ExitCode::Success.code();
    }
    if show_version {
        let _ = writeln!(stdout, "oc-sync {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::Success.code();
    }
    if list_syncs {
        for preset in &policy::PRESETS {
            let _ = writeln!(stdout, "{:<14} {}", preset.name(), preset.summary());
        }
        return ExitCode::Success.code();
    }

    let maintenance = match (list_backups, diff_backups, prune_backups) {
        (None, None, None) => None,
        (Some(spec), None, None) => Some((Maintenance::List, spec)),
        (None, Some(spec), None) => Some((Maintenance::Diff, spec)),
        (None, None, Some(spec)) => Some((Maintenance::Prune, spec)),
        _ => {
            report(
                stderr,
                "--list-backups, --diff-backups, and --prune-backups are mutually exclusive",
            );
            return ExitCode::Usage.code();
        }
    };

    if let Some((op, spec)) = maintenance {
        if !replicas.is_empty() {
            report(stderr, "backup maintenance takes no SRC/TARGET operands");
            return ExitCode::Usage.code();
        }
        let Some((configured, node)) = load_environment(config, node, stderr) else {
            return ExitCode::Config.code();
        };
        return run_maintenance(
            op, &spec, &configured, &node, plan_only, assume_yes, stdout, stderr,
        );
    }

    if replicas.len() != 2 {
        report(
            stderr,
            format_args!("expected SRC and TARGET replicas, got {}", replicas.len()),
        );
        return ExitCode::Usage.code();
    }

    let mut caller = match sync_preset.as_deref() {
        Some(name) => match policy::preset(name) {
            Ok(preset) => preset.as_layer(),
            Err(error) => {
                report(stderr, error);
                return ExitCode::Usage.code();
            }
        },
        None => PolicyLayer::default(),
    };
    if let Some(choice) = inject {
        caller.sync.inject = Some(choice);
    }
    if let Some(choice) = clobber {
        caller.sync.clobber = Some(choice);
    }
    if let Some(choice) = clean {
        caller.sync.clean = Some(choice);
    }
    if let Some(choice) = prune {
        caller.sync.prune = Some(choice);
    }
    if let Some(choice) = compress {
        caller.transport.compression = Some(if choice {
            Compression::Native
        } else {
            Compression::None
        });
    }
    if let Some(choice) = backup {
        caller.transport.backup = Some(if choice { Backup::Rename } else { Backup::None });
    }
    if let Some(choice) = create_target {
        caller.transport.create_target = Some(choice);
    }
    if dry_run {
        caller.transport.dry_run = Some(true);
    }

    let Some((configured, node)) = load_environment(config, node, stderr) else {
        return ExitCode::Config.code();
    };
    run_transfer(
        &replicas[0],
        &replicas[1],
        &caller,
        &configured,
        &node,
        plan_only,
        assume_yes,
        stdout,
        stderr,
    )
}

/// Loads the configuration and settles the invoking node, reporting any
/// failure. All three failure kinds share the configuration exit code.
fn load_environment<Err>(
    config: Option<PathBuf>,
    node: Option<String>,
    stderr: &mut Err,
) -> Option<(Configured, String)>
where
    Err: Write,
{
    let path = match config.map_or_else(config::default_path, Ok) {
        Ok(path) => path,
        Err(error) => {
            report(stderr, error);
            return None;
        }
    };
    let configured = match config::load(&path) {
        Ok(configured) => configured,
        Err(error) => {
            report(stderr, error);
            return None;
        }
    };
    let node = match node.or_else(identity::discover) {
        Some(node) => node,
        None => {
            report(stderr, "cannot determine the local node; pass --node");
            return None;
        }
    };
    Some((configured, node))
}

#[allow(clippy::too_many_arguments)]
fn run_transfer<Out, Err>(
    src_spec: &str,
    target_spec: &str,
    caller: &PolicyLayer,
    configured: &Configured,
    node: &str,
    plan_only: bool,
    assume_yes: bool,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    Out: Write,
    Err: Write,
{
    let src = match configured.catalog.resolve(src_spec, &configured.network) {
        Ok(replica) => replica,
        Err(error) => {
            report(stderr, error);
            return ExitCode::Plan.code();
        }
    };
    let target = match configured.catalog.resolve(target_spec, &configured.network) {
        Ok(replica) => replica,
        Err(error) => {
            report(stderr, error);
            return ExitCode::Plan.code();
        }
    };

    let spec = policy::compile(
        &src.id().to_string(),
        &target.id().to_string(),
        &configured.defaults,
        &configured.pairs,
        caller,
    );
    if let Err(error) = rsync_cmd::validate_sync_spec(&spec) {
        report(stderr, error);
        return ExitCode::Plan.code();
    }

    let sessions = SessionFactory;
    let plan = match plan::plan_transfer(&configured.network, &sessions, &src, &target, spec, node)
    {
        Ok(plan) => plan,
        Err(error) => {
            report(stderr, error);
            return ExitCode::Plan.code();
        }
    };
    let command = rsync_cmd::render(&plan);
    let prepare = rsync_cmd::create_target_command(&plan);

    let _ = writeln!(stdout, "sync {} -> {}", plan.src_id(), plan.target_id());
    let _ = writeln!(stdout, "  source   {}", plan.src());
    let _ = writeln!(stdout, "  target   {}", plan.target());
    let _ = writeln!(
        stdout,
        "  side     {} ({})",
        plan.side(),
        connection_label(plan.executing_connection())
    );
    if let Some(prepare) = &prepare {
        let _ = writeln!(stdout, "  prepare  {prepare}");
    }
    let _ = writeln!(stdout, "  command  {command}");
    if plan_only {
        return ExitCode::Success.code();
    }

    match prompt::confirm(stdout, assume_yes) {
        Confirmation::Proceed => {}
        Confirmation::Declined => {
            report(stderr, "aborted");
            return ExitCode::Aborted.code();
        }
        Confirmation::NotInteractive => {
            report(
                stderr,
                "stdin is not a terminal; pass --yes to run without confirming",
            );
            return ExitCode::Aborted.code();
        }
    }

    if let Some(prepare) = prepare {
        let code = dispatch(&sessions, plan.target_connection(), &prepare, stdout, stderr);
        if code != ExitCode::Success.code() {
            return code;
        }
    }
    let code = dispatch(
        &sessions,
        plan.executing_connection(),
        &command,
        stdout,
        stderr,
    );
    if code == ExitCode::Success.code() {
        info!(
            target: "oc_sync::cli",
            src = %plan.src_id(),
            target = %plan.target_id(),
            "transfer complete"
        );
    }
    code
}

#[allow(clippy::too_many_arguments)]
fn run_maintenance<Out, Err>(
    op: Maintenance,
    spec: &str,
    configured: &Configured,
    node: &str,
    plan_only: bool,
    assume_yes: bool,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    Out: Write,
    Err: Write,
{
    let replica = match configured.catalog.resolve(spec, &configured.network) {
        Ok(replica) => replica,
        Err(error) => {
            report(stderr, error);
            return ExitCode::Plan.code();
        }
    };

    let sessions = SessionFactory;
    let (connection, path) =
        match plan::resolve_endpoint(&configured.network, &sessions, &replica, node) {
            Ok(resolved) => resolved,
            Err(error) => {
                report(stderr, error);
                return ExitCode::Plan.code();
            }
        };

    let command = match op {
        Maintenance::List | Maintenance::Diff => rsync_cmd::list_backups_command(&path),
        Maintenance::Prune => rsync_cmd::prune_backups_command(&path),
    };
    let _ = writeln!(stdout, "on {}: {command}", connection_label(&connection));
    if plan_only {
        return ExitCode::Success.code();
    }

    if matches!(op, Maintenance::Prune) {
        match prompt::confirm(stdout, assume_yes) {
            Confirmation::Proceed => {}
            Confirmation::Declined => {
                report(stderr, "aborted");
                return ExitCode::Aborted.code();
            }
            Confirmation::NotInteractive => {
                report(
                    stderr,
                    "stdin is not a terminal; pass --yes to run without confirming",
                );
                return ExitCode::Aborted.code();
            }
        }
    }

    let session = match sessions.session(&connection) {
        Ok(session) => session,
        Err(error) => {
            report(stderr, error);
            return ExitCode::Execution.code();
        }
    };
    let output = match session.run(&command) {
        Ok(output) => output,
        Err(error) => {
            report(stderr, error);
            return ExitCode::Execution.code();
        }
    };
    let _ = stderr.write_all(&output.stderr);
    if !output.status.success() {
        let _ = stdout.write_all(&output.stdout);
        report(
            stderr,
            format_args!("maintenance command exited with {}", output.status),
        );
        return ExitCode::Execution.code();
    }

    match op {
        Maintenance::List | Maintenance::Prune => {
            let _ = stdout.write_all(&output.stdout);
            ExitCode::Success.code()
        }
        Maintenance::Diff => diff_each_backup(session.as_ref(), &output.stdout, stdout, stderr),
    }
}

fn diff_each_backup<Out, Err>(
    session: &dyn Session,
    listing: &[u8],
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    Out: Write,
    Err: Write,
{
    let text = String::from_utf8_lossy(listing);
    for backup in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let Some(command) = rsync_cmd::diff_backup_command(backup) else {
            continue;
        };
        let _ = writeln!(stdout, "--- {backup}");
        // diff exits 1 when the files differ; that is the answer, not a
        // failure, so statuses are not checked here.
        match session.run(&command) {
            Ok(output) => {
                let _ = stdout.write_all(&output.stdout);
                let _ = stderr.write_all(&output.stderr);
            }
            Err(error) => {
                report(stderr, error);
                return ExitCode::Execution.code();
            }
        }
    }
    ExitCode::Success.code()
}

/// Runs one command on the session for `connection`, forwarding its output.
fn dispatch<Out, Err>(
    sessions: &SessionFactory,
    connection: &Connection,
    command: &str,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    Out: Write,
    Err: Write,
{
    let session = match sessions.session(connection) {
        Ok(session) => session,
        Err(error) => {
            report(stderr, error);
            return ExitCode::Execution.code();
        }
    };
    let output = match session.run(command) {
        Ok(output) => output,
        Err(error) => {
            report(stderr, error);
            return ExitCode::Execution.code();
        }
    };
    let _ = stdout.write_all(&output.stdout);
    let _ = stderr.write_all(&output.stderr);
    if output.status.success() {
        ExitCode::Success.code()
    } else {
        report(
            stderr,
            format_args!("command exited with {}", output.status),
        );
        ExitCode::Execution.code()
    }
}

fn connection_label(connection: &Connection) -> String {
    match connection.remote() {
        Some(remote) => remote.to_string(),
        None => "local".to_string(),
    }
}

fn report<W, E>(stderr: &mut W, error: E)
where
    W: Write,
    E: fmt::Display,
{
    let _ = writeln!(stderr, "oc-sync: {error}");
}

#[cfg(test)]
mod tests {
    use super::{ExitCode, run};

    fn run_cli(arguments: &[&str]) -> (i32, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(arguments.iter().copied(), &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).expect("stdout is utf-8"),
            String::from_utf8(stderr).expect("stderr is utf-8"),
        )
    }

    #[test]
    fn help_prints_usage() {
        let (code, stdout, _) = run_cli(&["oc-sync", "--help"]);

        assert_eq!(code, 0);
        assert!(stdout.contains("Usage: oc-sync"));
        assert!(stdout.contains("--plan-only"));
    }

    #[test]
    fn version_prints_banner() {
        let (code, stdout, _) = run_cli(&["oc-sync", "--version"]);

        assert_eq!(code, 0);
        assert!(stdout.starts_with("oc-sync "));
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn list_syncs_names_every_preset() {
        let (code, stdout, _) = run_cli(&["oc-sync", "--list-syncs"]);

        assert_eq!(code, 0);
        for preset in &policy::PRESETS {
            assert!(stdout.contains(preset.name()), "missing {}", preset.name());
        }
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let (code, _, stderr) = run_cli(&["oc-sync", "--frobnicate"]);

        assert_eq!(code, ExitCode::Usage.code());
        assert!(!stderr.is_empty());
    }

    #[test]
    fn missing_operands_is_a_usage_error() {
        let (code, _, stderr) = run_cli(&["oc-sync"]);

        assert_eq!(code, ExitCode::Usage.code());
        assert!(stderr.contains("SRC and TARGET"));
    }

    #[test]
    fn three_operands_is_a_usage_error() {
        let (code, _, stderr) = run_cli(&["oc-sync", "a", "b", "c"]);

        assert_eq!(code, ExitCode::Usage.code());
        assert!(stderr.contains("got 3"));
    }

    #[test]
    fn maintenance_flags_are_mutually_exclusive() {
        let (code, _, stderr) = run_cli(&[
            "oc-sync",
            "--list-backups",
            "basalt",
            "--prune-backups",
            "quartz",
        ]);

        assert_eq!(code, ExitCode::Usage.code());
        assert!(stderr.contains("mutually exclusive"));
    }

    #[test]
    fn maintenance_rejects_transfer_operands() {
        let (code, _, stderr) = run_cli(&["oc-sync", "--list-backups", "basalt", "a", "b"]);

        assert_eq!(code, ExitCode::Usage.code());
        assert!(stderr.contains("no SRC/TARGET"));
    }

    #[test]
    fn unknown_preset_is_a_usage_error() {
        let (code, _, stderr) = run_cli(&["oc-sync", "--sync", "bogus", "a", "b"]);

        assert_eq!(code, ExitCode::Usage.code());
        assert!(stderr.contains("unknown sync preset"));
    }

    #[test]
    fn missing_config_is_a_config_error() {
        let (code, _, stderr) = run_cli(&[
            "oc-sync",
            "--config",
            "/nonexistent/oc-sync.toml",
            "a",
            "b",
        ]);

        assert_eq!(code, ExitCode::Config.code());
        assert!(stderr.contains("no configuration file"));
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Usage.code(), 1);
        assert_eq!(ExitCode::Config.code(), 2);
        assert_eq!(ExitCode::Plan.code(), 3);
        assert_eq!(ExitCode::Execution.code(), 4);
        assert_eq!(ExitCode::Aborted.code(), 5);
    }
}
