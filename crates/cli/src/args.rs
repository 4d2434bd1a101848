//! Argument parsing for the `oc-sync` binary.
//!
//! The command is assembled by hand with clap's generated help and version
//! output disabled; [`HELP_TEXT`] keeps the option listing in one place and
//! in a stable order. Parsing reads nothing from the environment, so tests
//! can drive [`parse_args`] with plain vectors.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::OsStringValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command};

/// Help output, printed verbatim for `-h` and `--help`.
pub(crate) const HELP_TEXT: &str = concat!(
    "oc-sync ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Plan and run rsync transfers between replicas of a synchronized file tree.\n",
    "\n",
    "Usage: oc-sync [OPTIONS] SRC TARGET\n",
    "       oc-sync --list-syncs\n",
    "       oc-sync (--list-backups | --diff-backups | --prune-backups) REPLICA\n",
    "\n",
    "Replicas are written PEER or PEER/REFINEMENT, where PEER is a host, drive,\n",
    "or alias from the configured network and REFINEMENT names one of the\n",
    "peer's subtrees. A bare peer uses its configured default refinement.\n",
    "\n",
    "Options:\n",
    "  -h, --help             Show this help message and exit.\n",
    "  -V, --version          Show version information and exit.\n",
    "  -v                     Increase log verbosity (repeat for more detail).\n",
    "      --config PATH      Read configuration from PATH instead of\n",
    "                         ~/.config/oc-sync/config.toml.\n",
    "      --node NAME        Plan as if running on node NAME instead of the\n",
    "                         detected hostname.\n",
    "      --sync NAME        Start from the named sync preset.\n",
    "      --list-syncs       List the built-in sync presets and exit.\n",
    "  -n, --dry-run          Ask rsync to rehearse without changing files.\n",
    "      --plan-only        Print the plan and exit without running anything.\n",
    "  -y, --yes              Skip the confirmation prompt.\n",
    "\n",
    "Sync switches (each overrides presets and configured policy):\n",
    "      --inject           Only update files the target already has.\n",
    "      --no-inject        Also create files missing from the target.\n",
    "      --clobber          Overwrite target files even when they are newer.\n",
    "      --no-clobber       Keep target files that are newer than the source.\n",
    "      --clean            Delete target files removed from the source.\n",
    "      --no-clean         Keep target files removed from the source.\n",
    "      --prune            Also delete target files the filters exclude.\n",
    "      --no-prune         Keep target files the filters exclude.\n",
    "\n",
    "Transport switches:\n",
    "      --compress, --no-compress\n",
    "                         Force transfer compression on or off.\n",
    "      --backup, --no-backup\n",
    "                         Keep renamed copies of replaced target files.\n",
    "      --create-target, --no-create-target\n",
    "                         Create the target directory before the transfer.\n",
    "\n",
    "Backup maintenance (mutually exclusive, no SRC/TARGET operands):\n",
    "      --list-backups REPLICA\n",
    "                         List backup copies left on a replica.\n",
    "      --diff-backups REPLICA\n",
    "                         Diff each backup copy against its original.\n",
    "      --prune-backups REPLICA\n",
    "                         Delete backup copies left on a replica.\n",
);

/// Everything the command line said, decoded but not yet validated.
///
/// Paired switches decode to `Option<bool>`: `None` when neither spelling
/// appeared, otherwise the side that appeared last.
#[derive(Debug)]
pub(crate) struct ParsedArgs {
    pub show_help: bool,
    pub show_version: bool,
    pub verbosity: u8,
    pub config: Option<PathBuf>,
    pub node: Option<String>,
    pub sync_preset: Option<String>,
    pub list_syncs: bool,
    pub dry_run: bool,
    pub plan_only: bool,
    pub assume_yes: bool,
    pub inject: Option<bool>,
    pub clobber: Option<bool>,
    pub clean: Option<bool>,
    pub prune: Option<bool>,
    pub compress: Option<bool>,
    pub backup: Option<bool>,
    pub create_target: Option<bool>,
    pub list_backups: Option<String>,
    pub diff_backups: Option<String>,
    pub prune_backups: Option<String>,
    pub replicas: Vec<String>,
}

fn switch_pair(command: Command, on: &'static str, off: &'static str) -> Command {
    command
        .arg(
            Arg::new(on)
                .long(on)
                .action(ArgAction::SetTrue)
                .overrides_with(off),
        )
        .arg(
            Arg::new(off)
                .long(off)
                .action(ArgAction::SetTrue)
                .overrides_with(on),
        )
}

fn clap_command() -> Command {
    let command = Command::new("oc-sync")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new("verbose").short('v').action(ArgAction::Count))
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_parser(OsStringValueParser::new()),
        )
        .arg(Arg::new("node").long("node").value_name("NAME"))
        .arg(Arg::new("sync").long("sync").value_name("NAME"))
        .arg(
            Arg::new("list-syncs")
                .long("list-syncs")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .short('n')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("plan-only")
                .long("plan-only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("yes")
                .long("yes")
                .short('y')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-backups")
                .long("list-backups")
                .value_name("REPLICA"),
        )
        .arg(
            Arg::new("diff-backups")
                .long("diff-backups")
                .value_name("REPLICA"),
        )
        .arg(
            Arg::new("prune-backups")
                .long("prune-backups")
                .value_name("REPLICA"),
        )
        .arg(
            Arg::new("replicas")
                .num_args(0..)
                .value_name("REPLICA"),
        );

    let command = switch_pair(command, "inject", "no-inject");
    let command = switch_pair(command, "clobber", "no-clobber");
    let command = switch_pair(command, "clean", "no-clean");
    let command = switch_pair(command, "prune", "no-prune");
    let command = switch_pair(command, "compress", "no-compress");
    let command = switch_pair(command, "backup", "no-backup");
    switch_pair(command, "create-target", "no-create-target")
}

fn switch_state(matches: &ArgMatches, on: &str, off: &str) -> Option<bool> {
    if matches.get_flag(on) {
        Some(true)
    } else if matches.get_flag(off) {
        Some(false)
    } else {
        None
    }
}

/// Parses the raw argument vector.
///
/// # Errors
///
/// Returns the clap error for unknown flags, missing option values, and
/// malformed input; the caller renders it and exits with the usage code.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut raw: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if raw.is_empty() {
        // clap treats the first element as the binary name.
        raw.push(OsString::from("oc-sync"));
    }
    let matches = clap_command().try_get_matches_from(raw)?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        verbosity: matches.get_count("verbose"),
        config: matches.get_one::<OsString>("config").map(PathBuf::from),
        node: matches.get_one::<String>("node").cloned(),
        sync_preset: matches.get_one::<String>("sync").cloned(),
        list_syncs: matches.get_flag("list-syncs"),
        dry_run: matches.get_flag("dry-run"),
        plan_only: matches.get_flag("plan-only"),
        assume_yes: matches.get_flag("yes"),
        inject: switch_state(&matches, "inject", "no-inject"),
        clobber: switch_state(&matches, "clobber", "no-clobber"),
        clean: switch_state(&matches, "clean", "no-clean"),
        prune: switch_state(&matches, "prune", "no-prune"),
        compress: switch_state(&matches, "compress", "no-compress"),
        backup: switch_state(&matches, "backup", "no-backup"),
        create_target: switch_state(&matches, "create-target", "no-create-target"),
        list_backups: matches.get_one::<String>("list-backups").cloned(),
        diff_backups: matches.get_one::<String>("diff-backups").cloned(),
        prune_backups: matches.get_one::<String>("prune-backups").cloned(),
        replicas: matches
            .get_many::<String>("replicas")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    })
}
