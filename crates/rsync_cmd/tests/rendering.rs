//! Full-pipeline rendering: canned fixtures through planning into the
//! final rsync command string.

use plan::plan_transfer;
use policy::{Backup, Compression, SyncSpec};
use rsync_cmd::{create_target_command, render};
use test_support::{ScriptedSessions, sample_catalog, sample_network};

const INVOKER: &str = "basalt.lan";

fn plan_with(spec: SyncSpec, src: &str, target: &str) -> plan::TransferPlan {
    let network = sample_network();
    let catalog = sample_catalog();
    let src = catalog.resolve(src, &network).unwrap();
    let target = catalog.resolve(target, &network).unwrap();
    plan_transfer(
        &network,
        &ScriptedSessions::new(),
        &src,
        &target,
        spec,
        INVOKER,
    )
    .unwrap()
}

#[test]
fn update_with_backup_renders_in_canonical_order() {
    // clobber=false, clean=true, prune=false, backup=rename,
    // compression=native: compress, then backup with its suffix, then
    // update, then delete-removed, in exactly that order.
    let mut spec = SyncSpec::default();
    spec.sync.clean = true;
    spec.transport.backup = Backup::Rename;
    spec.transport.compression = Compression::Native;

    let command = render(&plan_with(spec, "basalt", "quartz/tree"));

    assert_eq!(
        command,
        "rsync --archive --verbose --human-readable --itemize-changes --stats \
         --compress --backup --suffix=.oc-sync-backup --update --delete \
         --include=projects/** --include=notes/** --exclude=*.tmp \
         /home/alice alice@quartz.example.net:/home/alice/depot/tree"
    );
}

#[test]
fn local_pair_renders_bare_paths_without_compress() {
    let mut spec = SyncSpec::default();
    spec.transport.compression = Compression::Auto;

    let command = render(&plan_with(spec, "basalt", "flint"));

    assert_eq!(
        command,
        "rsync --archive --verbose --human-readable --itemize-changes --stats \
         --update /home/alice /media/alice/flint/alice"
    );
}

#[test]
fn pull_renders_remote_source_first() {
    let command = render(&plan_with(SyncSpec::default(), "quartz/tree", "basalt"));

    assert!(command.starts_with("rsync --archive"));
    assert!(command.ends_with(
        "alice@quartz.example.net:/home/alice/depot/tree /home/alice"
    ));
}

#[test]
fn dry_run_lands_directly_after_the_baseline() {
    let mut spec = SyncSpec::default();
    spec.transport.dry_run = true;

    let command = render(&plan_with(spec, "basalt", "flint"));
    assert!(command.contains("--stats --dry-run --update"));
}

#[test]
fn rendering_is_deterministic() {
    let first = render(&plan_with(SyncSpec::default(), "basalt", "quartz/tree"));
    let second = render(&plan_with(SyncSpec::default(), "basalt", "quartz/tree"));
    assert_eq!(first, second);
}

#[test]
fn create_target_command_uses_the_bare_target_path() {
    let plan = plan_with(SyncSpec::default(), "basalt", "quartz/tree");
    assert_eq!(
        create_target_command(&plan).unwrap(),
        "mkdir -p /home/alice/depot/tree"
    );

    let mut spec = SyncSpec::default();
    spec.transport.create_target = false;
    let plan = plan_with(spec, "basalt", "quartz/tree");
    assert_eq!(create_target_command(&plan), None);
}
