use catalog::WorkingSet;
use policy::{Backup, Compression, SyncSpec};

/// One canonical transfer option.
///
/// Names describe behavior, not any tool's flag spelling; the transfer-tool
/// adapter owns the mapping to argv tokens. Payload-carrying variants hold
/// the glob verbatim from the working set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlanOption {
    /// Recursive copy preserving metadata.
    Archive,
    /// Verbose progress reporting.
    Verbose,
    /// Human-readable sizes.
    HumanReadable,
    /// Per-file change itemization.
    Itemized,
    /// End-of-run statistics.
    Stats,
    /// Report changes without applying them.
    DryRun,
    /// Compress data in transit.
    Compress,
    /// Keep a renamed copy of every file the transfer would overwrite or
    /// delete.
    Backup,
    /// Use the fixed backup suffix for renamed copies.
    BackupSuffix,
    /// Skip files that are newer on the target.
    Update,
    /// Only touch files the target already has.
    Existing,
    /// Delete target files the source no longer has.
    DeleteRemoved,
    /// Also delete target files the working set excludes.
    DeleteExcluded,
    /// Include entry from the target's working set.
    Include(String),
    /// Exclude entry from the target's working set.
    Exclude(String),
}

/// Baseline options every plan starts with, in order.
const BASELINE: [PlanOption; 5] = [
    PlanOption::Archive,
    PlanOption::Verbose,
    PlanOption::HumanReadable,
    PlanOption::Itemized,
    PlanOption::Stats,
];

/// Compiles a policy into the canonical ordered option list.
///
/// The order is fixed: baseline, dry-run, compress, backup (with suffix),
/// update, existing, delete-removed, delete-excluded, then the target
/// working set's includes followed by its excludes in configured order.
/// Identical inputs always produce identical lists.
///
/// Callers resolve [`Compression::Auto`] by endpoint locality before
/// compiling; an unresolved `auto` reaching this table behaves like `none`
/// and adds no flag.
#[must_use]
pub fn compile_options(spec: &SyncSpec, target_working_set: &WorkingSet) -> Vec<PlanOption> {
    let mut options = Vec::from(BASELINE);

    if spec.transport.dry_run {
        options.push(PlanOption::DryRun);
    }
    if spec.transport.compression == Compression::Native {
        options.push(PlanOption::Compress);
    }
    if spec.transport.backup == Backup::Rename {
        options.push(PlanOption::Backup);
        options.push(PlanOption::BackupSuffix);
    }
    if !spec.sync.clobber {
        options.push(PlanOption::Update);
    }
    if spec.sync.inject {
        options.push(PlanOption::Existing);
    }
    if spec.sync.clean {
        options.push(PlanOption::DeleteRemoved);
    }
    if spec.sync.prune {
        options.push(PlanOption::DeleteExcluded);
    }

    for glob in target_working_set.includes() {
        options.push(PlanOption::Include(glob.clone()));
    }
    for glob in target_working_set.excludes() {
        options.push(PlanOption::Exclude(glob.clone()));
    }

    options
}

#[cfg(test)]
mod tests {
    use catalog::WorkingSet;
    use policy::{Backup, Compression, SyncSpec};
    use proptest::prelude::*;

    use super::{BASELINE, PlanOption, compile_options};

    fn empty_set() -> WorkingSet {
        WorkingSet::new(Vec::new(), Vec::new())
    }

    #[test]
    fn defaults_compile_to_baseline_plus_update() {
        let mut spec = SyncSpec::default();
        spec.transport.compression = Compression::None;

        let options = compile_options(&spec, &empty_set());

        let mut expected = Vec::from(BASELINE);
        expected.push(PlanOption::Update);
        assert_eq!(options, expected);
    }

    #[test]
    fn renaming_backup_adds_flag_and_suffix_together() {
        let mut spec = SyncSpec::default();
        spec.transport.compression = Compression::None;
        spec.transport.backup = Backup::Rename;

        let options = compile_options(&spec, &empty_set());
        let backup_at = options
            .iter()
            .position(|option| *option == PlanOption::Backup)
            .unwrap();
        assert_eq!(options[backup_at + 1], PlanOption::BackupSuffix);
    }

    #[test]
    fn ordered_scenario_from_policy_to_options() {
        // clobber=false, clean=true, prune=false, backup=rename,
        // compression=native.
        let mut spec = SyncSpec::default();
        spec.sync.clean = true;
        spec.transport.backup = Backup::Rename;
        spec.transport.compression = Compression::Native;

        let options = compile_options(&spec, &empty_set());

        let mut expected = Vec::from(BASELINE);
        expected.extend([
            PlanOption::Compress,
            PlanOption::Backup,
            PlanOption::BackupSuffix,
            PlanOption::Update,
            PlanOption::DeleteRemoved,
        ]);
        assert_eq!(options, expected);
    }

    #[test]
    fn clobber_suppresses_update() {
        let mut spec = SyncSpec::default();
        spec.transport.compression = Compression::None;
        spec.sync.clobber = true;

        let options = compile_options(&spec, &empty_set());
        assert!(!options.contains(&PlanOption::Update));
    }

    #[test]
    fn working_set_appends_includes_then_excludes() {
        let mut spec = SyncSpec::default();
        spec.transport.compression = Compression::None;
        let working_set = WorkingSet::new(
            vec!["projects/**".into(), "notes/**".into()],
            vec!["*.tmp".into()],
        );

        let options = compile_options(&spec, &working_set);

        assert_eq!(
            &options[options.len() - 3..],
            &[
                PlanOption::Include("projects/**".into()),
                PlanOption::Include("notes/**".into()),
                PlanOption::Exclude("*.tmp".into()),
            ]
        );
    }

    #[test]
    fn unresolved_auto_adds_no_compress_flag() {
        let spec = SyncSpec::default();
        assert!(!compile_options(&spec, &empty_set()).contains(&PlanOption::Compress));
    }

    proptest! {
        #[test]
        fn compilation_is_deterministic(
            inject in any::<bool>(),
            clobber in any::<bool>(),
            clean in any::<bool>(),
            prune in any::<bool>(),
            dry_run in any::<bool>(),
            native in any::<bool>(),
            rename in any::<bool>(),
        ) {
            let mut spec = SyncSpec::default();
            spec.sync.inject = inject;
            spec.sync.clobber = clobber;
            spec.sync.clean = clean;
            spec.sync.prune = prune;
            spec.transport.dry_run = dry_run;
            spec.transport.compression =
                if native { Compression::Native } else { Compression::None };
            spec.transport.backup = if rename { Backup::Rename } else { Backup::None };

            let working_set =
                WorkingSet::new(vec!["kept/**".into()], vec!["*".into()]);

            let first = compile_options(&spec, &working_set);
            prop_assert_eq!(&first, &compile_options(&spec, &working_set));
            prop_assert_eq!(&first[..5], &BASELINE);
        }
    }
}
