use plan::{PlanOption, TransferPlan};

/// Suffix rsync appends to files preserved by the backup flag.
///
/// The maintenance commands in this crate match on the same constant, so
/// renaming it cannot orphan existing backups silently.
pub const BACKUP_SUFFIX: &str = ".oc-sync-backup";

/// Spells one canonical option as an rsync argv token.
#[must_use]
pub fn option_token(option: &PlanOption) -> String {
    match option {
        PlanOption::Archive => "--archive".to_owned(),
        PlanOption::Verbose => "--verbose".to_owned(),
        PlanOption::HumanReadable => "--human-readable".to_owned(),
        PlanOption::Itemized => "--itemize-changes".to_owned(),
        PlanOption::Stats => "--stats".to_owned(),
        PlanOption::DryRun => "--dry-run".to_owned(),
        PlanOption::Compress => "--compress".to_owned(),
        PlanOption::Backup => "--backup".to_owned(),
        PlanOption::BackupSuffix => format!("--suffix={BACKUP_SUFFIX}"),
        PlanOption::Update => "--update".to_owned(),
        PlanOption::Existing => "--existing".to_owned(),
        PlanOption::DeleteRemoved => "--delete".to_owned(),
        PlanOption::DeleteExcluded => "--delete-excluded".to_owned(),
        PlanOption::Include(glob) => format!("--include={glob}"),
        PlanOption::Exclude(glob) => format!("--exclude={glob}"),
    }
}

/// Renders the complete rsync invocation for a plan.
///
/// Token order is the plan's option order; endpoints render themselves as
/// bare paths or `user@host:path` addresses.
#[must_use]
pub fn render(plan: &TransferPlan) -> String {
    let tokens: Vec<String> = plan.options().iter().map(option_token).collect();
    format!(
        "rsync {} {} {}",
        tokens.join(" "),
        plan.src(),
        plan.target()
    )
}

/// Command creating the target directory ahead of the transfer, when the
/// plan asks for it. Runs on the target side's own context, so the bare
/// target path is always the right spelling.
#[must_use]
pub fn create_target_command(plan: &TransferPlan) -> Option<String> {
    plan.create_target()
        .then(|| format!("mkdir -p {}", plan.target().path()))
}

#[cfg(test)]
mod tests {
    use plan::PlanOption;

    use super::{BACKUP_SUFFIX, option_token};

    #[test]
    fn unit_options_spell_their_rsync_flags() {
        assert_eq!(option_token(&PlanOption::Archive), "--archive");
        assert_eq!(option_token(&PlanOption::Itemized), "--itemize-changes");
        assert_eq!(option_token(&PlanOption::Update), "--update");
        assert_eq!(option_token(&PlanOption::Existing), "--existing");
        assert_eq!(option_token(&PlanOption::DeleteRemoved), "--delete");
        assert_eq!(
            option_token(&PlanOption::DeleteExcluded),
            "--delete-excluded"
        );
    }

    #[test]
    fn suffix_token_carries_the_fixed_suffix() {
        assert_eq!(
            option_token(&PlanOption::BackupSuffix),
            format!("--suffix={BACKUP_SUFFIX}")
        );
        assert!(BACKUP_SUFFIX.starts_with('.'));
    }

    #[test]
    fn filter_tokens_embed_the_glob() {
        assert_eq!(
            option_token(&PlanOption::Include("projects/**".into())),
            "--include=projects/**"
        );
        assert_eq!(
            option_token(&PlanOption::Exclude("*.tmp".into())),
            "--exclude=*.tmp"
        );
    }
}
