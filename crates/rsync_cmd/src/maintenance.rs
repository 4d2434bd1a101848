use crate::command::BACKUP_SUFFIX;

/// `find` invocation printing every backup under `path`.
#[must_use]
pub fn list_backups_command(path: &str) -> String {
    format!("find {path} -name \"*{BACKUP_SUFFIX}\" -print")
}

/// `diff` between the file a backup preserved and the backup itself.
///
/// Returns `None` when `backup_path` does not end in the backup suffix;
/// callers feeding lines from the list command can treat that as a line to
/// skip rather than an error.
#[must_use]
pub fn diff_backup_command(backup_path: &str) -> Option<String> {
    let original = backup_path.strip_suffix(BACKUP_SUFFIX)?;
    if original.is_empty() {
        return None;
    }
    Some(format!("diff {original} {backup_path}"))
}

/// `find -delete` invocation removing every backup under `path`.
///
/// Destructive; the caller is expected to show the command and confirm
/// before running it.
#[must_use]
pub fn prune_backups_command(path: &str) -> String {
    format!("find {path} -name \"*{BACKUP_SUFFIX}\" -delete")
}
