//! Backup slot, restore and reset for user.js
//!
//! Each override file owns exactly one backup slot: a sibling file with a
//! `.backup` suffix. Taking a new backup replaces the previous one.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the override file inside a Firefox profile
pub const USER_JS: &str = "user.js";

/// Suffix appended to the override file name to form the backup slot
pub const BACKUP_SUFFIX: &str = ".backup";

/// The override file and its backup slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideFiles {
    pub user_js: PathBuf,
    pub backup: PathBuf,
}

impl OverrideFiles {
    /// `user.js` and `user.js.backup` inside a profile directory
    pub fn for_profile(profile_dir: &Path) -> Self {
        Self::for_file(profile_dir.join(USER_JS))
    }

    /// An arbitrary override file; the backup slot sits next to it
    pub fn for_file(user_js: impl Into<PathBuf>) -> Self {
        let user_js = user_js.into();
        Self {
            backup: backup_path(&user_js),
            user_js,
        }
    }
}

/// Sibling backup path for an override file
pub fn backup_path(source: &Path) -> PathBuf {
    let mut name: OsString = source
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from(USER_JS));
    name.push(BACKUP_SUFFIX);
    source.with_file_name(name)
}

/// What a backup request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    /// The source was copied into the backup slot
    Created,
    /// There was no source file; the slot was left untouched
    NothingToBackup,
}

/// What a reset request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Removed,
    NotPresent,
}

/// Copy `source` into `backup_path`, replacing any earlier backup
///
/// A missing source is not an error: it yields
/// [`BackupOutcome::NothingToBackup`] and leaves an existing slot alone.
pub fn backup(source: &Path, backup_path: &Path) -> Result<BackupOutcome> {
    if !source.exists() {
        tracing::debug!(path = %source.display(), "nothing to back up");
        return Ok(BackupOutcome::NothingToBackup);
    }

    fs::copy(source, backup_path)?;
    tracing::info!(
        from = %source.display(),
        to = %backup_path.display(),
        "backup created"
    );
    Ok(BackupOutcome::Created)
}

/// Copy `backup_path` over `target`
pub fn restore(backup_path: &Path, target: &Path) -> Result<()> {
    if !backup_path.exists() {
        return Err(Error::NoBackupFound(backup_path.to_path_buf()));
    }

    fs::copy(backup_path, target)?;
    tracing::info!(
        from = %backup_path.display(),
        to = %target.display(),
        "override file restored"
    );
    Ok(())
}

/// Delete `target` if it exists; the backup slot is never touched
pub fn reset(target: &Path) -> Result<ResetOutcome> {
    match fs::remove_file(target) {
        Ok(()) => {
            tracing::info!(path = %target.display(), "override file removed");
            Ok(ResetOutcome::Removed)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ResetOutcome::NotPresent),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_files_for_profile() {
        let files = OverrideFiles::for_profile(Path::new("/home/u/.mozilla/firefox/x.default"));
        assert_eq!(
            files.user_js,
            PathBuf::from("/home/u/.mozilla/firefox/x.default/user.js")
        );
        assert_eq!(
            files.backup,
            PathBuf::from("/home/u/.mozilla/firefox/x.default/user.js.backup")
        );
    }

    #[test]
    fn test_backup_path_keeps_custom_name() {
        assert_eq!(
            backup_path(Path::new("/tmp/custom-overrides.js")),
            PathBuf::from("/tmp/custom-overrides.js.backup")
        );
    }

    #[test]
    fn test_backup_missing_source_is_skip() {
        let dir = TempDir::new().unwrap();
        let files = OverrideFiles::for_profile(dir.path());
        fs::write(&files.backup, "old").unwrap();

        let outcome = backup(&files.user_js, &files.backup).unwrap();

        assert_eq!(outcome, BackupOutcome::NothingToBackup);
        assert_eq!(fs::read_to_string(&files.backup).unwrap(), "old");
    }

    #[test]
    fn test_backup_then_restore() {
        let dir = TempDir::new().unwrap();
        let files = OverrideFiles::for_profile(dir.path());
        fs::write(&files.user_js, "A").unwrap();

        assert_eq!(
            backup(&files.user_js, &files.backup).unwrap(),
            BackupOutcome::Created
        );
        fs::write(&files.user_js, "B").unwrap();
        restore(&files.backup, &files.user_js).unwrap();

        assert_eq!(fs::read_to_string(&files.user_js).unwrap(), "A");
    }

    #[test]
    fn test_restore_without_backup() {
        let dir = TempDir::new().unwrap();
        let files = OverrideFiles::for_profile(dir.path());

        let err = restore(&files.backup, &files.user_js).unwrap_err();
        assert!(matches!(err, Error::NoBackupFound(ref p) if *p == files.backup));
    }

    #[test]
    fn test_reset_leaves_backup() {
        let dir = TempDir::new().unwrap();
        let files = OverrideFiles::for_profile(dir.path());
        fs::write(&files.user_js, "A").unwrap();
        fs::write(&files.backup, "A").unwrap();

        assert_eq!(reset(&files.user_js).unwrap(), ResetOutcome::Removed);
        assert!(!files.user_js.exists());
        assert!(files.backup.exists());
        assert_eq!(reset(&files.user_js).unwrap(), ResetOutcome::NotPresent);
    }
}
