//! Writing catalog settings into user.js
//!
//! [`apply`] appends one `user_pref(...)` directive per selected setting,
//! after taking a backup of the current file. Settings whose value is already
//! in effect are skipped, so applying the same category twice leaves the file
//! unchanged the second time.

use crate::backup::{self, BackupOutcome};
use crate::catalog::{Catalog, PrefSetting};
use crate::error::{Error, Result};
use crate::parser::{effective_values, parse_user_js, parse_user_js_file};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Summary of one [`apply`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub backup: BackupOutcome,
    /// Directives appended to the file
    pub written: usize,
    /// Settings left out because their value was already in effect
    pub skipped: usize,
    /// Every setting that was requested, duplicates removed, in catalog order
    pub requested: Vec<PrefSetting>,
}

/// Append the settings of `categories` to the override file at `target`
///
/// Categories are written in catalog order regardless of the order they are
/// given in. Unknown names are rejected before the file is touched. An
/// existing file is copied to its backup slot first and then opened for
/// append; existing lines are kept as they are.
///
/// # Example
///
/// ```rust,no_run
/// use ffopt::{apply, Catalog};
/// use std::path::Path;
///
/// let report = apply(
///     &Catalog::builtin(),
///     &["Security Improvements"],
///     Path::new("/home/me/.mozilla/firefox/abcd.default/user.js"),
/// )?;
/// println!("{} settings written", report.written);
/// # Ok::<(), ffopt::Error>(())
/// ```
pub fn apply(catalog: &Catalog, categories: &[&str], target: &Path) -> Result<ApplyReport> {
    if categories.is_empty() {
        return Err(Error::EmptySelection);
    }
    for name in categories {
        catalog.entries_for(name)?;
    }

    let requested = collect_settings(catalog, categories);

    let backup_path = backup::backup_path(target);
    let backup = backup::backup(target, &backup_path).map_err(|e| match e {
        Error::Io(source) => write_error(&backup_path, source),
        other => other,
    })?;

    let existing = match fs::read(target) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(write_error(target, e)),
    };

    let pending: Vec<&PrefSetting> = match existing.as_deref().map(std::str::from_utf8) {
        Some(Ok(content)) => match parse_user_js(content) {
            Ok(entries) => {
                let effective = effective_values(&entries);
                requested
                    .iter()
                    .filter(|s| !effective.get(s.key).is_some_and(|v| s.value.matches(v)))
                    .collect()
            }
            Err(e) => {
                tracing::warn!(
                    path = %target.display(),
                    error = %e,
                    "existing override file could not be parsed, appending every setting"
                );
                requested.iter().collect()
            }
        },
        Some(Err(e)) => {
            tracing::warn!(
                path = %target.display(),
                error = %e,
                "existing override file is not valid UTF-8, appending every setting"
            );
            requested.iter().collect()
        }
        None => requested.iter().collect(),
    };

    let mut text = String::new();
    if existing
        .as_deref()
        .is_some_and(|b| b.last().is_some_and(|&last| last != b'\n'))
    {
        text.push('\n');
    }
    for setting in &pending {
        text.push_str(&setting.directive());
        text.push('\n');
    }

    let written = pending.len();
    let skipped = requested.len() - written;

    if written > 0 || existing.is_none() {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(target)
            .map_err(|e| write_error(target, e))?;
        file.write_all(text.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| write_error(target, e))?;
    }

    tracing::info!(
        path = %target.display(),
        written,
        skipped,
        "settings applied"
    );

    Ok(ApplyReport {
        backup,
        written,
        skipped,
        requested,
    })
}

/// Settings that are not in effect in the override file at `target`
///
/// An empty result means every setting was verified. The file must exist and
/// parse; otherwise the parse or I/O error is returned.
pub fn verify(target: &Path, settings: &[PrefSetting]) -> Result<Vec<PrefSetting>> {
    let entries = parse_user_js_file(target)?;
    let effective = effective_values(&entries);

    Ok(settings
        .iter()
        .filter(|s| !effective.get(s.key).is_some_and(|v| s.value.matches(v)))
        .copied()
        .collect())
}

/// Flatten the selected categories in catalog order, first occurrence of a key wins
fn collect_settings(catalog: &Catalog, categories: &[&str]) -> Vec<PrefSetting> {
    let mut seen = HashSet::new();
    catalog
        .categories()
        .iter()
        .filter(|c| categories.contains(&c.name))
        .flat_map(|c| c.entries.iter())
        .filter(|s| seen.insert(s.key))
        .copied()
        .collect()
}

fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source,
    }
}
