//! Firefox profile discovery
//!
//! Profiles are read from `profiles.ini`. On Linux both the regular and the
//! Snap location are searched, so a machine with both installs gets every
//! profile listed.

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A profile entry from profiles.ini, with its directory resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileInfo {
    pub name: String,
    /// Absolute profile directory
    pub path: PathBuf,
    pub is_default: bool,
    pub is_relative: bool,
}

/// List every profile whose directory exists
///
/// Profiles listed in profiles.ini but missing on disk are skipped with a
/// warning. Fails only when no profiles.ini could be found at all.
pub fn list_profiles(profiles_dir_opt: Option<&Path>) -> Result<Vec<ProfileInfo>> {
    let mut profiles = Vec::new();
    let mut found_ini = false;

    for dir in get_profiles_directories(profiles_dir_opt)? {
        let ini_path = dir.join("profiles.ini");
        if !ini_path.exists() {
            continue;
        }
        found_ini = true;

        let content = std::fs::read_to_string(&ini_path)?;
        for profile in parse_profiles_ini(&content, &dir)? {
            if profile.path.is_dir() {
                profiles.push(profile);
            } else {
                tracing::warn!(
                    profile = %profile.name,
                    path = %profile.path.display(),
                    "profile directory does not exist, skipping"
                );
            }
        }
    }

    if !found_ini {
        return Err(Error::ProfilesIniParse(
            "no profiles.ini found; Firefox may not be installed".to_string(),
        ));
    }

    Ok(profiles)
}

/// Find a profile directory by its profiles.ini name or directory name
///
/// Matching order: exact `Name=`, exact directory name, then a directory
/// ending in `.<name>` (Firefox's `xxxxxxxx.name` convention).
pub fn find_profile_path(profile_name: &str, profiles_dir_opt: Option<&Path>) -> Result<PathBuf> {
    let profiles = list_profiles(profiles_dir_opt)?;

    if let Some(p) = profiles.iter().find(|p| p.name == profile_name) {
        return Ok(p.path.clone());
    }

    let dir_name = |p: &ProfileInfo| {
        p.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    if let Some(p) = profiles.iter().find(|p| dir_name(p) == profile_name) {
        return Ok(p.path.clone());
    }

    let suffix = format!(".{}", profile_name);
    let matches: Vec<&ProfileInfo> = profiles
        .iter()
        .filter(|p| dir_name(p).ends_with(&suffix))
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.path.clone()),
        _ => Err(Error::ProfileNotFound {
            name: profile_name.to_string(),
            directory: get_profiles_directories(profiles_dir_opt)?
                .into_iter()
                .next()
                .unwrap_or_default(),
        }),
    }
}

/// Parse `[Profile*]` sections of a profiles.ini body
///
/// Relative paths are resolved against `base_dir`.
pub fn parse_profiles_ini(content: &str, base_dir: &Path) -> Result<Vec<ProfileInfo>> {
    use configparser::ini::Ini;

    let mut ini = Ini::new();
    ini.read(content.to_string())
        .map_err(Error::ProfilesIniParse)?;

    let mut profiles = Vec::new();

    // configparser lowercases section names; order by profile number so
    // profile10 comes after profile2
    let mut sections: Vec<(u32, String)> = ini
        .sections()
        .into_iter()
        .filter_map(|name| {
            let index = name.strip_prefix("profile")?.parse().ok()?;
            Some((index, name))
        })
        .collect();
    sections.sort();

    for (_, sec_name) in sections {
        let name = ini.get(&sec_name, "Name").unwrap_or_default();
        let path_str = ini.get(&sec_name, "Path").unwrap_or_default();
        if path_str.is_empty() {
            continue;
        }

        let is_relative = ini
            .getuint(&sec_name, "IsRelative")
            .ok()
            .flatten()
            .unwrap_or(1)
            == 1;
        let is_default = ini
            .getuint(&sec_name, "Default")
            .ok()
            .flatten()
            .unwrap_or(0)
            == 1;

        let path = if is_relative {
            base_dir.join(&path_str)
        } else {
            PathBuf::from(&path_str)
        };

        profiles.push(ProfileInfo {
            name,
            path,
            is_default,
            is_relative,
        });
    }

    Ok(profiles)
}

/// Directories that may hold a profiles.ini
///
/// A manual path (the CLI's `--profiles-dir` or `MOZ_PROFILES_DIR`) must be
/// an existing directory and is the only candidate; otherwise the platform
/// defaults are returned.
pub fn get_profiles_directories(manual_path: Option<&Path>) -> Result<Vec<PathBuf>> {
    if let Some(path) = manual_path {
        return validate_profiles_dir(path).map(|p| vec![p]);
    }

    default_profiles_directories()
}

fn validate_profiles_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(Error::InvalidProfileDirectory(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

fn home_dir() -> Result<PathBuf> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| Error::ProfilesIniParse("HOME environment variable not set".to_string()))
}

fn default_profiles_directories() -> Result<Vec<PathBuf>> {
    #[cfg(target_os = "linux")]
    {
        let home = home_dir()?;
        Ok(vec![
            home.join(".mozilla/firefox"),
            home.join("snap/firefox/common/.mozilla/firefox"),
        ])
    }

    #[cfg(target_os = "macos")]
    {
        Ok(vec![home_dir()?.join("Library/Application Support/Firefox")])
    }

    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA").map_err(|_| {
            Error::ProfilesIniParse("APPDATA environment variable not set".to_string())
        })?;
        Ok(vec![PathBuf::from(appdata).join("Mozilla").join("Firefox")])
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        Ok(vec![home_dir()?.join(".mozilla/firefox")])
    }
}
