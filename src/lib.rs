//! # ffopt - Firefox Optimizer Library
//!
//! This library applies curated privacy, security and performance
//! preferences to a Firefox profile by writing `user_pref(...)` directives
//! into the profile's `user.js` override file. It also keeps a single backup
//! of that file, restores it, resets it, and checks whether a newer ffopt
//! release exists.
//!
//! ## Features
//!
//! - A built-in catalog of settings grouped into categories
//! - Append-only writes to `user.js` with an automatic backup beforehand
//! - Settings already in effect are skipped, so re-applying is harmless
//! - Read-back verification using a parser for the `user.js` grammar
//! - Profile discovery through `profiles.ini` (including Snap installs)
//! - An interactive menu usable over any reader/writer pair
//!
//! ## Quick Start
//!
//! ### Applying a Category
//!
//! ```rust,no_run
//! use ffopt::{apply, verify, Catalog, OverrideFiles};
//! use std::path::Path;
//!
//! let files = OverrideFiles::for_profile(Path::new("/home/me/.mozilla/firefox/abcd.default"));
//! let report = apply(&Catalog::builtin(), &["Privacy Enhancements"], &files.user_js)?;
//!
//! let missing = verify(&files.user_js, &report.requested)?;
//! assert!(missing.is_empty());
//! # Ok::<(), ffopt::Error>(())
//! ```
//!
//! ### Backup and Restore
//!
//! ```rust,no_run
//! use ffopt::{backup, restore, OverrideFiles};
//! use std::path::Path;
//!
//! let files = OverrideFiles::for_profile(Path::new("/home/me/.mozilla/firefox/abcd.default"));
//! backup(&files.user_js, &files.backup)?;
//! // ... edit user.js ...
//! restore(&files.backup, &files.user_js)?;
//! # Ok::<(), ffopt::Error>(())
//! ```
//!
//! ### Listing Profiles
//!
//! ```rust,no_run
//! use ffopt::list_profiles;
//!
//! for profile in list_profiles(None)? {
//!     println!("{} -> {}", profile.name, profile.path.display());
//! }
//! # Ok::<(), ffopt::Error>(())
//! ```
//!
//! ## Override File Format
//!
//! Each setting becomes one line:
//!
//! ```text
//! user_pref("privacy.resistFingerprinting", true);
//! user_pref("security.tls.version.min", 3);
//! user_pref("extensions.formautofill.available", "off");
//! ```
//!
//! ## Error Handling
//!
//! All fallible functions return [`Result<T, Error>`]:
//!
//! ```rust
//! use ffopt::{Catalog, Error};
//!
//! match Catalog::builtin().entries_for("Turbo Mode") {
//!     Ok(entries) => println!("{} settings", entries.len()),
//!     Err(Error::UnknownCategory(name)) => eprintln!("no such category: {}", name),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

pub use types::{PrefEntry, PrefLiteral, PrefType, PrefValue};

pub use error::{Error, Result};

pub use catalog::{Catalog, Category, PrefSetting};

pub use parser::{effective_values, parse_user_js, parse_user_js_file};

pub use writer::{apply, verify, ApplyReport};

pub use backup::{
    backup, backup_path, reset, restore, BackupOutcome, OverrideFiles, ResetOutcome,
    BACKUP_SUFFIX, USER_JS,
};

pub use update::{
    check_for_update, GithubReleases, UpdateStatus, VersionSource, DEFAULT_RELEASES_URL, VERSION,
};

pub use profile::{find_profile_path, get_profiles_directories, list_profiles, ProfileInfo};

pub use menu::{
    parse_category_selection, parse_main_choice, CategorySelection, MainChoice, Menu,
    SelectionError, Target,
};

// All modules are private - use re-exports above for public API
mod backup;
mod catalog;
mod error;
mod lexer;
mod menu;
mod parser;
mod profile;
mod types;
mod update;
mod writer;
