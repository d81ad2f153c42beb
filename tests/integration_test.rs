// Integration tests for applying, backing up and restoring user.js
use ffopt::{
    apply, backup, check_for_update, parse_user_js, reset, restore, BackupOutcome, Catalog,
    Category, Error, Menu, OverrideFiles, PrefLiteral, PrefSetting, PrefValue, Result, Target,
    UpdateStatus, VersionSource,
};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

const PRIVACY_ONLY: &[Category] = &[Category {
    name: "Privacy",
    entries: &[
        PrefSetting {
            key: "privacy.trackingprotection.enabled",
            value: PrefLiteral::Bool(true),
            description: "Enable tracking protection",
        },
        PrefSetting {
            key: "network.cookie.cookieBehavior",
            value: PrefLiteral::Int(1),
            description: "Block third-party cookies",
        },
    ],
}];

struct FixedVersion(&'static str);

impl VersionSource for FixedVersion {
    fn latest_version(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct Offline;

impl VersionSource for Offline {
    fn latest_version(&self) -> Result<String> {
        Err(Error::CheckFailed("network unreachable".to_string()))
    }
}

fn profile() -> (TempDir, OverrideFiles) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let files = OverrideFiles::for_profile(dir.path());
    (dir, files)
}

#[test]
fn test_apply_privacy_to_new_file() {
    let (_dir, files) = profile();

    apply(&Catalog::new(PRIVACY_ONLY), &["Privacy"], &files.user_js).expect("apply failed");

    let content = fs::read_to_string(&files.user_js).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"user_pref("privacy.trackingprotection.enabled", true);"#,
            r#"user_pref("network.cookie.cookieBehavior", 1);"#,
        ]
    );
}

#[test]
fn test_apply_builtin_category_matches_catalog() {
    let (_dir, files) = profile();
    let catalog = Catalog::builtin();

    for name in catalog.category_names() {
        apply(&catalog, &[name], &files.user_js).unwrap();
        let expected = catalog.entries_for(name).unwrap();

        let parsed = parse_user_js(&fs::read_to_string(&files.user_js).unwrap()).unwrap();
        let tail = &parsed[parsed.len() - expected.len()..];
        for (entry, setting) in tail.iter().zip(expected) {
            assert_eq!(entry.key, setting.key);
            assert!(setting.value.matches(&entry.value));
        }

        reset(&files.user_js).unwrap();
    }
}

#[test]
fn test_backup_restore_single_slot() {
    let (_dir, files) = profile();

    fs::write(&files.user_js, "A").unwrap();
    assert_eq!(
        backup(&files.user_js, &files.backup).unwrap(),
        BackupOutcome::Created
    );

    fs::write(&files.user_js, "B").unwrap();
    restore(&files.backup, &files.user_js).unwrap();
    assert_eq!(fs::read_to_string(&files.user_js).unwrap(), "A");

    fs::write(&files.user_js, "B").unwrap();
    backup(&files.user_js, &files.backup).unwrap();
    fs::write(&files.user_js, "C").unwrap();
    restore(&files.backup, &files.user_js).unwrap();
    assert_eq!(fs::read_to_string(&files.user_js).unwrap(), "B");
}

#[test]
fn test_reset_from_any_state() {
    let (_dir, files) = profile();

    reset(&files.user_js).unwrap();
    assert!(!files.user_js.exists());

    fs::write(&files.user_js, "user_pref(\"a\", 1);\n").unwrap();
    reset(&files.user_js).unwrap();
    assert!(!files.user_js.exists());
}

#[test]
fn test_apply_backs_up_previous_content() {
    let (_dir, files) = profile();
    fs::write(&files.user_js, "user_pref(\"browser.startup.page\", 3);\n").unwrap();

    let report = apply(&Catalog::new(PRIVACY_ONLY), &["Privacy"], &files.user_js).unwrap();

    assert_eq!(report.backup, BackupOutcome::Created);
    assert_eq!(
        fs::read_to_string(&files.backup).unwrap(),
        "user_pref(\"browser.startup.page\", 3);\n"
    );
    let parsed = parse_user_js(&fs::read_to_string(&files.user_js).unwrap()).unwrap();
    assert_eq!(parsed[0].value, PrefValue::Integer(3));
    assert_eq!(parsed.len(), 3);
}

#[test]
fn test_check_for_update_scenarios() {
    assert_eq!(
        check_for_update(&FixedVersion("2.1"), "2.0"),
        UpdateStatus::UpdateAvailable("2.1".to_string())
    );
    assert_eq!(
        check_for_update(&FixedVersion("2.0"), "2.0"),
        UpdateStatus::UpToDate
    );
    assert!(matches!(
        check_for_update(&Offline, "2.0"),
        UpdateStatus::CheckFailed(_)
    ));
}

fn run_menu(input: &str, targets: Vec<Target>, updates: &dyn VersionSource) -> String {
    let mut menu = Menu::new(
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
        Catalog::new(PRIVACY_ONLY),
        targets,
        updates,
    )
    .with_local_version("2.0");
    menu.run().expect("menu failed");
    String::from_utf8(menu.into_output()).unwrap()
}

fn target(files: &OverrideFiles) -> Target {
    Target {
        label: "test-profile".to_string(),
        files: files.clone(),
    }
}

#[test]
fn test_menu_apply_flow() {
    let (_dir, files) = profile();

    let output = run_menu("1\ny\n1\nq\n", vec![target(&files)], &Offline);

    assert!(output.contains("1. Privacy (2 settings)"));
    assert!(output.contains("2 settings written, 0 already in place"));
    assert!(output.contains("successfully applied and verified"));
    assert!(output.contains("Exiting Firefox Optimizer."));
    assert_eq!(fs::read_to_string(&files.user_js).unwrap().lines().count(), 2);
}

#[test]
fn test_menu_apply_declined_or_back() {
    let (_dir, files) = profile();

    run_menu("1\nn\n1\ny\nb\nq\n", vec![target(&files)], &Offline);

    assert!(!files.user_js.exists());
}

#[test]
fn test_menu_invalid_category_reprompts() {
    let (_dir, files) = profile();

    let output = run_menu("1\ny\n7\nx\n0\nq\n", vec![target(&files)], &Offline);

    assert!(output.contains("Invalid selection. Please choose valid category numbers (got 7)."));
    assert!(output.contains("Invalid input."));
    assert!(files.user_js.exists());
}

#[test]
fn test_menu_errors_do_not_stop_loop() {
    let (_dir, files) = profile();

    let output = run_menu("3\n9\n5\nq\n", vec![target(&files)], &Offline);

    assert!(output.contains("Failed to restore settings for profile test-profile: No backup found"));
    assert!(output.contains("Invalid choice."));
    assert!(output.contains("Failed to check for updates"));
    assert!(output.contains("Exiting Firefox Optimizer."));
}

#[test]
fn test_menu_backup_reset_restore() {
    let (_dir, files) = profile();
    fs::write(&files.user_js, "user_pref(\"a\", 1);\n").unwrap();

    let output = run_menu("2\n4\n3\n5\n", vec![target(&files)], &FixedVersion("2.1"));

    assert!(output.contains("Backup created for profile: test-profile"));
    assert!(output.contains("user.js removed"));
    assert!(output.contains("Settings restored from backup"));
    assert!(output.contains("A new version (2.1) is available."));
    assert_eq!(
        fs::read_to_string(&files.user_js).unwrap(),
        "user_pref(\"a\", 1);\n"
    );
}

#[test]
fn test_menu_eof_exits_cleanly() {
    let output = run_menu("", Vec::new(), &Offline);
    assert!(output.contains("Exiting Firefox Optimizer."));
}
