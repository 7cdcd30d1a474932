//! Info checks and formatting helpers.

mod common;

use hostsman::backup::BackupStore;
use hostsman::doctor;

#[test]
fn format_size_units() {
    assert_eq!(doctor::format_size(0), "0 B");
    assert_eq!(doctor::format_size(512), "512 B");
    assert_eq!(doctor::format_size(1024), "1 KB");
    assert_eq!(doctor::format_size(1536), "1.5 KB");
    assert_eq!(doctor::format_size(1_048_576), "1 MB");
}

#[test]
fn info_for_existing_file() {
    let dir = common::temp_home();
    let path = common::write_hosts(dir.path(), "127.0.0.1 localhost\n");
    let info = doctor::hosts_file_info(&path);
    assert!(info.exists);
    assert!(info.readable);
    assert_eq!(info.size, 20);
    assert!(info.modified.is_some());
}

#[test]
fn missing_hosts_file_fails_check() {
    let dir = common::temp_home();
    let store = BackupStore::new(dir.path().join("backups"));
    let results = doctor::run_checks(&dir.path().join("missing"), &store, 10).unwrap();
    assert_eq!(results.len(), 1);
    assert!(!results[0].ok);
    assert!(!doctor::hosts_file_info(&dir.path().join("missing")).exists);
}

#[test]
fn conflicting_enabled_mappings_are_reported() {
    let dir = common::temp_home();
    let path = common::write_hosts(
        dir.path(),
        "127.0.0.1 localhost\n::1 localhost\n10.0.0.1 api.test\n10.0.0.2 api.test\n# 10.0.0.3 api.test\n",
    );
    let store = BackupStore::new(dir.path().join("backups"));
    let results = doctor::run_checks(&path, &store, 10).unwrap();

    let failures: Vec<_> = results.iter().filter(|r| !r.ok).collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].message.contains("api.test"));
    assert!(results
        .iter()
        .any(|r| r.message.contains("5 entries (4 enabled, 1 disabled)")));
}
