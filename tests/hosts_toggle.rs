//! Toggling lines and entries between enabled and disabled.

use hostsman::hosts::{self, HostsError, HostsFile};

const SAMPLE: &str = "127.0.0.1 localhost\n# 10.0.0.5 api.test\n10.0.0.6 abc.test ab.test\n";

#[test]
fn toggle_line_twice_restores_text() {
    for line in 1..=3 {
        let mut file = HostsFile::parse(SAMPLE);
        file.toggle_line(line).unwrap();
        assert_ne!(file.to_string(), SAMPLE);
        file.toggle_line(line).unwrap();
        assert_eq!(file.to_string(), SAMPLE, "line {line}");
    }
}

#[test]
fn toggle_line_reports_new_state() {
    let mut file = HostsFile::parse(SAMPLE);
    assert!(!file.toggle_line(1).unwrap());
    assert_eq!(file.line(1), Some("# 127.0.0.1 localhost"));
    assert!(file.toggle_line(2).unwrap());
    assert_eq!(file.line(2), Some("10.0.0.5 api.test"));
}

#[test]
fn uncomment_strips_hash_and_following_space() {
    let mut file = HostsFile::parse("  #\t 10.0.0.1 a.test  ");
    file.toggle_line(1).unwrap();
    assert_eq!(file.to_string(), "10.0.0.1 a.test  ");
}

#[test]
fn toggle_line_out_of_range_leaves_text() {
    let mut file = HostsFile::parse(SAMPLE);
    let len = file.len();
    assert_eq!(
        file.toggle_line(0),
        Err(HostsError::LineOutOfRange { line: 0, len })
    );
    assert_eq!(
        file.toggle_line(len + 1),
        Err(HostsError::LineOutOfRange { line: len + 1, len })
    );
    assert_eq!(file.to_string(), SAMPLE);
}

#[test]
fn toggling_shared_line_flips_all_siblings() {
    let mut file = HostsFile::parse(SAMPLE);
    file.toggle_entry("10.0.0.6", "ab.test").unwrap();
    let siblings: Vec<_> = file.entries().into_iter().filter(|e| e.line == 3).collect();
    assert_eq!(siblings.len(), 2);
    assert!(siblings.iter().all(|e| !e.enabled));
}

#[test]
fn toggle_entry_matches_whole_tokens() {
    let mut file = HostsFile::parse("10.0.0.6 abc.test\n10.0.0.6 ab.test\n");
    file.toggle_entry("10.0.0.6", "ab.test").unwrap();
    assert_eq!(file.to_string(), "10.0.0.6 abc.test\n# 10.0.0.6 ab.test\n");

    let err = file.toggle_entry("10.0.0.6", "ab").unwrap_err();
    assert!(matches!(err, HostsError::EntryNotFound { .. }));
    let err = file.toggle_entry("10.0.0.60", "abc.test").unwrap_err();
    assert!(matches!(err, HostsError::EntryNotFound { .. }));
}

#[test]
fn set_entry_enabled_is_noop_when_already_in_state() {
    let mut file = HostsFile::parse(SAMPLE);
    assert!(!file.set_entry_enabled("127.0.0.1", "localhost", true).unwrap());
    assert_eq!(file.to_string(), SAMPLE);

    assert!(file.set_entry_enabled("10.0.0.5", "api.test", true).unwrap());
    let api = file.find_entry("10.0.0.5", "api.test").unwrap();
    assert!(api.enabled);

    assert!(file.set_entry_enabled("10.0.0.5", "api.test", false).unwrap());
    assert_eq!(file.to_string(), SAMPLE);
}

#[test]
fn set_entry_enabled_covers_duplicate_lines() {
    let text = "10.0.0.1 api.test\n127.0.0.1 localhost\n10.0.0.1 web.test api.test\n";
    let mut file = HostsFile::parse(text);
    assert!(file.set_entry_enabled("10.0.0.1", "api.test", false).unwrap());
    assert_eq!(
        file.to_string(),
        "# 10.0.0.1 api.test\n127.0.0.1 localhost\n# 10.0.0.1 web.test api.test\n"
    );
    assert!(file
        .entries()
        .iter()
        .filter(|e| e.hostname == "api.test")
        .all(|e| !e.enabled));

    assert!(file.set_entry_enabled("10.0.0.1", "api.test", true).unwrap());
    assert_eq!(file.to_string(), text);
}

#[test]
fn disabled_ipv6_entry_can_be_enabled_again() {
    let mut file = HostsFile::parse("::1 localhost\n");
    assert!(file.set_entry_enabled("::1", "localhost", false).unwrap());
    assert_eq!(file.to_string(), "# ::1 localhost\n");

    let entries = file.entries();
    assert_eq!(entries.len(), 1);
    assert!(!entries[0].enabled);

    assert!(file.set_entry_enabled("::1", "localhost", true).unwrap());
    assert_eq!(file.to_string(), "::1 localhost\n");
    assert!(file.toggle_entry("::1", "localhost").is_ok());
}

#[test]
fn disabled_entry_round_trips_through_parse() {
    let mut file = HostsFile::parse(SAMPLE);
    file.toggle_entry("127.0.0.1", "localhost").unwrap();
    let entries = hosts::parse(&file.to_string());
    let localhost = entries.iter().find(|e| e.hostname == "localhost").unwrap();
    assert!(!localhost.enabled);
    assert_eq!(localhost.line, 1);
}
