//! Parsing hosts text into entries.

use hostsman::hosts::{self, Entry, HostsFile};

#[test]
fn enabled_and_disabled_entries() {
    let text = "127.0.0.1 localhost\n# 192.168.0.1 mysite.local # test comment\n";
    let entries = hosts::parse(text);
    assert_eq!(
        entries,
        vec![
            Entry {
                address: "127.0.0.1".into(),
                hostname: "localhost".into(),
                comment: None,
                enabled: true,
                line: 1,
            },
            Entry {
                address: "192.168.0.1".into(),
                hostname: "mysite.local".into(),
                comment: Some("test comment".into()),
                enabled: false,
                line: 2,
            },
        ]
    );
}

#[test]
fn multi_hostname_line_shares_fields() {
    let entries = hosts::parse("10.1.2.3 one.test two.test # lab box");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].hostname, "one.test");
    assert_eq!(entries[1].hostname, "two.test");
    for e in &entries {
        assert_eq!(e.address, "10.1.2.3");
        assert_eq!(e.comment.as_deref(), Some("lab box"));
        assert!(e.enabled);
        assert_eq!(e.line, 1);
    }
}

#[test]
fn prose_comments_and_blanks_are_skipped() {
    let text = "##\n# Host Database\n#\n\n   \n# localhost is used to configure the loopback\n127.0.0.1\tlocalhost\n";
    let entries = hosts::parse(text);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].line, 7);
}

#[test]
fn address_without_hostnames_yields_nothing() {
    assert!(hosts::parse("127.0.0.1\n127.0.0.1    # nothing here\n").is_empty());
}

#[test]
fn ipv6_parses_enabled_and_commented() {
    let entries = hosts::parse("::1 localhost\n# fe80::1 router\n# Note: ::1 is loopback\n");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].address, "::1");
    assert!(entries[0].enabled);
    assert_eq!(entries[1].address, "fe80::1");
    assert!(!entries[1].enabled);
}

#[test]
fn indented_and_crlf_lines() {
    let entries = hosts::parse("  10.0.0.1\tdb.test\r\n\t#10.0.0.2 cache.test\r\n");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].hostname, "db.test");
    assert!(!entries[1].enabled);
    assert_eq!(entries[1].hostname, "cache.test");
}

#[test]
fn unedited_text_renders_byte_identical() {
    let texts = [
        "",
        "\n",
        "# header\n\n127.0.0.1 localhost\n",
        "no trailing newline",
        "  odd   spacing\t\t# keep\r\n\n\n",
    ];
    for text in texts {
        assert_eq!(HostsFile::parse(text).to_string(), text);
    }
}

#[test]
fn non_entry_lines_survive_edits_elsewhere() {
    let text = "# header\n\n127.0.0.1 localhost\n  # trailing prose  \n";
    let mut file = HostsFile::parse(text);
    file.toggle_line(3).unwrap();
    let out = file.to_string();
    let before: Vec<&str> = text.split('\n').collect();
    let after: Vec<&str> = out.split('\n').collect();
    assert_eq!(before.len(), after.len());
    for (i, (b, a)) in before.iter().zip(&after).enumerate() {
        if i != 2 {
            assert_eq!(b, a);
        }
    }
}

#[test]
fn len_and_is_empty_count_physical_lines() {
    assert!(HostsFile::default().is_empty());
    let blank = HostsFile::parse("");
    assert_eq!(blank.len(), 1);
    assert!(!blank.is_empty());
    assert_eq!(HostsFile::parse("10.0.0.1 a\n\n").len(), 3);
}
