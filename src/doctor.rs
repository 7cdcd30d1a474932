//! Info command: health checks for the hosts file and backups.

use anyhow::Result;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::backup::BackupStore;
use crate::hosts::HostsFile;

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Filesystem facts about the hosts file.
#[derive(Debug, Clone)]
pub struct HostsFileInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub readable: bool,
    pub writable: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Stat the hosts file. Never fails; a missing file reports `exists: false`.
pub fn hosts_file_info(path: &Path) -> HostsFileInfo {
    let meta = std::fs::metadata(path).ok();
    HostsFileInfo {
        path: path.to_path_buf(),
        exists: meta.is_some(),
        readable: OpenOptions::new().read(true).open(path).is_ok(),
        writable: OpenOptions::new().append(true).open(path).is_ok(),
        size: meta.as_ref().map(|m| m.len()).unwrap_or(0),
        modified: meta.and_then(|m| m.modified().ok()),
    }
}

/// Human readable size: `0 B`, `1 KB`, `1.5 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

pub fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Run all checks.
pub fn run_checks(hosts_path: &Path, backups: &BackupStore, max_backups: usize) -> Result<Vec<CheckResult>> {
    let mut results = Vec::new();
    let info = hosts_file_info(hosts_path);

    // 1. Hosts file present and readable
    if !info.exists {
        results.push(CheckResult::fail(format!(
            "Hosts file not found: {}",
            info.path.display()
        )));
        return Ok(results);
    }
    let modified = info.modified.map(format_time).unwrap_or_else(|| "unknown".into());
    results.push(CheckResult::ok(format!(
        "Hosts file: {} ({}, modified {modified})",
        info.path.display(),
        format_size(info.size)
    )));
    if !info.readable {
        results.push(CheckResult::fail("Hosts file is not readable."));
        return Ok(results);
    }
    if info.writable {
        results.push(CheckResult::ok("Hosts file is writable."));
    } else {
        results.push(CheckResult::ok(
            "Hosts file is not writable; writes will request elevated privileges.",
        ));
    }

    // 2. Entries and conflicting enabled mappings
    let text = std::fs::read_to_string(hosts_path)?;
    let entries = HostsFile::parse(&text).entries();
    let enabled = entries.iter().filter(|e| e.enabled).count();
    results.push(CheckResult::ok(format!(
        "{} entries ({enabled} enabled, {} disabled)",
        entries.len(),
        entries.len() - enabled
    )));

    let mut active: HashMap<&str, Vec<&str>> = HashMap::new();
    for e in entries.iter().filter(|e| e.enabled) {
        let addrs = active.entry(e.hostname.as_str()).or_default();
        if !addrs.contains(&e.address.as_str()) {
            addrs.push(e.address.as_str());
        }
    }
    let mut conflicts: Vec<_> = active
        .into_iter()
        .filter(|(_, addrs)| addrs.len() > 1 && !is_dual_stack(addrs))
        .collect();
    conflicts.sort();
    for (host, addrs) in conflicts {
        results.push(CheckResult::fail(format!(
            "{host} is enabled for several addresses: {}. Use 'hostsman enable --only'.",
            addrs.join(", ")
        )));
    }

    // 3. Backups
    let backups_list = backups.list()?;
    match backups_list.first() {
        None => results.push(CheckResult::ok(format!(
            "No backups in {}",
            backups.dir().display()
        ))),
        Some(newest) => results.push(CheckResult::ok(format!(
            "{} backup(s) in {} (newest {})",
            backups_list.len(),
            backups.dir().display(),
            format_time(newest.modified)
        ))),
    }
    if backups_list.len() > max_backups {
        results.push(CheckResult::fail(format!(
            "{} backups exceed max_backups = {max_backups}. Run 'hostsman backup prune'.",
            backups_list.len()
        )));
    }

    Ok(results)
}

/// One IPv4 and one IPv6 address for the same name is the usual loopback pairing.
fn is_dual_stack(addrs: &[&str]) -> bool {
    addrs.len() == 2 && addrs.iter().filter(|a| a.contains(':')).count() == 1
}
