//! Read, edit, back up and write the hosts file as one operation.
//!
//! Each operation re-reads the file right before editing, so line numbers
//! are resolved against current text. Callers must not run overlapping
//! operations against the same file without their own serialization; the
//! last write wins.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::backup::BackupStore;
use crate::config::DEFAULT_MAX_BACKUPS;
use crate::hosts::{Entry, EntryEdit, HostsError, HostsFile};
use crate::platform::HostsWriter;

pub struct HostsManager<'a> {
    writer: &'a dyn HostsWriter,
    backups: Option<BackupStore>,
    max_backups: usize,
}

impl<'a> HostsManager<'a> {
    /// Manager without automatic backups.
    pub fn new(writer: &'a dyn HostsWriter) -> Self {
        Self {
            writer,
            backups: None,
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }

    /// Back up the current file before every write and keep at most `max` backups.
    pub fn with_backups(mut self, store: BackupStore, max: usize) -> Self {
        self.backups = Some(store);
        self.max_backups = max;
        self
    }

    pub fn read_text(&self) -> Result<String> {
        let path = self.writer.path();
        self.writer
            .read_hosts()
            .with_context(|| format!("Cannot read hosts file {}", path.display()))
    }

    pub fn read(&self) -> Result<HostsFile> {
        Ok(HostsFile::parse(&self.read_text()?))
    }

    pub fn entries(&self) -> Result<Vec<Entry>> {
        Ok(self.read()?.entries())
    }

    /// Run `edit` on freshly read text and write the result. Nothing is
    /// written when the edit fails or leaves the text unchanged.
    pub fn apply<T>(
        &self,
        edit: impl FnOnce(&mut HostsFile) -> Result<T, HostsError>,
    ) -> Result<T> {
        let current = self.read_text()?;
        let mut file = HostsFile::parse(&current);
        let out = edit(&mut file)?;
        let updated = file.to_string();
        if updated == current {
            tracing::debug!("hosts file unchanged, skipping write");
            return Ok(out);
        }
        self.write_with_backup(&current, &updated, None)?;
        Ok(out)
    }

    /// Snapshot `current`, write `updated`, then prune. Pruning waits for a
    /// successful write and never removes `keep`.
    fn write_with_backup(&self, current: &str, updated: &str, keep: Option<&Path>) -> Result<()> {
        if let Some(store) = &self.backups {
            store.create(current)?;
        }
        self.writer.write_hosts(updated)?;
        tracing::info!(path = %self.writer.path().display(), "hosts file updated");
        if let Some(store) = &self.backups {
            store.prune_except(self.max_backups, keep)?;
        }
        Ok(())
    }

    /// Append a new entry; returns its line number.
    pub fn add(&self, address: &str, hostname: &str, comment: Option<&str>) -> Result<usize> {
        self.apply(|f| Ok(f.insert_entry(address, hostname, comment)))
    }

    /// Returns the new enabled state.
    pub fn toggle_line(&self, line: usize) -> Result<bool> {
        self.apply(|f| f.toggle_line(line))
    }

    /// Returns the new enabled state.
    pub fn toggle_entry(&self, address: &str, hostname: &str) -> Result<bool> {
        self.apply(|f| f.toggle_entry(address, hostname))
    }

    /// Returns whether anything changed.
    pub fn set_enabled(&self, address: &str, hostname: &str, enabled: bool) -> Result<bool> {
        self.apply(|f| f.set_entry_enabled(address, hostname, enabled))
    }

    /// Returns the number of lines changed.
    pub fn enable_only(&self, address: &str, hostname: &str) -> Result<usize> {
        self.apply(|f| f.enable_only(address, hostname))
    }

    /// Edit the entry currently mapping `hostname` to `address`; returns
    /// the line it ends up on.
    pub fn edit(&self, address: &str, hostname: &str, edit: &EntryEdit) -> Result<usize> {
        self.apply(|f| {
            let entry = f
                .find_entry(address, hostname)
                .ok_or_else(|| HostsError::EntryNotFound {
                    address: address.to_string(),
                    hostname: hostname.to_string(),
                })?;
            f.edit_entry(entry.line, hostname, edit)
        })
    }

    pub fn replace_line(
        &self,
        line: usize,
        address: &str,
        hostname: &str,
        comment: Option<&str>,
        enabled: bool,
    ) -> Result<()> {
        self.apply(|f| f.replace_line(line, address, hostname, comment, enabled))
    }

    /// Returns the removed line.
    pub fn delete_line(&self, line: usize) -> Result<String> {
        self.apply(|f| f.delete_line(line))
    }

    pub fn remove_entry(&self, address: &str, hostname: &str) -> Result<()> {
        self.apply(|f| f.remove_entry(address, hostname))
    }

    fn store(&self) -> Result<&BackupStore> {
        self.backups
            .as_ref()
            .context("no backup directory configured")
    }

    /// Snapshot the current file now; returns the backup path.
    pub fn backup(&self) -> Result<PathBuf> {
        let store = self.store()?;
        let path = store.create(&self.read_text()?)?;
        store.prune(self.max_backups)?;
        Ok(path)
    }

    /// Write a backup's content back to the hosts file; the newest backup
    /// when `name` is `None`. The file being replaced is backed up first.
    pub fn restore(&self, name: Option<&str>) -> Result<PathBuf> {
        let store = self.store()?;
        let path = match name {
            Some(n) => store.resolve(n)?,
            None => store.latest()?.context("No backup files found")?.path,
        };
        let content = store.read_path(&path)?;
        let current = self.read_text()?;
        self.write_with_backup(&current, &content, Some(&path))?;
        Ok(path)
    }
}
