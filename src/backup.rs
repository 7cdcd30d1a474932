//! Timestamped hosts file snapshots with a retention cap.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// File name prefix shared by all backups.
pub const BACKUP_PREFIX: &str = "hosts.backup.";

/// One backup file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub path: PathBuf,
    pub name: String,
    pub modified: SystemTime,
    pub size: u64,
}

/// Directory of `hosts.backup.<timestamp>` snapshots.
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

/// Backup file name for `at`: ISO 8601 with `:` and `.` replaced by `-`.
pub fn backup_name(at: DateTime<Utc>) -> String {
    format!("{BACKUP_PREFIX}{}", at.format("%Y-%m-%dT%H-%M-%S-%3fZ"))
}

impl BackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Backups sorted newest first by modification time. Ties keep
    /// directory listing order. A missing directory lists as empty.
    pub fn list(&self) -> Result<Vec<BackupInfo>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("read backup dir {}", self.dir.display()))?
        {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(BACKUP_PREFIX) {
                continue;
            }
            let (modified, size) = match entry.metadata() {
                Ok(meta) => (meta.modified().unwrap_or(SystemTime::UNIX_EPOCH), meta.len()),
                Err(e) => {
                    tracing::warn!(%name, "could not stat backup: {e}");
                    (SystemTime::UNIX_EPOCH, 0)
                }
            };
            backups.push(BackupInfo {
                path: entry.path(),
                name,
                modified,
                size,
            });
        }
        backups.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(backups)
    }

    /// Most recent backup, if any.
    pub fn latest(&self) -> Result<Option<BackupInfo>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Write `content` as a new backup. Creates the directory if needed.
    pub fn create(&self, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create backup dir {}", self.dir.display()))?;
        let name = backup_name(Utc::now());
        let mut path = self.dir.join(&name);
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("{name}-{n}"));
            n += 1;
        }
        fs::write(&path, content).with_context(|| format!("write backup {}", path.display()))?;
        tracing::info!(path = %path.display(), "hosts file backed up");
        Ok(path)
    }

    /// Delete the oldest backups beyond `max`. Returns the deleted paths.
    pub fn prune(&self, max: usize) -> Result<Vec<PathBuf>> {
        self.prune_except(max, None)
    }

    /// Like [`BackupStore::prune`], but `keep` survives even when it is
    /// among the oldest; it still counts toward `max`.
    pub fn prune_except(&self, max: usize, keep: Option<&Path>) -> Result<Vec<PathBuf>> {
        let mut deleted = Vec::new();
        for backup in self.list()?.into_iter().skip(max) {
            if keep == Some(backup.path.as_path()) {
                continue;
            }
            fs::remove_file(&backup.path)
                .with_context(|| format!("delete backup {}", backup.path.display()))?;
            deleted.push(backup.path);
        }
        if !deleted.is_empty() {
            tracing::info!(count = deleted.len(), max, "cleaned up old backups");
        }
        Ok(deleted)
    }

    /// Resolve a backup name (inside this store) or a path to a backup file.
    pub fn resolve(&self, name_or_path: &str) -> Result<PathBuf> {
        let given = Path::new(name_or_path);
        let path = if given.components().count() == 1 {
            self.dir.join(given)
        } else {
            given.to_path_buf()
        };
        let is_backup = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with(BACKUP_PREFIX))
            .unwrap_or(false);
        if !is_backup {
            anyhow::bail!("'{name_or_path}' is not a backup (expected {BACKUP_PREFIX}<timestamp>)");
        }
        if !path.is_file() {
            anyhow::bail!("backup not found: {}", path.display());
        }
        Ok(path)
    }

    /// Read a backup's content.
    pub fn read(&self, name_or_path: &str) -> Result<String> {
        self.read_path(&self.resolve(name_or_path)?)
    }

    /// Read a backup already resolved to a path.
    pub fn read_path(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("read backup {}", path.display()))
    }

    /// Delete one backup.
    pub fn delete(&self, name_or_path: &str) -> Result<PathBuf> {
        let path = self.resolve(name_or_path)?;
        fs::remove_file(&path).with_context(|| format!("delete backup {}", path.display()))?;
        Ok(path)
    }

    /// Delete every backup. Files that cannot be removed are logged and
    /// skipped. Returns how many were deleted.
    pub fn clear(&self) -> Result<usize> {
        let mut count = 0;
        for backup in self.list()? {
            match fs::remove_file(&backup.path) {
                Ok(()) => count += 1,
                Err(e) => tracing::warn!(path = %backup.path.display(), "failed to delete backup: {e}"),
            }
        }
        Ok(count)
    }
}
