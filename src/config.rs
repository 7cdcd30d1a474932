//! Configuration loading and path resolution.
//!
//! Supports HOSTSMAN_HOME env var override for testing.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of backups kept after each new backup.
pub const DEFAULT_MAX_BACKUPS: usize = 10;

/// Paths for hostsman data store.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub backups_dir: PathBuf,
}

impl AppPaths {
    /// Build paths from base directory (e.g. ProjectDirs data dir or HOSTSMAN_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        let config_file = base.join("config.toml");
        let backups_dir = base.join("backups");
        Self {
            config_dir: base,
            config_file,
            backups_dir,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default paths (respects HOSTSMAN_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("HOSTSMAN_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("com", "hostsman", "hostsman") {
            dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".hostsman")
        };
        Self::from_base(base)
    }
}

/// Main config.toml structure.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Snapshot the hosts file before every write.
    #[serde(default = "default_true")]
    pub auto_backup: bool,
    /// Backups kept after each new backup.
    #[serde(default = "default_max_backups")]
    pub max_backups: usize,
    /// Backup directory; `~/` is expanded. Defaults to `<data dir>/backups`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<String>,
    /// Hosts file to manage instead of the system one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts_file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_max_backups() -> usize {
    DEFAULT_MAX_BACKUPS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_backup: true,
            max_backups: DEFAULT_MAX_BACKUPS,
            backup_dir: None,
            hosts_file: None,
        }
    }
}

impl Config {
    /// Load config from paths (with shared lock when file exists).
    pub fn load(paths: &AppPaths) -> Result<Config> {
        if paths.config_file.is_file() {
            let mut file = fs::OpenOptions::new().read(true).open(&paths.config_file)?;
            fs2::FileExt::lock_shared(&file)?;
            use std::io::Read;
            let mut s = String::new();
            file.read_to_string(&mut s)?;
            let cfg: Config = toml::from_str(&s)
                .with_context(|| format!("parse {}", paths.config_file.display()))?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to paths (with exclusive lock). Creates parent dirs if needed.
    pub fn save(&self, paths: &AppPaths) -> Result<()> {
        if let Some(p) = paths.config_file.parent() {
            fs::create_dir_all(p)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&paths.config_file)?;
        fs2::FileExt::lock_exclusive(&file)?;
        let s = toml::to_string_pretty(self)?;
        use std::io::Write;
        file.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Set a key from its string form (`config set`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "auto_backup" => {
                self.auto_backup = value
                    .parse()
                    .with_context(|| format!("auto_backup expects true or false, got {value:?}"))?;
            }
            "max_backups" => {
                let max: usize = value
                    .parse()
                    .with_context(|| format!("max_backups expects a number, got {value:?}"))?;
                if max == 0 {
                    anyhow::bail!("max_backups must be at least 1 (set auto_backup = false to stop backups)");
                }
                self.max_backups = max;
            }
            "backup_dir" => self.backup_dir = non_empty(value),
            "hosts_file" => self.hosts_file = non_empty(value).map(PathBuf::from),
            _ => anyhow::bail!(
                "unknown config key '{key}' (expected auto_backup, max_backups, backup_dir, hosts_file)"
            ),
        }
        Ok(())
    }

    /// Resolved backup directory.
    pub fn backup_dir(&self, paths: &AppPaths) -> PathBuf {
        match &self.backup_dir {
            Some(dir) => expand_home(dir),
            None => paths.backups_dir.clone(),
        }
    }

    /// Resolved hosts file.
    pub fn hosts_file(&self) -> PathBuf {
        self.hosts_file
            .clone()
            .unwrap_or_else(crate::platform::system_hosts_path)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}

/// Path to config.toml (respects HOSTSMAN_HOME).
pub fn config_path() -> PathBuf {
    AppPaths::default_paths().config_file
}
