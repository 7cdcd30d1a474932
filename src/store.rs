//! Data store operations and directory layout.

use anyhow::Result;

use crate::backup::BackupStore;
use crate::config::{AppPaths, Config};

/// Ensure the data directory exists.
pub fn ensure_dirs(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.config_dir)?;
    Ok(())
}

/// Load config from store.
pub fn load_config(paths: &AppPaths) -> Result<Config> {
    Config::load(paths)
}

/// Save config to store.
pub fn save_config(paths: &AppPaths, config: &Config) -> Result<()> {
    Config::save(config, paths)
}

/// Backup store at the configured location.
pub fn backup_store(paths: &AppPaths, config: &Config) -> BackupStore {
    BackupStore::new(config.backup_dir(paths))
}
