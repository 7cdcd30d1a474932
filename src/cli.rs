//! CLI definitions and command routing.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::AppPaths;
use crate::hosts::{Entry, EntryEdit};
use crate::manager::HostsManager;
use crate::platform::default_hosts_writer;
use crate::{doctor, store, validate};

#[derive(Parser)]
#[command(name = "hostsman")]
#[command(about = "Manage hosts file entries: toggle, edit, back up and restore")]
pub struct Cli {
    /// Hosts file to operate on (default: config hosts_file, else the system file)
    #[arg(long, global = true)]
    pub hosts_file: Option<PathBuf>,

    /// Skip the automatic backup before writing
    #[arg(long, global = true)]
    pub no_backup: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List host entries with their line numbers
    List {
        #[arg(long, value_enum, default_value_t = StateFilter::All)]
        state: StateFilter,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Append a new entry at the end of the file
    Add {
        address: String,
        hostname: String,
        #[arg(long)]
        comment: Option<String>,
        /// Add the entry commented out
        #[arg(long)]
        disabled: bool,
    },
    /// Change the address, hostname or comment of one entry; other
    /// hostnames on the same line are kept
    Edit {
        address: String,
        hostname: String,
        /// New address
        #[arg(long = "address", value_name = "ADDRESS")]
        new_address: Option<String>,
        /// New hostname
        #[arg(long = "hostname", value_name = "HOSTNAME")]
        new_hostname: Option<String>,
        /// New comment
        #[arg(long, conflicts_with = "no_comment")]
        comment: Option<String>,
        /// Remove the comment
        #[arg(long)]
        no_comment: bool,
    },
    /// Overwrite a whole line with a single mapping
    SetLine {
        line: usize,
        address: String,
        hostname: String,
        #[arg(long)]
        comment: Option<String>,
        #[arg(long)]
        disabled: bool,
    },
    /// Remove one entry (siblings on the same line are kept)
    Delete { address: String, hostname: String },
    /// Remove a whole line by number
    DeleteLine { line: usize },
    /// Flip the line holding an entry between enabled and disabled
    Toggle { address: String, hostname: String },
    /// Flip a line by number between enabled and disabled
    ToggleLine { line: usize },
    /// Enable an entry
    Enable {
        address: String,
        hostname: String,
        /// Disable every other hostname on the same address
        #[arg(long)]
        only: bool,
    },
    /// Disable an entry
    Disable { address: String, hostname: String },
    /// Create, list, restore and clean up backups
    Backup {
        #[command(subcommand)]
        cmd: BackupCmd,
    },
    /// Show hosts file and backup status
    Info,
    /// Show or change settings (config.toml)
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateFilter {
    All,
    Enabled,
    Disabled,
}

#[derive(Subcommand)]
pub enum BackupCmd {
    /// Back up the hosts file now
    Create,
    /// List backups, newest first
    List,
    /// Restore a backup (newest if no name given)
    Restore { name: Option<String> },
    /// Delete one backup
    Delete { name: String },
    /// Delete all backups
    Clear,
    /// Delete backups beyond max_backups
    Prune,
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print current settings
    Show,
    /// Set auto_backup, max_backups, backup_dir or hosts_file
    Set { key: String, value: String },
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);
    let paths = AppPaths::default_paths();

    let mut config = store::load_config(&paths)?;
    if let Some(path) = &cli.hosts_file {
        config.hosts_file = Some(path.clone());
    }
    if cli.no_backup {
        config.auto_backup = false;
    }

    let writer = default_hosts_writer(&config.hosts_file());
    let backups = store::backup_store(&paths, &config);
    let mut manager = HostsManager::new(writer.as_ref());
    if config.auto_backup {
        manager = manager.with_backups(backups.clone(), config.max_backups);
    }

    match cli.command {
        Commands::List { state, json } => cmd_list(&manager, state, json),
        Commands::Add {
            address,
            hostname,
            comment,
            disabled,
        } => {
            validate::validate_address(&address)?;
            validate::validate_hostname(&hostname)?;
            if let Some(c) = &comment {
                validate::validate_comment(c)?;
            }
            let line = manager.apply(|f| {
                let line = f.insert_entry(&address, &hostname, comment.as_deref());
                if disabled {
                    f.toggle_line(line)?;
                }
                Ok(line)
            })?;
            println!("Added {address} {hostname} (line {line})");
            Ok(())
        }
        Commands::Edit {
            address,
            hostname,
            new_address,
            new_hostname,
            comment,
            no_comment,
        } => {
            if let Some(a) = &new_address {
                validate::validate_address(a)?;
            }
            if let Some(h) = &new_hostname {
                validate::validate_hostname(h)?;
            }
            if let Some(c) = &comment {
                validate::validate_comment(c)?;
            }
            let current = manager
                .read()?
                .find_entry(&address, &hostname)
                .ok_or_else(|| crate::hosts::HostsError::EntryNotFound {
                    address: address.clone(),
                    hostname: hostname.clone(),
                })?;
            let edit = EntryEdit {
                address: new_address.unwrap_or(current.address),
                hostname: new_hostname.unwrap_or(current.hostname),
                comment: if no_comment {
                    None
                } else {
                    comment.or(current.comment)
                },
            };
            let line = manager.edit(&address, &hostname, &edit)?;
            println!("Updated {} {} (line {line})", edit.address, edit.hostname);
            Ok(())
        }
        Commands::SetLine {
            line,
            address,
            hostname,
            comment,
            disabled,
        } => {
            validate::validate_address(&address)?;
            validate::validate_hostname(&hostname)?;
            if let Some(c) = &comment {
                validate::validate_comment(c)?;
            }
            manager.replace_line(line, &address, &hostname, comment.as_deref(), !disabled)?;
            println!("Line {line} set to {address} {hostname}");
            Ok(())
        }
        Commands::Delete { address, hostname } => {
            manager.remove_entry(&address, &hostname)?;
            println!("Deleted {address} {hostname}");
            Ok(())
        }
        Commands::DeleteLine { line } => {
            let removed = manager.delete_line(line)?;
            println!("Deleted line {line}: {}", removed.trim());
            Ok(())
        }
        Commands::Toggle { address, hostname } => {
            let enabled = manager.toggle_entry(&address, &hostname)?;
            println!("{} {address} {hostname}", state_word(enabled));
            Ok(())
        }
        Commands::ToggleLine { line } => {
            let enabled = manager.toggle_line(line)?;
            println!("{} line {line}", state_word(enabled));
            Ok(())
        }
        Commands::Enable {
            address,
            hostname,
            only,
        } => {
            if only {
                manager.enable_only(&address, &hostname)?;
                println!("Enabled {hostname} and disabled other entries with IP {address}");
            } else if manager.set_enabled(&address, &hostname, true)? {
                println!("Enabled {address} {hostname}");
            } else {
                println!("{address} {hostname} is already enabled");
            }
            Ok(())
        }
        Commands::Disable { address, hostname } => {
            if manager.set_enabled(&address, &hostname, false)? {
                println!("Disabled {address} {hostname}");
            } else {
                println!("{address} {hostname} is already disabled");
            }
            Ok(())
        }
        Commands::Backup { cmd } => {
            // Explicit backup commands use the store even with auto_backup off.
            let manager = HostsManager::new(writer.as_ref())
                .with_backups(backups.clone(), config.max_backups);
            cmd_backup(&manager, &backups, config.max_backups, cmd)
        }
        Commands::Info => {
            let results = doctor::run_checks(writer.path(), &backups, config.max_backups)?;
            let mut failed = false;
            for r in &results {
                let mark = if r.ok { "ok" } else { "!!" };
                println!("[{mark}] {}", r.message);
                failed |= !r.ok;
            }
            if failed {
                anyhow::bail!("some checks failed");
            }
            Ok(())
        }
        Commands::Config { cmd } => cmd_config(&paths, cmd),
    }
}

fn state_word(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

fn cmd_list(manager: &HostsManager, state: StateFilter, json: bool) -> Result<()> {
    let entries: Vec<Entry> = manager
        .entries()?
        .into_iter()
        .filter(|e| match state {
            StateFilter::All => true,
            StateFilter::Enabled => e.enabled,
            StateFilter::Disabled => !e.enabled,
        })
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for e in &entries {
        let mark = if e.enabled { "on " } else { "off" };
        match &e.comment {
            Some(c) => println!("{:>4}  {mark}  {}\t{}\t# {c}", e.line, e.address, e.hostname),
            None => println!("{:>4}  {mark}  {}\t{}", e.line, e.address, e.hostname),
        }
    }
    Ok(())
}

fn cmd_backup(
    manager: &HostsManager,
    backups: &crate::backup::BackupStore,
    max_backups: usize,
    cmd: BackupCmd,
) -> Result<()> {
    match cmd {
        BackupCmd::Create => {
            let path = manager.backup()?;
            println!("Hosts file backed up to: {}", path.display());
            Ok(())
        }
        BackupCmd::List => {
            for b in backups.list()? {
                println!(
                    "{}\t{}\t{}",
                    b.name,
                    doctor::format_time(b.modified),
                    doctor::format_size(b.size)
                );
            }
            Ok(())
        }
        BackupCmd::Restore { name } => {
            let path = manager.restore(name.as_deref())?;
            println!("Hosts file restored from: {}", path.display());
            Ok(())
        }
        BackupCmd::Delete { name } => {
            let path = backups.delete(&name)?;
            println!("Backup deleted: {}", path.display());
            Ok(())
        }
        BackupCmd::Clear => {
            let count = backups.clear()?;
            println!("Deleted {count} backup files.");
            Ok(())
        }
        BackupCmd::Prune => {
            let deleted = backups.prune(max_backups)?;
            println!("Deleted {} old backup files.", deleted.len());
            Ok(())
        }
    }
}

fn cmd_config(paths: &AppPaths, cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Show => {
            let config = store::load_config(paths)?;
            println!("config_file = {}", paths.config_file.display());
            println!("auto_backup = {}", config.auto_backup);
            println!("max_backups = {}", config.max_backups);
            println!("backup_dir = {}", config.backup_dir(paths).display());
            println!("hosts_file = {}", config.hosts_file().display());
            Ok(())
        }
        ConfigCmd::Set { key, value } => {
            store::ensure_dirs(paths)?;
            let mut config = store::load_config(paths)?;
            config.set(&key, &value)?;
            store::save_config(paths, &config)?;
            println!("Set {key} = {value}");
            Ok(())
        }
    }
}
