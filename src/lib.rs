//! hostsman - hosts file editor with enable/disable toggling and backups.

pub mod backup;
pub mod cli;
pub mod config;
pub mod doctor;
pub mod hosts;
pub mod logging;
pub mod manager;
pub mod platform;
pub mod store;
pub mod validate;
